//! Fundamental types for the overlay token layer.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! base-ledger addresses, property identifiers, amounts, transaction ids, timestamps
//! and network selection.

pub mod address;
pub mod amount;
pub mod error;
pub mod hash;
pub mod network;
pub mod property;
pub mod time;

pub use address::Address;
pub use amount::{Amount, COIN, MAX_AMOUNT};
pub use error::TypesError;
pub use hash::TxId;
pub use network::Network;
pub use property::{Ecosystem, PropertyId, PropertyType};
pub use time::Timestamp;
