//! Read-only consensus-state capabilities.
//!
//! The issuance pipeline never touches a global store. It is handed a value
//! implementing these traits (a live state adapter in production, an in-memory
//! snapshot in tests) and only ever reads from it.

pub mod balance;
pub mod error;
pub mod offer;
pub mod property;

pub use balance::BalanceStore;
pub use error::StoreError;
pub use offer::{OfferStore, OfferTerms};
pub use property::{PropertyDescriptor, PropertyStore};

/// Everything the guard chain may consult about confirmed consensus state.
pub trait ConsensusState: PropertyStore + BalanceStore + OfferStore {}

impl<T: PropertyStore + BalanceStore + OfferStore> ConsensusState for T {}
