//! Nullable infrastructure for deterministic testing.
//!
//! The issuance pipeline reaches outside itself in two places: consensus-state
//! reads and the base-ledger transaction builder. This crate provides
//! test-friendly implementations of both that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch a node, a wallet or the network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod builder;
pub mod store;

pub use builder::{NullBuilder, RecordedBuild};
pub use store::NullState;

use overlay_types::{Address, Network};

/// A deterministic main-network address derived from `seed`.
pub fn test_address(seed: u8) -> Address {
    Address::from_hash160(Network::Main.pubkey_address_version(), &[seed; 20])
}

/// Like [`test_address`], for another network.
pub fn test_address_on(network: Network, seed: u8) -> Address {
    Address::from_hash160(network.pubkey_address_version(), &[seed; 20])
}
