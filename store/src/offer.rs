//! Legacy exchange offer lookup.

use crate::StoreError;
use overlay_types::{Address, Amount, PropertyId};
use serde::{Deserialize, Serialize};

/// Terms a seller attached to an open sell offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferTerms {
    /// Minimum base-ledger fee a buyer must pay to accept.
    pub min_accept_fee: Amount,
    /// Blocks a buyer has to pay after a successful accept.
    pub payment_window: u8,
}

/// Trait for legacy exchange offer lookups, keyed by `(seller, property)`.
pub trait OfferStore {
    fn get_offer(
        &self,
        seller: &Address,
        property: PropertyId,
    ) -> Result<Option<OfferTerms>, StoreError>;

    fn offer_exists(&self, seller: &Address, property: PropertyId) -> Result<bool, StoreError> {
        Ok(self.get_offer(seller, property)?.is_some())
    }
}
