//! Confirmed balance lookup.

use crate::StoreError;
use overlay_types::{Address, Amount, PropertyId};

/// Trait for confirmed token balances.
///
/// "Confirmed" means every effect the external reconciliation process has already
/// applied; provisional effects of just-submitted transactions are tracked
/// separately by the pending ledger.
pub trait BalanceStore {
    fn confirmed_balance(
        &self,
        address: &Address,
        property: PropertyId,
    ) -> Result<Amount, StoreError>;
}
