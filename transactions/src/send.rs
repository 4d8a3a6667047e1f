//! Plain transfers: simple send and send-to-owners.

use overlay_types::{Address, Amount, PropertyId};
use serde::{Deserialize, Serialize};

/// Transfer `amount` of `property` from `from` to `to`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleSend {
    pub from: Address,
    pub to: Address,
    pub property: PropertyId,
    pub amount: Amount,
    /// Address able to redeem data-carrying outputs. Defaults to `from`.
    pub redeem: Option<Address>,
    /// Base-currency value placed in the reference output to `to`.
    pub reference_amount: Amount,
}

/// Distribute `amount` of `property` to every other holder of it, pro rata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendToOwners {
    pub from: Address,
    pub property: PropertyId,
    pub amount: Amount,
    pub redeem: Option<Address>,
}
