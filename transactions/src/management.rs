//! Administrator commands on an existing property.

use overlay_types::{Address, Amount, PropertyId};
use serde::{Deserialize, Serialize};

/// Mint `amount` new units of a managed property to `to`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub from: Address,
    pub to: Address,
    pub property: PropertyId,
    pub amount: Amount,
    pub memo: String,
}

/// Destroy `amount` units of a managed property held by the administrator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revoke {
    pub from: Address,
    pub property: PropertyId,
    pub amount: Amount,
    pub memo: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseCrowdsale {
    pub from: Address,
    pub property: PropertyId,
}

/// Transfer administrative control of `property` to `to`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeIssuer {
    pub from: Address,
    pub to: Address,
    pub property: PropertyId,
}
