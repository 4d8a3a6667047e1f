//! Legacy exchange: sell offers against the base currency and their acceptance.

use overlay_types::{Address, Amount, PropertyId, TypesError};
use serde::{Deserialize, Serialize};

/// What a sell offer transaction does to the seller's offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DexAction {
    New,
    Update,
    Cancel,
}

impl DexAction {
    pub fn from_code(code: i64) -> Result<Self, TypesError> {
        match code {
            1 => Ok(Self::New),
            2 => Ok(Self::Update),
            3 => Ok(Self::Cancel),
            _ => Err(TypesError::UnknownCode { field: "exchange action", code }),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::New => 1,
            Self::Update => 2,
            Self::Cancel => 3,
        }
    }
}

/// Place, update or cancel a sell offer of a primary token for the base currency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeOffer {
    pub from: Address,
    pub property: PropertyId,
    pub amount_for_sale: Amount,
    /// Base currency desired in exchange.
    pub amount_desired: Amount,
    /// Blocks a buyer has to pay after accepting.
    pub payment_window: u8,
    /// Minimum base-ledger fee a buyer must pay to accept.
    pub min_accept_fee: Amount,
    pub action: DexAction,
}

/// Accept `to`'s sell offer of `property`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeAccept {
    pub from: Address,
    /// The seller whose offer is accepted.
    pub to: Address,
    pub property: PropertyId,
    pub amount: Amount,
    /// Skip the unsafe fee and payment window protection.
    pub allow_unsafe: bool,
}
