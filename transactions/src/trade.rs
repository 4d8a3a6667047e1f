//! Token-for-token exchange orders.

use overlay_types::{Address, Amount, PropertyId, TypesError};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeAction {
    Add,
    CancelAtPrice,
    CancelPair,
    CancelEverything,
}

impl TradeAction {
    pub fn from_code(code: i64) -> Result<Self, TypesError> {
        match code {
            1 => Ok(Self::Add),
            2 => Ok(Self::CancelAtPrice),
            3 => Ok(Self::CancelPair),
            4 => Ok(Self::CancelEverything),
            _ => Err(TypesError::UnknownCode { field: "trade action", code }),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::Add => 1,
            Self::CancelAtPrice => 2,
            Self::CancelPair => 3,
            Self::CancelEverything => 4,
        }
    }

    /// Whether the action prices an order, so both amounts must be positive and in range.
    pub fn carries_amounts(&self) -> bool {
        matches!(self, Self::Add | Self::CancelAtPrice)
    }
}

/// Offer `amount_for_sale` of one property for `amount_desired` of another.
///
/// Amounts are zero for cancel-pair and cancel-everything.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeTrade {
    pub from: Address,
    pub property_for_sale: PropertyId,
    pub amount_for_sale: Amount,
    pub property_desired: PropertyId,
    pub amount_desired: Amount,
    pub action: TradeAction,
}
