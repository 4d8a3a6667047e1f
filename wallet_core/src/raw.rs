//! Untyped command parameters, as they arrive from the command surface.
//!
//! Addresses and amounts are kept as strings and enumerated fields as plain
//! integers; the [`Normalizer`](crate::Normalizer) turns them into a
//! [`TransactionRequest`](overlay_transactions::TransactionRequest).

use serde::{Deserialize, Serialize};

/// Descriptive fields shared by the three issuance commands.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPropertyInfo {
    pub ecosystem: i64,
    pub property_type: i64,
    pub previous_id: i64,
    pub category: String,
    pub subcategory: String,
    pub name: String,
    pub url: String,
    pub data: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawCommand {
    SimpleSend {
        from: String,
        to: String,
        property: u32,
        amount: String,
        redeem: Option<String>,
        reference_amount: Option<String>,
    },
    ExchangeOffer {
        from: String,
        property: u32,
        amount_for_sale: String,
        amount_desired: String,
        payment_window: i64,
        min_accept_fee: String,
        action: i64,
    },
    ExchangeAccept {
        from: String,
        to: String,
        property: u32,
        amount: String,
        allow_unsafe: bool,
    },
    IssuanceCrowdsale {
        from: String,
        info: RawPropertyInfo,
        property_desired: u32,
        tokens_per_unit: String,
        deadline: i64,
        early_bonus: i64,
        issuer_percentage: i64,
    },
    IssuanceFixed {
        from: String,
        info: RawPropertyInfo,
        amount: String,
    },
    IssuanceManaged {
        from: String,
        info: RawPropertyInfo,
    },
    SendToOwners {
        from: String,
        property: u32,
        amount: String,
        redeem: Option<String>,
    },
    Grant {
        from: String,
        /// Empty or absent means the sender grants to itself.
        to: Option<String>,
        property: u32,
        amount: String,
        memo: Option<String>,
    },
    Revoke {
        from: String,
        property: u32,
        amount: String,
        memo: Option<String>,
    },
    CloseCrowdsale {
        from: String,
        property: u32,
    },
    ExchangeTrade {
        from: String,
        property_for_sale: u32,
        amount_for_sale: String,
        property_desired: u32,
        amount_desired: String,
        action: i64,
    },
    ChangeIssuer {
        from: String,
        to: String,
        property: u32,
    },
}

impl RawCommand {
    /// The raw sender address, before validation.
    pub fn from(&self) -> &str {
        match self {
            Self::SimpleSend { from, .. }
            | Self::ExchangeOffer { from, .. }
            | Self::ExchangeAccept { from, .. }
            | Self::IssuanceCrowdsale { from, .. }
            | Self::IssuanceFixed { from, .. }
            | Self::IssuanceManaged { from, .. }
            | Self::SendToOwners { from, .. }
            | Self::Grant { from, .. }
            | Self::Revoke { from, .. }
            | Self::CloseCrowdsale { from, .. }
            | Self::ExchangeTrade { from, .. }
            | Self::ChangeIssuer { from, .. } => from,
        }
    }
}
