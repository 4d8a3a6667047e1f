//! Property creation.

use overlay_types::{Address, Amount, Ecosystem, PropertyId, PropertyType};
use serde::{Deserialize, Serialize};

/// Descriptive fields shared by all three issuance commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyInfo {
    pub ecosystem: Ecosystem,
    pub property_type: PropertyType,
    /// Property this issuance replaces; [`PropertyId::NONE`] for a new one.
    pub previous_id: PropertyId,
    pub category: String,
    pub subcategory: String,
    pub name: String,
    pub url: String,
    pub data: String,
}

/// Create a property with a fixed number of tokens credited to the issuer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuanceFixed {
    pub from: Address,
    pub info: PropertyInfo,
    pub amount: Amount,
}

/// Create a property whose tokens are minted by a crowdsale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuanceCrowdsale {
    pub from: Address,
    pub info: PropertyInfo,
    /// Property investors pay with.
    pub property_desired: PropertyId,
    pub tokens_per_unit: Amount,
    /// Unix time after which the crowdsale closes.
    pub deadline: i64,
    /// Early bird bonus, percent per week.
    pub early_bonus: u8,
    /// Share of crowdfunded tokens additionally created for the issuer, percent.
    pub issuer_percentage: u8,
}

/// Create a property whose supply is managed with grants and revokes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuanceManaged {
    pub from: Address,
    pub info: PropertyInfo,
}
