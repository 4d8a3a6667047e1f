//! Property metadata lookup.

use crate::StoreError;
use overlay_types::{Address, Ecosystem, PropertyId};
use serde::{Deserialize, Serialize};

/// Read-only view of a property's metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub id: PropertyId,
    pub divisible: bool,
    /// Current administrator of the property.
    pub issuer: Address,
    pub ecosystem: Ecosystem,
    /// Whether a crowdsale for this property is currently accepting funds.
    pub crowdsale_active: bool,
}

/// Trait for property metadata lookups.
pub trait PropertyStore {
    /// Metadata for `id`, or `None` if no such property exists.
    fn get_property(&self, id: PropertyId) -> Result<Option<PropertyDescriptor>, StoreError>;

    /// Whether `id` currently has an active crowdsale. Unknown properties have none.
    fn is_crowdsale_active(&self, id: PropertyId) -> Result<bool, StoreError> {
        Ok(self
            .get_property(id)?
            .map(|p| p.crowdsale_active)
            .unwrap_or(false))
    }
}
