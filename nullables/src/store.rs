//! Nullable consensus state: thread-safe in-memory snapshot for testing.

use overlay_store::{
    BalanceStore, OfferStore, OfferTerms, PropertyDescriptor, PropertyStore, StoreError,
};
use overlay_types::{Address, Amount, PropertyId};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory properties, balances and offers.
/// Thread-safe for use with tokio's multi-threaded runtime.
pub struct NullState {
    properties: Mutex<HashMap<PropertyId, PropertyDescriptor>>,
    balances: Mutex<HashMap<(Address, PropertyId), Amount>>,
    offers: Mutex<HashMap<(Address, PropertyId), OfferTerms>>,
    /// When set, every read fails with this error.
    failure: Mutex<Option<StoreError>>,
}

impl NullState {
    pub fn new() -> Self {
        Self {
            properties: Mutex::new(HashMap::new()),
            balances: Mutex::new(HashMap::new()),
            offers: Mutex::new(HashMap::new()),
            failure: Mutex::new(None),
        }
    }

    pub fn add_property(&self, descriptor: PropertyDescriptor) {
        self.properties
            .lock()
            .unwrap()
            .insert(descriptor.id, descriptor);
    }

    /// Register a property with an ecosystem derived from its id.
    pub fn define_property(
        &self,
        id: PropertyId,
        divisible: bool,
        issuer: Address,
    ) -> PropertyDescriptor {
        let descriptor = PropertyDescriptor {
            id,
            divisible,
            issuer,
            ecosystem: id.ecosystem(),
            crowdsale_active: false,
        };
        self.add_property(descriptor.clone());
        descriptor
    }

    pub fn set_crowdsale_active(&self, id: PropertyId, active: bool) {
        if let Some(descriptor) = self.properties.lock().unwrap().get_mut(&id) {
            descriptor.crowdsale_active = active;
        }
    }

    pub fn set_issuer(&self, id: PropertyId, issuer: Address) {
        if let Some(descriptor) = self.properties.lock().unwrap().get_mut(&id) {
            descriptor.issuer = issuer;
        }
    }

    pub fn set_balance(&self, address: &Address, property: PropertyId, amount: Amount) {
        self.balances
            .lock()
            .unwrap()
            .insert((address.clone(), property), amount);
    }

    pub fn put_offer(&self, seller: &Address, property: PropertyId, terms: OfferTerms) {
        self.offers
            .lock()
            .unwrap()
            .insert((seller.clone(), property), terms);
    }

    pub fn remove_offer(&self, seller: &Address, property: PropertyId) {
        self.offers
            .lock()
            .unwrap()
            .remove(&(seller.clone(), property));
    }

    /// Make every subsequent read fail with `error`, or succeed again with `None`.
    pub fn fail_reads(&self, error: Option<StoreError>) {
        *self.failure.lock().unwrap() = error;
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        match self.failure.lock().unwrap().clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for NullState {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyStore for NullState {
    fn get_property(&self, id: PropertyId) -> Result<Option<PropertyDescriptor>, StoreError> {
        self.check_failure()?;
        Ok(self.properties.lock().unwrap().get(&id).cloned())
    }
}

impl BalanceStore for NullState {
    fn confirmed_balance(
        &self,
        address: &Address,
        property: PropertyId,
    ) -> Result<Amount, StoreError> {
        self.check_failure()?;
        Ok(self
            .balances
            .lock()
            .unwrap()
            .get(&(address.clone(), property))
            .copied()
            .unwrap_or(Amount::ZERO))
    }
}

impl OfferStore for NullState {
    fn get_offer(
        &self,
        seller: &Address,
        property: PropertyId,
    ) -> Result<Option<OfferTerms>, StoreError> {
        self.check_failure()?;
        Ok(self
            .offers
            .lock()
            .unwrap()
            .get(&(seller.clone(), property))
            .copied())
    }
}
