use std::{collections::BTreeSet, sync::Arc};

use homeclean_domain::{default_addresses, Address};
use tracing::warn;

use crate::{CoreError, KeyValueStore};

/// Storage key for the customer's saved addresses.
pub const ADDRESSES_KEY: &str = "savedAddresses";

/// Saved addresses backed by the shared key-value store.
#[derive(Clone)]
pub struct AddressBook {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl AddressBook {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            key: ADDRESSES_KEY.to_string(),
        }
    }

    /// Saved addresses; a fresh or unreadable profile yields the defaults.
    pub fn list(&self) -> Result<Vec<Address>, CoreError> {
        let Some(raw) = self.store.get_item(&self.key)? else {
            return Ok(default_addresses());
        };
        match serde_json::from_str(&raw) {
            Ok(addresses) => Ok(addresses),
            Err(err) => {
                warn!(key = %self.key, error = %err, "saved addresses unreadable, using defaults");
                Ok(default_addresses())
            }
        }
    }

    pub fn add(&self, label: &str, line: &str) -> Result<Address, CoreError> {
        let label = label.trim();
        let line = line.trim();
        if label.is_empty() {
            return Err(CoreError::Validation("address label is required".into()));
        }
        if line.is_empty() {
            return Err(CoreError::Validation("address line is required".into()));
        }
        let mut addresses = self.list()?;
        let next_id = next_free_id(&addresses)
            .ok_or_else(|| CoreError::Validation("no address ids left".into()))?;
        let address = Address::new(next_id.to_string(), label, line);
        addresses.push(address.clone());
        self.save(&addresses)?;
        Ok(address)
    }

    pub fn remove(&self, id: &str) -> Result<Address, CoreError> {
        let mut addresses = self.list()?;
        let index = addresses
            .iter()
            .position(|address| address.id == id)
            .ok_or_else(|| CoreError::AddressNotFound(id.to_string()))?;
        let removed = addresses.remove(index);
        self.save(&addresses)?;
        Ok(removed)
    }

    fn save(&self, addresses: &[Address]) -> Result<(), CoreError> {
        let json = serde_json::to_string(addresses)?;
        self.store.set_item(&self.key, &json)
    }
}

/// One past the highest numeric id, or the lowest unused id once that would overflow.
fn next_free_id(addresses: &[Address]) -> Option<u32> {
    let taken: BTreeSet<u32> = addresses
        .iter()
        .filter_map(|address| address.id.parse().ok())
        .collect();
    match taken.last() {
        None => Some(1),
        Some(highest) => highest
            .checked_add(1)
            .or_else(|| (1..=u32::MAX).find(|id| !taken.contains(id))),
    }
}
