//! The `color~owner~ID` secondary index.
//!
//! Exactly one entry exists per live car, keyed by its current color and
//! owner. ChangeColor and BuyCar move entries with `add_index_entry` /
//! `remove_index_entry` and nothing else writes index keys.

use super::AssetRegistry;
use crate::composite_key::{CompositeKey, KeyError};
use crate::error::RegistryError;
use crate::ledger::StateStore;

/// Name of the composite index over car color, owner and id.
pub const COLOR_OWNER_INDEX: &str = "color~owner~ID";

/// Value stored under every index key. Only the key carries information.
pub const INDEX_SENTINEL: [u8; 1] = [0x00];

/// Encoded index key for a car with the given color and owner.
pub(super) fn index_key(color: &str, owner: &str, car_id: &str) -> Result<String, KeyError> {
    Ok(CompositeKey::new(COLOR_OWNER_INDEX, [color, owner, car_id])?.encode())
}

/// Car id held in the last segment of an index key.
pub(super) fn car_id_of(key: &str) -> Result<String, KeyError> {
    let decoded = CompositeKey::decode(key)?;
    if decoded.index() != COLOR_OWNER_INDEX || decoded.segments().len() != 3 {
        return Err(KeyError::Malformed(key.to_string()));
    }
    let mut segments = decoded.into_segments();
    Ok(segments.swap_remove(2))
}

impl<S: StateStore> AssetRegistry<S> {
    pub(super) fn add_index_entry(&mut self, key: &str) -> Result<(), RegistryError> {
        self.store.put(key, INDEX_SENTINEL.to_vec())?;
        Ok(())
    }

    pub(super) fn remove_index_entry(&mut self, key: &str) -> Result<(), RegistryError> {
        self.store.delete(key)?;
        Ok(())
    }

    /// Car ids listed under the index entries that start with `segments`.
    pub(super) fn scan_index(&self, segments: &[&str]) -> Result<Vec<String>, RegistryError> {
        self.store
            .scan_by_partial_key(COLOR_OWNER_INDEX, segments)?
            .into_iter()
            .map(|(key, _)| car_id_of(&key).map_err(RegistryError::from))
            .collect()
    }
}
