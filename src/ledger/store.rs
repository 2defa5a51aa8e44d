//! StateStore - The key-value contract the registry runs against.

use super::LedgerError;
use crate::composite_key;

/// Abstract key-value state store.
///
/// Keys are strings ordered lexicographically by their UTF-8 bytes.
/// Implementations: `InMemoryLedger` (auto-commit per call) and
/// `Transaction` (buffered write set, committed as one unit).
pub trait StateStore {
    /// Get a value by key. Returns None if absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Put a single key-value pair.
    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;

    /// Delete a key. Deleting an absent key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), LedgerError>;

    /// All entries whose key starts with `prefix`, in key order.
    fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, LedgerError>;

    /// All entries of a composite index whose leading segments equal `segments`.
    fn scan_by_partial_key(
        &self,
        index: &str,
        segments: &[&str],
    ) -> Result<Vec<(String, Vec<u8>)>, LedgerError> {
        let prefix = composite_key::prefix(index, segments)?;
        self.scan_prefix(&prefix)
    }
}

impl<S: StateStore + ?Sized> StateStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        (**self).put(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<(), LedgerError> {
        (**self).delete(key)
    }

    fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, LedgerError> {
        (**self).scan_prefix(prefix)
    }
}
