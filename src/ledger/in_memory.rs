//! InMemoryLedger - BTreeMap-backed ledger for testing and development.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::{Arc, RwLock};

use super::transaction::{ReadSet, Transaction, WriteSet};
use super::{LedgerError, StateStore};

/// Internal stored representation of a committed value.
#[derive(Debug, Clone)]
pub(crate) struct StoredValue {
    pub(crate) bytes: Vec<u8>,
    /// Sequence number of the commit that last wrote this key.
    pub(crate) version: u64,
}

pub(crate) type State = BTreeMap<String, StoredValue>;

struct Committed {
    state: Arc<State>,
    sequence: u64,
}

/// In-memory ledger backed by an ordered map.
///
/// Committed state sits behind an `Arc`, so `begin()` takes a snapshot
/// without copying. Clone-friendly: clones share the same committed state.
#[derive(Clone)]
pub struct InMemoryLedger {
    committed: Arc<RwLock<Committed>>,
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLedger {
    /// Create a new empty ledger.
    pub fn new() -> Self {
        Self {
            committed: Arc::new(RwLock::new(Committed {
                state: Arc::new(State::new()),
                sequence: 0,
            })),
        }
    }

    /// Open a transaction over the current committed state.
    pub fn begin(&self) -> Result<Transaction, LedgerError> {
        let committed = self
            .committed
            .read()
            .map_err(|_| LedgerError::LockPoisoned("begin"))?;
        Ok(Transaction::new(self.clone(), Arc::clone(&committed.state)))
    }

    /// Number of write sets committed so far.
    pub fn sequence(&self) -> Result<u64, LedgerError> {
        let committed = self
            .committed
            .read()
            .map_err(|_| LedgerError::LockPoisoned("sequence"))?;
        Ok(committed.sequence)
    }

    /// Number of live keys, index entries included.
    pub fn len(&self) -> Result<usize, LedgerError> {
        let committed = self
            .committed
            .read()
            .map_err(|_| LedgerError::LockPoisoned("len"))?;
        Ok(committed.state.len())
    }

    pub fn is_empty(&self) -> Result<bool, LedgerError> {
        Ok(self.len()? == 0)
    }

    /// Validate a transaction's read set and apply its write set atomically.
    pub(crate) fn apply(&self, reads: &ReadSet, writes: WriteSet) -> Result<(), LedgerError> {
        let mut committed = self
            .committed
            .write()
            .map_err(|_| LedgerError::LockPoisoned("commit"))?;

        if let Err(err) = reads.validate(&committed.state) {
            tracing::warn!(error = %err, "rejecting transaction");
            return Err(err);
        }

        if writes.is_empty() {
            return Ok(());
        }

        committed.sequence += 1;
        let version = committed.sequence;
        let write_count = writes.len();
        let state = Arc::make_mut(&mut committed.state);
        for (key, value) in writes {
            match value {
                Some(bytes) => {
                    state.insert(key, StoredValue { bytes, version });
                }
                None => {
                    state.remove(&key);
                }
            }
        }

        tracing::debug!(sequence = version, writes = write_count, "committed write set");
        Ok(())
    }
}

/// Committed entries whose key starts with `prefix`, in key order.
pub(crate) fn scan_state<'a>(
    state: &'a State,
    prefix: &'a str,
) -> impl Iterator<Item = (&'a String, &'a StoredValue)> + 'a {
    state
        .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
        .take_while(move |(key, _)| key.starts_with(prefix))
}

/// Direct access outside a transaction. Every `put`/`delete` commits on its own.
impl StateStore for InMemoryLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        let committed = self
            .committed
            .read()
            .map_err(|_| LedgerError::LockPoisoned("read"))?;
        Ok(committed.state.get(key).map(|stored| stored.bytes.clone()))
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        let mut writes = WriteSet::new();
        writes.insert(key.to_string(), Some(value));
        self.apply(&ReadSet::default(), writes)
    }

    fn delete(&mut self, key: &str) -> Result<(), LedgerError> {
        let mut writes = WriteSet::new();
        writes.insert(key.to_string(), None);
        self.apply(&ReadSet::default(), writes)
    }

    fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, LedgerError> {
        let committed = self
            .committed
            .read()
            .map_err(|_| LedgerError::LockPoisoned("scan"))?;
        Ok(scan_state(&committed.state, prefix)
            .map(|(key, stored)| (key.clone(), stored.bytes.clone()))
            .collect())
    }
}
