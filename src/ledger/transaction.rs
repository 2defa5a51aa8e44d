//! Transaction - A buffered unit of work against an `InMemoryLedger`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::in_memory::{scan_state, State};
use super::{InMemoryLedger, LedgerError, StateStore};

/// Pending writes keyed by key. `None` marks a delete.
pub(crate) type WriteSet = BTreeMap<String, Option<Vec<u8>>>;

/// A prefix scan observed by a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RangeRead {
    prefix: String,
    entries: Vec<(String, u64)>,
}

/// Versions observed by a transaction, checked again at commit.
#[derive(Debug, Default)]
pub(crate) struct ReadSet {
    keys: BTreeMap<String, Option<u64>>,
    ranges: Vec<RangeRead>,
}

impl ReadSet {
    fn record_key(&mut self, key: &str, version: Option<u64>) {
        self.keys.entry(key.to_string()).or_insert(version);
    }

    fn record_range(&mut self, prefix: &str, entries: Vec<(String, u64)>) {
        if self.ranges.iter().any(|range| range.prefix == prefix) {
            return;
        }
        self.ranges.push(RangeRead {
            prefix: prefix.to_string(),
            entries,
        });
    }

    /// Fails with `Conflict` on the first key or range that moved.
    pub(crate) fn validate(&self, state: &State) -> Result<(), LedgerError> {
        for (key, version) in &self.keys {
            let current = state.get(key).map(|stored| stored.version);
            if current != *version {
                return Err(LedgerError::Conflict { key: key.clone() });
            }
        }

        for range in &self.ranges {
            let mut current = scan_state(state, &range.prefix)
                .map(|(key, stored)| (key.as_str(), stored.version));
            let mut observed = range.entries.iter().map(|(key, v)| (key.as_str(), *v));

            loop {
                match (current.next(), observed.next()) {
                    (None, None) => break,
                    (Some(now), Some(then)) if now == then => continue,
                    (Some((key, _)), _) | (None, Some((key, _))) => {
                        return Err(LedgerError::Conflict {
                            key: key.to_string(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

/// A unit of work: snapshot reads, buffered writes, atomic commit.
///
/// Reads see the transaction's own writes first, then the snapshot taken by
/// `InMemoryLedger::begin()`. Nothing reaches the ledger until `commit()`;
/// dropping the transaction discards its writes.
pub struct Transaction {
    ledger: InMemoryLedger,
    snapshot: Arc<State>,
    writes: WriteSet,
    reads: RefCell<ReadSet>,
}

impl Transaction {
    pub(crate) fn new(ledger: InMemoryLedger, snapshot: Arc<State>) -> Self {
        Self {
            ledger,
            snapshot,
            writes: WriteSet::new(),
            reads: RefCell::new(ReadSet::default()),
        }
    }

    /// Number of buffered puts and deletes.
    pub fn write_count(&self) -> usize {
        self.writes.len()
    }

    pub fn is_read_only(&self) -> bool {
        self.writes.is_empty()
    }

    /// Validate the read set and apply every buffered write, or none of them.
    pub fn commit(self) -> Result<(), LedgerError> {
        let reads = self.reads.into_inner();
        self.ledger.apply(&reads, self.writes)
    }

    /// Discard the buffered writes.
    pub fn rollback(self) {
        tracing::trace!(writes = self.writes.len(), "rolled back transaction");
    }
}

impl StateStore for Transaction {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        if let Some(pending) = self.writes.get(key) {
            return Ok(pending.clone());
        }

        let stored = self.snapshot.get(key);
        self.reads
            .borrow_mut()
            .record_key(key, stored.map(|stored| stored.version));
        Ok(stored.map(|stored| stored.bytes.clone()))
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        self.writes.insert(key.to_string(), Some(value));
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), LedgerError> {
        self.writes.insert(key.to_string(), None);
        Ok(())
    }

    fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, LedgerError> {
        let mut merged: BTreeMap<String, Vec<u8>> = BTreeMap::new();
        let mut observed = Vec::new();
        for (key, stored) in scan_state(&self.snapshot, prefix) {
            observed.push((key.clone(), stored.version));
            merged.insert(key.clone(), stored.bytes.clone());
        }
        self.reads.borrow_mut().record_range(prefix, observed);

        for (key, pending) in self.writes.range(prefix.to_string()..) {
            if !key.starts_with(prefix) {
                break;
            }
            match pending {
                Some(bytes) => {
                    merged.insert(key.clone(), bytes.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }

        Ok(merged.into_iter().collect())
    }
}
