//! Ledger - Transactional key-value state for the registry.
//!
//! The ledger stores raw bytes under string keys and hands out
//! `Transaction`s. A transaction reads from the snapshot taken when it
//! began, buffers its own writes, and applies them in one step on
//! `commit()`. Commit validates every key and scanned range the transaction
//! read; if another commit changed any of them in the meantime the whole
//! write set is rejected with `LedgerError::Conflict`.
//!
//! ## Example
//!
//! ```ignore
//! use car_ledger::{InMemoryLedger, StateStore};
//!
//! let ledger = InMemoryLedger::new();
//! let mut tx = ledger.begin()?;
//! tx.put("c1", b"{}".to_vec())?;
//! assert!(ledger.get("c1")?.is_none());
//! tx.commit()?;
//! assert!(ledger.get("c1")?.is_some());
//! ```

mod in_memory;
mod store;
mod transaction;

use thiserror::Error;

use crate::composite_key::KeyError;

/// Error type for ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// A lock guarding committed state was poisoned.
    #[error("ledger lock poisoned during {0}")]
    LockPoisoned(&'static str),
    /// A key read by the transaction was changed by another commit.
    #[error("read conflict on key {key:?}: committed by a concurrent transaction")]
    Conflict { key: String },
    /// Key rejected by the composite key codec.
    #[error("invalid key: {0}")]
    InvalidKey(#[from] KeyError),
}

pub use in_memory::InMemoryLedger;
pub use store::StateStore;
pub use transaction::Transaction;
