//! Asset registry - Queries and business operations over people and cars.
//!
//! `AssetRegistry<S>` wraps any `StateStore`. Every mutating operation reads
//! what it needs, validates, encodes every record and index key it is about
//! to write, and only then issues writes. A failed precondition returns
//! before the first `put`/`delete`.
//!
//! Cars are indexed by `color~owner~ID` composite keys holding a one byte
//! sentinel value, so cars can be listed by color or by color and owner.
//!
//! ## Example
//!
//! ```ignore
//! use car_ledger::{AssetRegistry, Catalog, InMemoryLedger};
//!
//! let ledger = InMemoryLedger::new();
//! let mut tx = ledger.begin()?;
//! let mut registry = AssetRegistry::new(&mut tx);
//! registry.initialize_ledger(&Catalog::default())?;
//! registry.change_color("c6", "yellow")?;
//! tx.commit()?;
//! ```

mod commands;
mod index;
mod queries;

use crate::composite_key;
use crate::error::RegistryError;
use crate::ledger::StateStore;
use crate::model::{self, Record};

pub use commands::MalfunctionOutcome;
pub use index::{COLOR_OWNER_INDEX, INDEX_SENTINEL};

/// Business operations over a state store.
pub struct AssetRegistry<S> {
    store: S,
}

impl<S: StateStore> AssetRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the registry, returning the store (e.g. to commit a transaction).
    pub fn into_store(self) -> S {
        self.store
    }

    /// Load a record by primary key, failing with `NotFound` if absent.
    fn load<R: Record>(&self, id: &str) -> Result<R, RegistryError> {
        composite_key::validate_primary_key(id)?;
        let bytes = self
            .store
            .get(id)?
            .ok_or_else(|| RegistryError::not_found::<R>(id))?;
        model::decode(&bytes).map_err(|source| RegistryError::Serialization {
            key: id.to_string(),
            source,
        })
    }
}

/// Serialize a record ahead of writing it.
fn encode<R: Record>(record: &R) -> Result<Vec<u8>, RegistryError> {
    model::encode(record).map_err(|source| RegistryError::Serialization {
        key: record.id().to_string(),
        source,
    })
}
