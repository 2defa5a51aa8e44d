extern crate self as car_ledger;

pub mod composite_key;
pub mod config;
pub mod contract;
mod error;
pub mod ledger;
pub mod model;
mod registry;

pub use config::{Catalog, ConfigError, RegistryConfig};
pub use error::RegistryError;
pub use ledger::{InMemoryLedger, LedgerError, StateStore, Transaction};
pub use model::{Car, Malfunction, Person, Record};
pub use registry::{AssetRegistry, MalfunctionOutcome, COLOR_OWNER_INDEX, INDEX_SENTINEL};

// Re-export the derive so downstream records can implement `Record`.
pub use car_ledger_macros::Record;

// Re-export Decimal, the money type of every record.
pub use rust_decimal::Decimal;
