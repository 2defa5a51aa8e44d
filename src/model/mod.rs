//! Models - People, cars and their malfunctions as stored on the ledger.
//!
//! Records serialize to JSON with the field names the ledger has always
//! used (`ID`, `Name`, `Malfunctions`, ...). Money is a `Decimal` written as
//! a string, so repeated repairs and purchases never drift.
//!
//! ## Example
//!
//! ```ignore
//! use car_ledger::{model, Person, Record};
//!
//! let bytes = model::encode(&person)?;
//! let loaded: Person = model::decode(&bytes)?;
//! assert_eq!(loaded.id(), person.id());
//! ```

mod car;
mod person;

use serde::{de::DeserializeOwned, Serialize};

pub use car::{Car, Malfunction};
pub use person::Person;

/// Trait for records stored under their own identifier.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Human readable record kind (e.g. "Person", "Car").
    const KIND: &'static str;

    /// Returns the primary key of this record.
    fn id(&self) -> &str;
}

/// Serialize a record to its stored bytes.
pub fn encode<R: Record>(record: &R) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(record)
}

/// Deserialize stored bytes into a record.
pub fn decode<R: Record>(bytes: &[u8]) -> Result<R, serde_json::Error> {
    serde_json::from_slice(bytes)
}
