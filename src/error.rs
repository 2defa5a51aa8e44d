use rust_decimal::Decimal;
use thiserror::Error;

use crate::composite_key::KeyError;
use crate::config::ConfigError;
use crate::ledger::LedgerError;

/// Error type for registry operations.
///
/// Returned before any write is issued, so a failed operation leaves the
/// store as it found it.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("{kind} with id {id} does not exist")]
    NotFound { kind: &'static str, id: String },
    #[error("buyer {buyer} is already the owner of car {car}")]
    AlreadyOwner { car: String, buyer: String },
    #[error("buyer {buyer} declined car {car} with outstanding malfunctions")]
    BuyerDeclined { car: String, buyer: String },
    #[error("person {person} has {available} but {required} is required")]
    InsufficientFunds {
        person: String,
        required: Decimal,
        available: Decimal,
    },
    #[error("malfunction price {price} must not be negative")]
    NegativePrice { price: Decimal },
    #[error("amount overflow while computing {operation} for {id}")]
    AmountOverflow { operation: &'static str, id: String },
    #[error("invalid catalog: {0}")]
    InvalidCatalog(#[source] ConfigError),
    #[error("malformed record {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid index key: {0}")]
    InvalidKey(#[from] KeyError),
    #[error("state store error: {0}")]
    Store(#[source] LedgerError),
}

impl From<LedgerError> for RegistryError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InvalidKey(key) => RegistryError::InvalidKey(key),
            other => RegistryError::Store(other),
        }
    }
}

impl From<ConfigError> for RegistryError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidKey(key) => RegistryError::InvalidKey(key),
            other => RegistryError::InvalidCatalog(other),
        }
    }
}

impl RegistryError {
    pub(crate) fn not_found<R: crate::Record>(id: &str) -> Self {
        RegistryError::NotFound {
            kind: R::KIND,
            id: id.to_string(),
        }
    }

    pub(crate) fn overflow(operation: &'static str, id: &str) -> Self {
        RegistryError::AmountOverflow {
            operation,
            id: id.to_string(),
        }
    }
}
