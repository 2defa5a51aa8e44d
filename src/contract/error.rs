//! Error types for contract command handlers.

use thiserror::Error;

use crate::error::RegistryError;
use crate::ledger::LedgerError;

/// Error type for command handler operations.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// No handler registered for this command name.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    /// Argument missing or not parseable (price, answer).
    #[error("decode failed: {0}")]
    DecodeFailed(String),
    /// Guard rejected the command (wrong number of arguments).
    #[error("guard rejected command: {0}")]
    GuardRejected(String),
    /// The registry refused or failed the operation.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// Committing the invocation's write set failed.
    #[error("commit failed: {0}")]
    Ledger(#[from] LedgerError),
    /// Result could not be serialized.
    #[error("encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

impl HandlerError {
    /// Stable name of the error kind, for callers that render errors.
    pub fn kind(&self) -> &'static str {
        match self {
            HandlerError::UnknownCommand(_) => "UnknownCommand",
            HandlerError::DecodeFailed(_) => "DecodeFailed",
            HandlerError::GuardRejected(_) => "GuardRejected",
            HandlerError::Registry(err) => match err {
                RegistryError::NotFound { .. } => "NotFound",
                RegistryError::AlreadyOwner { .. } => "AlreadyOwner",
                RegistryError::BuyerDeclined { .. } => "BuyerDeclined",
                RegistryError::InsufficientFunds { .. } => "InsufficientFunds",
                RegistryError::NegativePrice { .. } => "NegativePrice",
                RegistryError::AmountOverflow { .. } => "AmountOverflow",
                RegistryError::InvalidCatalog(_) => "InvalidCatalog",
                RegistryError::Serialization { .. } => "SerializationFailure",
                RegistryError::InvalidKey(_) => "InvalidKey",
                RegistryError::Store(_) => "StoreFailure",
            },
            HandlerError::Ledger(LedgerError::Conflict { .. }) => "Conflict",
            HandlerError::Ledger(_) => "StoreFailure",
            HandlerError::Encode(_) => "SerializationFailure",
        }
    }

    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::UnknownCommand(_) => 404,
            HandlerError::DecodeFailed(_) => 400,
            HandlerError::GuardRejected(_) => 400,
            HandlerError::Registry(err) => match err {
                RegistryError::NotFound { .. } => 404,
                RegistryError::AlreadyOwner { .. }
                | RegistryError::BuyerDeclined { .. }
                | RegistryError::InsufficientFunds { .. } => 422,
                RegistryError::InvalidKey(_)
                | RegistryError::NegativePrice { .. }
                | RegistryError::AmountOverflow { .. }
                | RegistryError::InvalidCatalog(_) => 400,
                RegistryError::Store(LedgerError::Conflict { .. }) => 409,
                RegistryError::Serialization { .. } | RegistryError::Store(_) => 500,
            },
            HandlerError::Ledger(LedgerError::Conflict { .. }) => 409,
            HandlerError::Ledger(LedgerError::InvalidKey(_)) => 400,
            HandlerError::Ledger(_) => 500,
            HandlerError::Encode(_) => 500,
        }
    }
}
