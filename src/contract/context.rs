//! Context passed to command handlers.
//!
//! Carries the string arguments of the invocation, the registry bound to
//! the invocation's transaction, and the registry configuration.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::error::HandlerError;
use crate::config::RegistryConfig;
use crate::ledger::Transaction;
use crate::registry::AssetRegistry;

/// The context passed to every command handler.
///
/// ## Example
///
/// ```ignore
/// pub fn handle(ctx: &mut Context<'_>) -> Result<Value, HandlerError> {
///     let car_id = ctx.arg(0)?.to_string();
///     let car = ctx.registry().get_car(&car_id)?;
///     Ok(serde_json::to_value(car)?)
/// }
/// ```
pub struct Context<'a> {
    /// The command name being handled.
    command_name: &'a str,
    /// Positional string arguments.
    args: Vec<String>,
    /// Registry over this invocation's transaction.
    registry: AssetRegistry<Transaction>,
    config: &'a RegistryConfig,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        command_name: &'a str,
        args: Vec<String>,
        transaction: Transaction,
        config: &'a RegistryConfig,
    ) -> Self {
        Self {
            command_name,
            args,
            registry: AssetRegistry::new(transaction),
            config,
        }
    }

    /// Get the command name.
    pub fn command_name(&self) -> &str {
        self.command_name
    }

    /// All positional arguments.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Check that exactly `count` arguments were passed.
    pub fn has_args(&self, count: usize) -> bool {
        self.args.len() == count
    }

    /// Positional argument `index`. Returns `DecodeFailed` if missing.
    pub fn arg(&self, index: usize) -> Result<&str, HandlerError> {
        self.args.get(index).map(String::as_str).ok_or_else(|| {
            HandlerError::DecodeFailed(format!(
                "{}: missing argument {}",
                self.command_name, index
            ))
        })
    }

    /// Positional argument parsed as a decimal amount (e.g. `"23.5"`).
    pub fn decimal_arg(&self, index: usize) -> Result<Decimal, HandlerError> {
        let raw = self.arg(index)?;
        Decimal::from_str(raw.trim()).map_err(|e| {
            HandlerError::DecodeFailed(format!(
                "{}: argument {} is not a decimal ({:?}): {}",
                self.command_name, index, raw, e
            ))
        })
    }

    /// Positional argument parsed as a non-negative decimal amount.
    pub fn amount_arg(&self, index: usize) -> Result<Decimal, HandlerError> {
        let amount = self.decimal_arg(index)?;
        if amount < Decimal::ZERO {
            return Err(HandlerError::DecodeFailed(format!(
                "{}: argument {} must not be negative, got {}",
                self.command_name, index, amount
            )));
        }
        Ok(amount)
    }

    /// Positional yes/no argument. Accepts `yes`/`no` and `true`/`false`.
    pub fn answer_arg(&self, index: usize) -> Result<bool, HandlerError> {
        let raw = self.arg(index)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" => Ok(true),
            "no" | "false" => Ok(false),
            _ => Err(HandlerError::DecodeFailed(format!(
                "{}: argument {} must be yes or no, got {:?}",
                self.command_name, index, raw
            ))),
        }
    }

    pub fn registry(&self) -> &AssetRegistry<Transaction> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut AssetRegistry<Transaction> {
        &mut self.registry
    }

    pub fn config(&self) -> &RegistryConfig {
        self.config
    }

    /// Hand back the transaction so the service can commit or drop it.
    pub(crate) fn into_transaction(self) -> Transaction {
        self.registry.into_store()
    }
}
