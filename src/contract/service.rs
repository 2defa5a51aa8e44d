//! Service - command handler registry and dispatch.
//!
//! `Service` holds the ledger, the registry configuration and a set of named
//! command handlers. Every dispatch runs in its own ledger transaction:
//! submitted commands commit when the handler succeeds, evaluated commands
//! never commit, and a failed handler's writes are always discarded.
//!
//! ## Example
//!
//! ```ignore
//! use car_ledger::contract::Service;
//! use car_ledger::{InMemoryLedger, RegistryConfig};
//!
//! let service = Service::car_registry(InMemoryLedger::new(), RegistryConfig::default());
//! service.dispatch("InitLedger", &[])?;
//! let car = service.dispatch("GetCar", &["c1"])?;
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::context::Context;
use super::error::HandlerError;
use crate::config::RegistryConfig;
use crate::ledger::InMemoryLedger;

/// Whether a command's writes are committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Read-only: run against a snapshot, never commit.
    Evaluate,
    /// Commit the write set when the handler succeeds.
    Submit,
}

type Guard = Box<dyn Fn(&Context<'_>) -> bool + Send + Sync>;
type Handle = Box<dyn Fn(&mut Context<'_>) -> Result<Value, HandlerError> + Send + Sync>;

/// A registered command handler with optional guard.
struct CommandHandler {
    mode: Mode,
    guard: Option<Guard>,
    handle: Handle,
}

/// A named command with string arguments, as sent by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRequest {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandRequest {
    pub fn new<I, S>(command: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Outcome of a dispatched request with an HTTP-style status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandResponse {
    pub status: u16,
    pub body: Value,
}

/// Routes named commands to handler functions against one ledger.
pub struct Service {
    ledger: InMemoryLedger,
    config: RegistryConfig,
    handlers: HashMap<String, CommandHandler>,
}

impl Service {
    /// Create a service with no commands registered.
    pub fn new(ledger: InMemoryLedger, config: RegistryConfig) -> Self {
        Self {
            ledger,
            config,
            handlers: HashMap::new(),
        }
    }

    /// Create a service with every registry command registered.
    pub fn car_registry(ledger: InMemoryLedger, config: RegistryConfig) -> Self {
        use super::handlers;

        crate::register_handlers!(
            Self::new(ledger, config),
            handlers::init_ledger,
            handlers::get_person,
            handlers::get_car,
            handlers::get_cars_by_color,
            handlers::get_cars_by_owner_and_color,
            handlers::change_color,
            handlers::add_new_malfunction,
            handlers::repair_car,
            handlers::buy_car,
        )
    }

    /// Register a command handler.
    ///
    /// Builder style, returns `self` for chaining.
    pub fn command<F>(mut self, name: &str, mode: Mode, handler: F) -> Self
    where
        F: Fn(&mut Context<'_>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(
            name.to_string(),
            CommandHandler {
                mode,
                guard: None,
                handle: Box::new(handler),
            },
        );
        self
    }

    /// Register a command handler with a guard function.
    ///
    /// The guard is called before the handler. If it returns `false`,
    /// the command is rejected with `HandlerError::GuardRejected`.
    pub fn command_guarded<G, F>(mut self, name: &str, mode: Mode, guard: G, handler: F) -> Self
    where
        G: Fn(&Context<'_>) -> bool + Send + Sync + 'static,
        F: Fn(&mut Context<'_>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(
            name.to_string(),
            CommandHandler {
                mode,
                guard: Some(Box::new(guard)),
                handle: Box::new(handler),
            },
        );
        self
    }

    /// Dispatch a command by name.
    ///
    /// Opens a transaction, runs the guard (if any) and the handler, then
    /// commits for `Mode::Submit` commands that succeeded.
    pub fn dispatch(&self, command: &str, args: &[&str]) -> Result<Value, HandlerError> {
        let handler = self
            .handlers
            .get(command)
            .ok_or_else(|| HandlerError::UnknownCommand(command.to_string()))?;

        tracing::debug!(command, ?args, "dispatching command");

        let transaction = self.ledger.begin()?;
        let args = args.iter().map(|arg| arg.to_string()).collect();
        let mut ctx = Context::new(command, args, transaction, &self.config);

        if let Some(guard) = &handler.guard {
            if !guard(&ctx) {
                tracing::warn!(command, "guard rejected command");
                return Err(HandlerError::GuardRejected(command.to_string()));
            }
        }

        let result = match (handler.handle)(&mut ctx) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(command, error = %err, "command failed, discarding writes");
                return Err(err);
            }
        };

        let transaction = ctx.into_transaction();
        match handler.mode {
            Mode::Submit => {
                let writes = transaction.write_count();
                transaction.commit().map_err(|err| {
                    tracing::warn!(command, error = %err, "commit rejected");
                    HandlerError::from(err)
                })?;
                tracing::debug!(command, writes, "command committed");
            }
            Mode::Evaluate => transaction.rollback(),
        }

        Ok(result)
    }

    /// Dispatch a `CommandRequest`, returning a `CommandResponse`.
    pub fn dispatch_request(&self, request: &CommandRequest) -> CommandResponse {
        let args: Vec<&str> = request.args.iter().map(String::as_str).collect();
        match self.dispatch(&request.command, &args) {
            Ok(value) => CommandResponse {
                status: 200,
                body: value,
            },
            Err(e) => CommandResponse {
                status: e.status_code(),
                body: serde_json::json!({ "error": e.to_string(), "kind": e.kind() }),
            },
        }
    }

    /// List registered command names.
    pub fn commands(&self) -> Vec<&str> {
        self.handlers.keys().map(|s| s.as_str()).collect()
    }

    /// Get a reference to the ledger.
    pub fn ledger(&self) -> &InMemoryLedger {
        &self.ledger
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }
}
