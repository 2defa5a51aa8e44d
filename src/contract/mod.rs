//! contract - Named-command surface over the asset registry.
//!
//! Clients invoke the registry by command name with positional string
//! arguments, the way a ledger client submits a transaction proposal.
//! Each handler receives a `Context` with the arguments and a registry bound
//! to the invocation's own transaction.
//!
//! ## Quick Start
//!
//! ```ignore
//! use car_ledger::contract::{CommandRequest, Service};
//! use car_ledger::{InMemoryLedger, RegistryConfig};
//!
//! let service = Service::car_registry(InMemoryLedger::new(), RegistryConfig::default());
//! service.dispatch("InitLedger", &[])?;
//! service.dispatch("BuyCar", &["c3", "1", "no"])?;
//!
//! let response = service.dispatch_request(&CommandRequest::new("GetCar", ["c3"]));
//! assert_eq!(response.status, 200);
//! ```
//!
//! ## Handler Convention
//!
//! Each handler module exports:
//!
//! ```ignore
//! pub const COMMAND: &str = "GetCar";
//! pub const MODE: Mode = Mode::Evaluate;
//!
//! pub fn guard(ctx: &Context<'_>) -> bool {
//!     ctx.has_args(1)
//! }
//!
//! pub fn handle(ctx: &mut Context<'_>) -> Result<Value, HandlerError> {
//!     let car = ctx.registry().get_car(ctx.arg(0)?)?;
//!     Ok(serde_json::to_value(car)?)
//! }
//! ```

mod context;
mod error;
pub mod handlers;
mod service;

pub use context::Context;
pub use error::HandlerError;
pub use service::{CommandRequest, CommandResponse, Mode, Service};

/// Register handler modules with a service using the convention pattern.
///
/// Each handler module must export:
/// - `COMMAND: &str`: the command name
/// - `MODE: Mode`: evaluate (read-only) or submit
/// - `guard(ctx) -> bool`: argument validation
/// - `handle(ctx) -> Result<Value, HandlerError>`: the handler
///
/// # Example
/// ```ignore
/// let service = car_ledger::register_handlers!(
///     contract::Service::new(InMemoryLedger::new(), RegistryConfig::default()),
///     handlers::get_car,
///     handlers::change_color,
/// );
/// ```
#[macro_export]
macro_rules! register_handlers {
    ($service:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $service
        $(
            .command_guarded(
                $($seg)::+::COMMAND,
                $($seg)::+::MODE,
                $($seg)::+::guard,
                $($seg)::+::handle,
            )
        )+
    };
}
