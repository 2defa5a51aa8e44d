//! Handler: InitLedger
//!
//! Seeds the configured catalog. Meant to run once per ledger.

use serde_json::{json, Value};

use crate::contract::{Context, HandlerError, Mode};

pub const COMMAND: &str = "InitLedger";
pub const MODE: Mode = Mode::Submit;

pub fn guard(ctx: &Context<'_>) -> bool {
    ctx.has_args(0)
}

pub fn handle(ctx: &mut Context<'_>) -> Result<Value, HandlerError> {
    let catalog = ctx.config().catalog.clone();
    ctx.registry_mut().initialize_ledger(&catalog)?;
    Ok(json!(true))
}
