//! Handler: AddNewMalfunction
//!
//! Arguments: car id, description, price as a non-negative decimal string.
//! Returns the outcome, tagged `recorded` or `written_off`.

use serde_json::Value;

use crate::contract::{Context, HandlerError, Mode};

pub const COMMAND: &str = "AddNewMalfunction";
pub const MODE: Mode = Mode::Submit;

pub fn guard(ctx: &Context<'_>) -> bool {
    ctx.has_args(3)
}

pub fn handle(ctx: &mut Context<'_>) -> Result<Value, HandlerError> {
    let car_id = ctx.arg(0)?.to_string();
    let description = ctx.arg(1)?.to_string();
    let price = ctx.amount_arg(2)?;

    let outcome = ctx
        .registry_mut()
        .add_new_malfunction(&car_id, &description, price)?;
    Ok(serde_json::to_value(outcome)?)
}
