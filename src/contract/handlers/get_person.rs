//! Handler: GetPerson

use serde_json::Value;

use crate::contract::{Context, HandlerError, Mode};

pub const COMMAND: &str = "GetPerson";
pub const MODE: Mode = Mode::Evaluate;

pub fn guard(ctx: &Context<'_>) -> bool {
    ctx.has_args(1)
}

pub fn handle(ctx: &mut Context<'_>) -> Result<Value, HandlerError> {
    let person = ctx.registry().get_person(ctx.arg(0)?)?;
    Ok(serde_json::to_value(person)?)
}
