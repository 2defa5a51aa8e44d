//! Handler: GetCarsByOwnerAndColor
//!
//! Arguments: owner id, color.

use serde_json::Value;

use crate::contract::{Context, HandlerError, Mode};

pub const COMMAND: &str = "GetCarsByOwnerAndColor";
pub const MODE: Mode = Mode::Evaluate;

pub fn guard(ctx: &Context<'_>) -> bool {
    ctx.has_args(2)
}

pub fn handle(ctx: &mut Context<'_>) -> Result<Value, HandlerError> {
    let cars = ctx
        .registry()
        .get_cars_by_owner_and_color(ctx.arg(0)?, ctx.arg(1)?)?;
    Ok(serde_json::to_value(cars)?)
}
