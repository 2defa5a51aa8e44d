//! Handler: GetCarsByColor
//!
//! Returns a JSON array in index order; an empty array when nothing matches.

use serde_json::Value;

use crate::contract::{Context, HandlerError, Mode};

pub const COMMAND: &str = "GetCarsByColor";
pub const MODE: Mode = Mode::Evaluate;

pub fn guard(ctx: &Context<'_>) -> bool {
    ctx.has_args(1)
}

pub fn handle(ctx: &mut Context<'_>) -> Result<Value, HandlerError> {
    let cars = ctx.registry().get_cars_by_color(ctx.arg(0)?)?;
    Ok(serde_json::to_value(cars)?)
}
