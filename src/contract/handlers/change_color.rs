//! Handler: ChangeColor
//!
//! Arguments: car id, new color.

use serde_json::{json, Value};

use crate::contract::{Context, HandlerError, Mode};

pub const COMMAND: &str = "ChangeColor";
pub const MODE: Mode = Mode::Submit;

pub fn guard(ctx: &Context<'_>) -> bool {
    ctx.has_args(2)
}

pub fn handle(ctx: &mut Context<'_>) -> Result<Value, HandlerError> {
    let car_id = ctx.arg(0)?.to_string();
    let color = ctx.arg(1)?.to_string();
    ctx.registry_mut().change_color(&car_id, &color)?;
    Ok(json!(true))
}
