//! Handler: RepairCar

use serde_json::{json, Value};

use crate::contract::{Context, HandlerError, Mode};

pub const COMMAND: &str = "RepairCar";
pub const MODE: Mode = Mode::Submit;

pub fn guard(ctx: &Context<'_>) -> bool {
    ctx.has_args(1)
}

pub fn handle(ctx: &mut Context<'_>) -> Result<Value, HandlerError> {
    let car_id = ctx.arg(0)?.to_string();
    ctx.registry_mut().repair_car(&car_id)?;
    Ok(json!(true))
}
