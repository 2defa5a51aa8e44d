//! Handler: BuyCar
//!
//! Arguments: car id, buyer id, whether the buyer accepts outstanding
//! malfunctions (`yes`/`no`).

use serde_json::{json, Value};

use crate::contract::{Context, HandlerError, Mode};

pub const COMMAND: &str = "BuyCar";
pub const MODE: Mode = Mode::Submit;

pub fn guard(ctx: &Context<'_>) -> bool {
    ctx.has_args(3)
}

pub fn handle(ctx: &mut Context<'_>) -> Result<Value, HandlerError> {
    let car_id = ctx.arg(0)?.to_string();
    let buyer_id = ctx.arg(1)?.to_string();
    let accept_malfunctions = ctx.answer_arg(2)?;

    ctx.registry_mut()
        .buy_car(&car_id, &buyer_id, accept_malfunctions)?;
    Ok(json!(true))
}
