//! Tests demonstrating the handler file convention outside the crate.
//!
//! A handler module exports `COMMAND`, `MODE`, `guard` and `handle`, and is
//! registered with `register_handlers!`.

use car_ledger::contract::{handlers, HandlerError, Mode, Service};
use car_ledger::{model, InMemoryLedger, Record, RegistryConfig};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::support::init_tracing;

mod count_by_color {
    use car_ledger::contract::{Context, HandlerError, Mode};
    use serde_json::{json, Value};

    pub const COMMAND: &str = "CountCarsByColor";
    pub const MODE: Mode = Mode::Evaluate;

    pub fn guard(ctx: &Context<'_>) -> bool {
        ctx.has_args(1)
    }

    pub fn handle(ctx: &mut Context<'_>) -> Result<Value, HandlerError> {
        let cars = ctx.registry().get_cars_by_color(ctx.arg(0)?)?;
        Ok(json!({ "color": ctx.arg(0)?, "count": cars.len() }))
    }
}

mod repaint_all {
    use car_ledger::contract::{Context, HandlerError, Mode};
    use serde_json::{json, Value};

    pub const COMMAND: &str = "RepaintAll";
    pub const MODE: Mode = Mode::Submit;

    pub fn guard(ctx: &Context<'_>) -> bool {
        ctx.has_args(2)
    }

    // Aborts part way through when a car id is unknown.
    pub fn handle(ctx: &mut Context<'_>) -> Result<Value, HandlerError> {
        let color = ctx.arg(0)?.to_string();
        let ids: Vec<String> = ctx.arg(1)?.split(',').map(str::to_string).collect();
        for id in &ids {
            ctx.registry_mut().change_color(id, &color)?;
        }
        Ok(json!(ids.len()))
    }
}

fn custom_service() -> Service {
    init_tracing();
    car_ledger::register_handlers!(
        Service::new(InMemoryLedger::new(), RegistryConfig::default()),
        handlers::init_ledger,
        count_by_color,
        repaint_all,
    )
}

#[test]
fn custom_handlers_register_and_dispatch() {
    let service = custom_service();

    let mut commands = service.commands();
    commands.sort();
    assert_eq!(commands, vec!["CountCarsByColor", "InitLedger", "RepaintAll"]);

    service.dispatch("InitLedger", &[]).unwrap();
    assert_eq!(
        service.dispatch("CountCarsByColor", &["black"]).unwrap(),
        json!({ "color": "black", "count": 2 })
    );

    assert_eq!(
        service
            .dispatch("RepaintAll", &["green", "c1,c2,c3"])
            .unwrap(),
        json!(3)
    );
    assert_eq!(
        service.dispatch("CountCarsByColor", &["green"]).unwrap()["count"],
        json!(3)
    );
}

#[test]
fn failing_handler_commits_none_of_its_writes() {
    let service = custom_service();
    service.dispatch("InitLedger", &[]).unwrap();
    let before = service.ledger().sequence().unwrap();

    let err = service
        .dispatch("RepaintAll", &["green", "c1,c99"])
        .unwrap_err();
    assert_eq!(err.status_code(), 404);

    assert_eq!(service.ledger().sequence().unwrap(), before);
    assert_eq!(
        service.dispatch("CountCarsByColor", &["black"]).unwrap()["count"],
        json!(2)
    );
}

#[test]
fn closure_commands_share_the_context() {
    let service = Service::new(InMemoryLedger::new(), RegistryConfig::default()).command(
        "Describe",
        Mode::Evaluate,
        |ctx| {
            Ok(json!({
                "command": ctx.command_name(),
                "args": ctx.args(),
                "people": ctx.config().catalog.persons.len(),
            }))
        },
    );

    let value = service.dispatch("Describe", &["a", "b"]).unwrap();
    assert_eq!(
        value,
        json!({ "command": "Describe", "args": ["a", "b"], "people": 3 })
    );

    let err = service.dispatch("Missing", &[]).unwrap_err();
    assert!(matches!(err, HandlerError::UnknownCommand(_)));
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(kind = "Garage")]
struct Garage {
    #[record(id)]
    code: String,
    capacity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
struct Mechanic {
    id: String,
    name: String,
}

#[test]
fn derived_records_expose_kind_and_id() {
    let garage = Garage {
        code: "g1".into(),
        capacity: 4,
    };
    assert_eq!(Garage::KIND, "Garage");
    assert_eq!(garage.id(), "g1");

    let bytes = model::encode(&garage).unwrap();
    let loaded: Garage = model::decode(&bytes).unwrap();
    assert_eq!(loaded, garage);

    let mechanic = Mechanic {
        id: "m1".into(),
        name: "Jovan".into(),
    };
    assert_eq!(Mechanic::KIND, "Mechanic");
    assert_eq!(mechanic.id(), "m1");
}
