use car_ledger::contract::{CommandRequest, HandlerError};
use car_ledger::{AssetRegistry, Car, Decimal, Person, RegistryError};
use serde_json::json;

use crate::support::{seeded_service, service};

#[test]
fn registers_every_registry_command() {
    let service = service();
    let mut commands = service.commands();
    commands.sort();
    assert_eq!(
        commands,
        vec![
            "AddNewMalfunction",
            "BuyCar",
            "ChangeColor",
            "GetCar",
            "GetCarsByColor",
            "GetCarsByOwnerAndColor",
            "GetPerson",
            "InitLedger",
            "RepairCar",
        ]
    );
}

#[test]
fn init_ledger_seeds_configured_catalog() {
    let service = service();
    assert_eq!(service.dispatch("InitLedger", &[]).unwrap(), json!(true));
    assert_eq!(service.ledger().len().unwrap(), 15);
    assert_eq!(service.ledger().sequence().unwrap(), 1);
}

#[test]
fn get_car_uses_ledger_field_names() {
    let service = seeded_service();
    let value = service.dispatch("GetCar", &["c3"]).unwrap();

    assert_eq!(value["ID"], json!("c3"));
    assert_eq!(value["Brand"], json!("Toyota"));
    assert_eq!(value["Year"], json!(2018));
    assert_eq!(value["Malfunctions"], json!([]));

    let car: Car = serde_json::from_value(value).unwrap();
    assert_eq!(car.price, Decimal::from(4150));
}

#[test]
fn get_person_returns_record() {
    let service = seeded_service();
    let value = service.dispatch("GetPerson", &["2"]).unwrap();
    let person: Person = serde_json::from_value(value).unwrap();
    assert_eq!(person.surname, "Markovic");
    assert_eq!(person.money, Decimal::from(2850));
}

#[test]
fn listings_return_json_arrays() {
    let service = seeded_service();

    let black = service.dispatch("GetCarsByColor", &["black"]).unwrap();
    let ids: Vec<&str> = black
        .as_array()
        .unwrap()
        .iter()
        .map(|car| car["ID"].as_str().unwrap())
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&"c1") && ids.contains(&"c3"));

    let owned = service
        .dispatch("GetCarsByOwnerAndColor", &["2", "blue"])
        .unwrap();
    assert_eq!(owned.as_array().unwrap().len(), 1);
    assert_eq!(owned[0]["ID"], json!("c6"));

    let none = service.dispatch("GetCarsByColor", &["purple"]).unwrap();
    assert_eq!(none, json!([]));
}

#[test]
fn queries_never_commit() {
    let service = seeded_service();
    let before = service.ledger().sequence().unwrap();

    service.dispatch("GetCar", &["c1"]).unwrap();
    service.dispatch("GetCarsByColor", &["red"]).unwrap();

    assert_eq!(service.ledger().sequence().unwrap(), before);
}

#[test]
fn change_color_commits() {
    let service = seeded_service();
    assert_eq!(
        service.dispatch("ChangeColor", &["c6", "yellow"]).unwrap(),
        json!(true)
    );

    let registry = AssetRegistry::new(service.ledger().clone());
    assert_eq!(registry.get_car("c6").unwrap().color, "yellow");
}

#[test]
fn add_new_malfunction_reports_outcome() {
    let service = seeded_service();

    let recorded = service
        .dispatch("AddNewMalfunction", &["c6", "Zamena gume", "40.50"])
        .unwrap();
    assert_eq!(recorded["status"], json!("recorded"));
    assert_eq!(recorded["car"]["Malfunctions"].as_array().unwrap().len(), 2);

    let written_off = service
        .dispatch("AddNewMalfunction", &["c3", "engine", "5000"])
        .unwrap();
    assert_eq!(written_off["status"], json!("written_off"));
    assert_eq!(written_off["car_id"], json!("c3"));

    let err = service.dispatch("GetCar", &["c3"]).unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[test]
fn repair_and_buy_move_money() {
    let service = seeded_service();

    service.dispatch("RepairCar", &["c2"]).unwrap();
    service.dispatch("BuyCar", &["c4", "1", "Yes"]).unwrap();

    let registry = AssetRegistry::new(service.ledger().clone());
    let buyer = registry.get_person("1").unwrap();
    assert_eq!(buyer.money, "5017.5".parse::<Decimal>().unwrap());
    assert_eq!(registry.get_car("c4").unwrap().owner, "1");
    assert!(registry.get_car("c2").unwrap().malfunctions.is_empty());
}

#[test]
fn unknown_command_is_404() {
    let service = seeded_service();
    let err = service.dispatch("DeleteCar", &["c1"]).unwrap_err();
    assert!(matches!(err, HandlerError::UnknownCommand(ref name) if name == "DeleteCar"));
    assert_eq!(err.status_code(), 404);
}

#[test]
fn wrong_arity_is_rejected_by_guard() {
    let service = seeded_service();
    let before = service.ledger().sequence().unwrap();

    let err = service.dispatch("BuyCar", &["c3", "1"]).unwrap_err();
    assert!(matches!(err, HandlerError::GuardRejected(_)));
    assert_eq!(err.status_code(), 400);

    let err = service.dispatch("InitLedger", &["extra"]).unwrap_err();
    assert!(matches!(err, HandlerError::GuardRejected(_)));

    assert_eq!(service.ledger().sequence().unwrap(), before);
}

#[test]
fn unparseable_arguments_fail_decoding() {
    let service = seeded_service();

    let err = service
        .dispatch("AddNewMalfunction", &["c1", "brakes", "cheap"])
        .unwrap_err();
    assert_eq!(err.kind(), "DecodeFailed");
    assert_eq!(err.status_code(), 400);

    let err = service.dispatch("BuyCar", &["c1", "3", "maybe"]).unwrap_err();
    assert!(matches!(err, HandlerError::DecodeFailed(_)));

    let err = service
        .dispatch("AddNewMalfunction", &["c3", "refund", "-2900"])
        .unwrap_err();
    assert!(matches!(err, HandlerError::DecodeFailed(_)));
}

#[test]
fn oversized_malfunction_price_is_a_bad_request() {
    let service = seeded_service();
    let before = service.ledger().sequence().unwrap();

    let response = service.dispatch_request(&CommandRequest::new(
        "AddNewMalfunction",
        ["c1", "x", "79228162514264337593543950335"],
    ));
    assert_eq!(response.status, 400);
    assert_eq!(response.body["kind"], json!("AmountOverflow"));
    assert_eq!(service.ledger().sequence().unwrap(), before);
}

#[test]
fn business_rejection_discards_writes() {
    let service = seeded_service();
    let before = service.ledger().sequence().unwrap();

    let err = service.dispatch("BuyCar", &["c1", "3", "no"]).unwrap_err();
    assert!(matches!(
        err,
        HandlerError::Registry(RegistryError::BuyerDeclined { .. })
    ));
    assert_eq!(err.status_code(), 422);

    let err = service.dispatch("BuyCar", &["c1", "1", "yes"]).unwrap_err();
    assert_eq!(err.kind(), "AlreadyOwner");

    assert_eq!(service.ledger().sequence().unwrap(), before);
}

#[test]
fn dispatch_request_maps_outcomes_to_status() {
    let service = seeded_service();

    let ok = service.dispatch_request(&CommandRequest::new("GetCar", ["c5"]));
    assert_eq!(ok.status, 200);
    assert_eq!(ok.body["Model"], json!("R8"));

    let missing = service.dispatch_request(&CommandRequest::new("GetPerson", ["9"]));
    assert_eq!(missing.status, 404);
    assert_eq!(missing.body["kind"], json!("NotFound"));
    assert_eq!(
        missing.body["error"],
        json!("Person with id 9 does not exist")
    );

    let broke = service.dispatch_request(&CommandRequest::new("BuyCar", ["c1", "2", "yes"]));
    assert_eq!(broke.status, 422);
    assert_eq!(broke.body["kind"], json!("InsufficientFunds"));

    let reserved = service.dispatch_request(&CommandRequest::new("GetCarsByColor", ["\u{0}"]));
    assert_eq!(reserved.status, 400);
    assert_eq!(reserved.body["kind"], json!("InvalidKey"));
}

#[test]
fn command_request_decodes_from_json() {
    let request: CommandRequest =
        serde_json::from_value(json!({ "command": "InitLedger" })).unwrap();
    assert!(request.args.is_empty());

    let response = service().dispatch_request(&request);
    assert_eq!(response.status, 200);
    assert_eq!(response.body, json!(true));
}
