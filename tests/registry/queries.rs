use car_ledger::composite_key;
use car_ledger::{AssetRegistry, Decimal, RegistryError, COLOR_OWNER_INDEX};

use crate::support::{counting_registry, seeded_ledger};

#[test]
fn get_person_returns_seeded_record() {
    let registry = AssetRegistry::new(seeded_ledger());

    let person = registry.get_person("1").unwrap();
    assert_eq!(person.name, "Petar");
    assert_eq!(person.money, Decimal::from(7700));
}

#[test]
fn missing_records_are_not_found() {
    let registry = AssetRegistry::new(seeded_ledger());

    let err = registry.get_car("c42").unwrap_err();
    assert!(matches!(
        err,
        RegistryError::NotFound { kind: "Car", ref id } if id == "c42"
    ));
    assert_eq!(err.to_string(), "Car with id c42 does not exist");

    let err = registry.get_person("42").unwrap_err();
    assert!(matches!(err, RegistryError::NotFound { kind: "Person", .. }));
}

#[test]
fn car_id_is_not_a_person() {
    let registry = AssetRegistry::new(seeded_ledger());
    assert!(matches!(
        registry.get_person("c1"),
        Err(RegistryError::Serialization { .. })
    ));
    assert!(registry.person_exists("2").unwrap());
    assert!(!registry.person_exists("9").unwrap());
}

#[test]
fn index_keys_are_not_primary_keys() {
    let registry = AssetRegistry::new(seeded_ledger());
    let key = composite_key::prefix(COLOR_OWNER_INDEX, &["black", "1", "c1"]).unwrap();
    assert!(matches!(
        registry.get_car(&key),
        Err(RegistryError::InvalidKey(_))
    ));
}

#[test]
fn cars_by_color_returns_exactly_matching_cars() {
    let registry = AssetRegistry::new(seeded_ledger());

    let mut ids: Vec<String> = registry
        .get_cars_by_color("black")
        .unwrap()
        .into_iter()
        .map(|car| car.id)
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["c1".to_string(), "c3".to_string()]);

    let white = registry.get_cars_by_color("white").unwrap();
    assert_eq!(white.len(), 1);
    assert_eq!(white[0].model, "R8");
}

#[test]
fn unknown_color_is_empty_not_error() {
    let registry = AssetRegistry::new(seeded_ledger());
    assert!(registry.get_cars_by_color("purple").unwrap().is_empty());
    // "blu" is a prefix of "blue" but not a whole segment.
    assert!(registry.get_cars_by_color("blu").unwrap().is_empty());
}

#[test]
fn cars_by_owner_and_color_filters_owner() {
    let registry = AssetRegistry::new(seeded_ledger());

    let cars = registry.get_cars_by_owner_and_color("2", "black").unwrap();
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0].id, "c3");

    assert!(registry
        .get_cars_by_owner_and_color("3", "black")
        .unwrap()
        .is_empty());
}

#[test]
fn cars_by_owner_and_color_requires_existing_owner() {
    let registry = AssetRegistry::new(seeded_ledger());
    let err = registry
        .get_cars_by_owner_and_color("99", "black")
        .unwrap_err();
    assert!(matches!(err, RegistryError::NotFound { kind: "Person", .. }));
}

#[test]
fn reserved_character_in_color_is_rejected() {
    let registry = AssetRegistry::new(seeded_ledger());
    assert!(matches!(
        registry.get_cars_by_color("bl\u{0}ack"),
        Err(RegistryError::InvalidKey(_))
    ));
}

#[test]
fn written_off_car_drops_out_of_listings() {
    let ledger = seeded_ledger();
    let mut registry = counting_registry(&ledger);

    registry
        .add_new_malfunction("c3", "engine", Decimal::from(5000))
        .unwrap();

    let black = registry.get_cars_by_color("black").unwrap();
    assert_eq!(black.len(), 1);
    assert_eq!(black[0].id, "c1");
    assert!(registry
        .get_cars_by_owner_and_color("2", "black")
        .unwrap()
        .is_empty());
}
