//! Registry configuration - the seed catalog written by `InitLedger`.
//!
//! The default catalog holds three people and six cars. An alternate
//! catalog can be loaded from JSON using the same record layout the ledger
//! stores:
//!
//! ```ignore
//! let config = RegistryConfig::from_json(r#"{
//!     "catalog": {
//!         "persons": [{ "ID": "1", "Name": "Ana", "Surname": "Anic", "Email": "ana@mail.com", "Money": "100" }],
//!         "cars": []
//!     }
//! }"#)?;
//! ```

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::composite_key::{self, CompositeKey, KeyError};
use crate::model::{Car, Malfunction, Person};
use crate::registry::COLOR_OWNER_INDEX;

/// Error type for configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse registry config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate record id {0:?} in catalog")]
    DuplicateId(String),
    #[error("car {car:?} is owned by unknown person {owner:?}")]
    UnknownOwner { car: String, owner: String },
    #[error("car {car:?} lists a malfunction with negative price {price}")]
    NegativePrice { car: String, price: Decimal },
    #[error("catalog record cannot be indexed: {0}")]
    InvalidKey(#[from] KeyError),
}

/// People and cars seeded into an empty ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub cars: Vec<Car>,
}

impl Catalog {
    /// Ids are unique across people and cars (they share one key space),
    /// every car owner is a catalog person, malfunction prices are not
    /// negative, and every car can be indexed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut ids = HashSet::new();
        for id in self
            .persons
            .iter()
            .map(|p| p.id.as_str())
            .chain(self.cars.iter().map(|c| c.id.as_str()))
        {
            composite_key::validate_primary_key(id)?;
            if !ids.insert(id) {
                return Err(ConfigError::DuplicateId(id.to_string()));
            }
        }

        for car in &self.cars {
            if !self.persons.iter().any(|p| p.id == car.owner) {
                return Err(ConfigError::UnknownOwner {
                    car: car.id.clone(),
                    owner: car.owner.clone(),
                });
            }
            if let Some(bad) = car.malfunctions.iter().find(|m| m.price < Decimal::ZERO) {
                return Err(ConfigError::NegativePrice {
                    car: car.id.clone(),
                    price: bad.price,
                });
            }
            CompositeKey::new(COLOR_OWNER_INDEX, [&car.color, &car.owner, &car.id])?;
        }

        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let persons = vec![
            Person::new("1", "Petar", "Petrovic", "petar@gmail.com", Decimal::from(7700)),
            Person::new("2", "Marko", "Markovic", "marko@gmail.com", Decimal::from(2850)),
            Person::new("3", "Stefan", "Stefanovic", "stefan@gmail.com", Decimal::from(5100)),
        ];

        let cars = vec![
            seed_car(
                ("c1", "Jeep", "Renegade", 2015, "black", "1", 5200),
                vec![
                    Malfunction::new("Popravak motora", Decimal::new(323, 1)),
                    Malfunction::new("Popravak brave na vratima", Decimal::new(125, 1)),
                ],
            ),
            seed_car(
                ("c2", "Dacia", "Duster", 2019, "gray", "1", 3900),
                vec![Malfunction::new("Curenje ulja", Decimal::new(235, 1))],
            ),
            seed_car(("c3", "Toyota", "RAV4", 2018, "black", "2", 4150), vec![]),
            seed_car(
                ("c4", "Audi", "A6", 2010, "red", "3", 2700),
                vec![
                    Malfunction::new("Popravak motora", Decimal::from(28)),
                    Malfunction::new("Zamena retrovizora", Decimal::from(8)),
                    Malfunction::new("Zamena stop svetla", Decimal::from(5)),
                ],
            ),
            seed_car(
                ("c5", "Audi", "R8", 2015, "white", "2", 4300),
                vec![Malfunction::new("Popravak klime", Decimal::from(20))],
            ),
            seed_car(
                ("c6", "BMW", "IX3", 2020, "blue", "2", 5000),
                vec![Malfunction::new("Popravak kocnice", Decimal::new(247, 1))],
            ),
        ];

        Self { persons, cars }
    }
}

fn seed_car(
    (id, brand, model, year, color, owner, price): (&str, &str, &str, u16, &str, &str, i64),
    malfunctions: Vec<Malfunction>,
) -> Car {
    Car {
        id: id.to_string(),
        brand: brand.to_string(),
        model: model.to_string(),
        year,
        color: color.to_string(),
        owner: owner.to_string(),
        malfunctions,
        price: Decimal::from(price),
    }
}

/// Configuration for an `AssetRegistry`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub catalog: Catalog,
}

impl RegistryConfig {
    /// Parse and validate a JSON config. Missing sections fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.catalog.validate()?;
        Ok(config)
    }
}
