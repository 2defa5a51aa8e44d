use rust_decimal::Decimal;
use serde::Serialize;

use super::index::index_key;
use super::{encode, AssetRegistry};
use crate::config::Catalog;
use crate::error::RegistryError;
use crate::ledger::StateStore;
use crate::model::{Car, Malfunction};

/// Result of reporting a malfunction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MalfunctionOutcome {
    /// The malfunction was appended and the car rewritten.
    Recorded { car: Car },
    /// Repairs now cost more than the car; the car record was deleted.
    WrittenOff {
        car_id: String,
        repair_cost: Decimal,
        price: Decimal,
    },
}

impl<S: StateStore> AssetRegistry<S> {
    /// Seed every catalog person and car, plus one index entry per car.
    ///
    /// The catalog is validated first; an invalid catalog writes nothing.
    /// Re-running overwrites records but does not remove index entries left
    /// by a different catalog.
    pub fn initialize_ledger(&mut self, catalog: &Catalog) -> Result<(), RegistryError> {
        catalog.validate()?;

        let mut records = Vec::with_capacity(catalog.persons.len() + catalog.cars.len());
        for person in &catalog.persons {
            records.push((person.id.as_str(), encode(person)?));
        }

        let mut index_keys = Vec::with_capacity(catalog.cars.len());
        for car in &catalog.cars {
            records.push((car.id.as_str(), encode(car)?));
            index_keys.push(index_key(&car.color, &car.owner, &car.id)?);
        }

        for (id, bytes) in records {
            self.store.put(id, bytes)?;
        }
        for key in &index_keys {
            self.add_index_entry(key)?;
        }

        Ok(())
    }

    /// Repaint a car and move its index entry to the new color.
    pub fn change_color(&mut self, car_id: &str, color: &str) -> Result<Car, RegistryError> {
        let mut car = self.get_car(car_id)?;
        let previous_key = index_key(&car.color, &car.owner, &car.id)?;
        let next_key = index_key(color, &car.owner, &car.id)?;

        car.color = color.to_string();
        let bytes = encode(&car)?;

        self.store.put(&car.id, bytes)?;
        self.add_index_entry(&next_key)?;
        if previous_key != next_key {
            self.remove_index_entry(&previous_key)?;
        }

        Ok(car)
    }

    /// Append a malfunction. A car whose repairs now cost more than its
    /// price is written off and deleted. The index is left untouched.
    ///
    /// Negative prices are rejected with `NegativePrice`.
    pub fn add_new_malfunction(
        &mut self,
        car_id: &str,
        description: &str,
        price: Decimal,
    ) -> Result<MalfunctionOutcome, RegistryError> {
        if price < Decimal::ZERO {
            return Err(RegistryError::NegativePrice { price });
        }

        let mut car = self.get_car(car_id)?;
        car.malfunctions.push(Malfunction::new(description, price));
        let repair_cost = car
            .repair_cost()
            .ok_or_else(|| RegistryError::overflow("repair cost", &car.id))?;

        if repair_cost > car.price {
            self.store.delete(&car.id)?;
            return Ok(MalfunctionOutcome::WrittenOff {
                repair_cost,
                price: car.price,
                car_id: car.id,
            });
        }

        let bytes = encode(&car)?;
        self.store.put(&car.id, bytes)?;
        Ok(MalfunctionOutcome::Recorded { car })
    }

    /// Owner pays for every outstanding malfunction at once. Returns the
    /// amount paid.
    ///
    /// Fails with `InsufficientFunds` if the owner's balance falls short of
    /// the running total at any malfunction; nothing is paid in that case.
    /// Prices are never negative, so this is the same as checking the full sum.
    pub fn repair_car(&mut self, car_id: &str) -> Result<Decimal, RegistryError> {
        let mut car = self.get_car(car_id)?;
        let mut owner = self.get_person(&car.owner)?;
        let repair_cost = car
            .repair_cost()
            .ok_or_else(|| RegistryError::overflow("repair cost", &car.id))?;

        let mut total = Decimal::ZERO;
        for malfunction in &car.malfunctions {
            total = total
                .checked_add(malfunction.price)
                .ok_or_else(|| RegistryError::overflow("repair cost", &car.id))?;
            if !owner.can_afford(total) {
                return Err(RegistryError::InsufficientFunds {
                    person: owner.id,
                    required: repair_cost,
                    available: owner.money,
                });
            }
        }

        car.malfunctions.clear();
        owner.money = owner
            .money
            .checked_sub(total)
            .ok_or_else(|| RegistryError::overflow("balance", &owner.id))?;
        let car_bytes = encode(&car)?;
        let owner_bytes = encode(&owner)?;

        self.store.put(&car.id, car_bytes)?;
        self.store.put(&owner.id, owner_bytes)?;

        Ok(total)
    }

    /// Transfer a car to `buyer_id`. Returns the price paid.
    ///
    /// A car with outstanding malfunctions sells for its price minus the
    /// repair cost, and only if the buyer accepts them. That price is not
    /// clamped and can be negative. Malfunctions stay with the car.
    pub fn buy_car(
        &mut self,
        car_id: &str,
        buyer_id: &str,
        accept_malfunctions: bool,
    ) -> Result<Decimal, RegistryError> {
        let mut car = self.get_car(car_id)?;
        let mut buyer = self.get_person(buyer_id)?;
        let mut seller = self.get_person(&car.owner)?;

        if car.owner == buyer.id {
            return Err(RegistryError::AlreadyOwner {
                car: car.id,
                buyer: buyer.id,
            });
        }

        let price = if !car.has_malfunctions() {
            car.price
        } else if accept_malfunctions {
            car.net_price()
                .ok_or_else(|| RegistryError::overflow("net price", &car.id))?
        } else {
            return Err(RegistryError::BuyerDeclined {
                car: car.id,
                buyer: buyer.id,
            });
        };

        if !buyer.can_afford(price) {
            return Err(RegistryError::InsufficientFunds {
                person: buyer.id,
                required: price,
                available: buyer.money,
            });
        }

        let previous_key = index_key(&car.color, &seller.id, &car.id)?;
        let next_key = index_key(&car.color, &buyer.id, &car.id)?;

        seller.money = seller
            .money
            .checked_add(price)
            .ok_or_else(|| RegistryError::overflow("balance", &seller.id))?;
        buyer.money = buyer
            .money
            .checked_sub(price)
            .ok_or_else(|| RegistryError::overflow("balance", &buyer.id))?;
        car.owner = buyer.id.clone();

        let car_bytes = encode(&car)?;
        let buyer_bytes = encode(&buyer)?;
        let seller_bytes = encode(&seller)?;

        self.store.put(&car.id, car_bytes)?;
        self.store.put(&buyer.id, buyer_bytes)?;
        self.store.put(&seller.id, seller_bytes)?;
        self.add_index_entry(&next_key)?;
        self.remove_index_entry(&previous_key)?;

        Ok(price)
    }
}
