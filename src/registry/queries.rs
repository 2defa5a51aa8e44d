use super::AssetRegistry;
use crate::error::RegistryError;
use crate::ledger::StateStore;
use crate::model::{Car, Person};

impl<S: StateStore> AssetRegistry<S> {
    pub fn get_person(&self, id: &str) -> Result<Person, RegistryError> {
        self.load(id)
    }

    pub fn get_car(&self, id: &str) -> Result<Car, RegistryError> {
        self.load(id)
    }

    pub fn person_exists(&self, id: &str) -> Result<bool, RegistryError> {
        match self.get_person(id) {
            Ok(_) => Ok(true),
            Err(RegistryError::NotFound { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Cars currently painted `color`, in index key order.
    pub fn get_cars_by_color(&self, color: &str) -> Result<Vec<Car>, RegistryError> {
        let ids = self.scan_index(&[color])?;
        self.resolve_cars(ids)
    }

    /// Cars of `owner_id` currently painted `color`, in index key order.
    ///
    /// Fails with `NotFound` if the owner does not exist.
    pub fn get_cars_by_owner_and_color(
        &self,
        owner_id: &str,
        color: &str,
    ) -> Result<Vec<Car>, RegistryError> {
        if !self.person_exists(owner_id)? {
            return Err(RegistryError::not_found::<Person>(owner_id));
        }
        let ids = self.scan_index(&[color, owner_id])?;
        self.resolve_cars(ids)
    }

    // Written-off cars keep their index entry; such entries resolve to nothing.
    fn resolve_cars(&self, ids: Vec<String>) -> Result<Vec<Car>, RegistryError> {
        let mut cars = Vec::with_capacity(ids.len());
        for id in ids {
            match self.get_car(&id) {
                Ok(car) => cars.push(car),
                Err(RegistryError::NotFound { .. }) => continue,
                Err(err) => return Err(err),
            }
        }
        Ok(cars)
    }
}
