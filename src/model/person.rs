use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use car_ledger_macros::Record;

/// An owner of cars and holder of funds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[record(kind = "Person")]
#[serde(rename_all = "PascalCase")]
pub struct Person {
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    /// Balance. Not clamped at zero; see `Car::net_price`.
    pub money: Decimal,
}

impl Person {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        surname: impl Into<String>,
        email: impl Into<String>,
        money: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            surname: surname.into(),
            email: email.into(),
            money,
        }
    }

    pub fn can_afford(&self, amount: Decimal) -> bool {
        self.money >= amount
    }
}
