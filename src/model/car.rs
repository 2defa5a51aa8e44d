use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use car_ledger_macros::Record;

/// A reported defect and the cost of fixing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Malfunction {
    pub description: String,
    pub price: Decimal,
}

impl Malfunction {
    pub fn new(description: impl Into<String>, price: Decimal) -> Self {
        Self {
            description: description.into(),
            price,
        }
    }
}

/// A registered car.
///
/// `malfunctions` is always serialized, as `[]` when empty, and is required
/// when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[record(kind = "Car")]
#[serde(rename_all = "PascalCase")]
pub struct Car {
    #[serde(rename = "ID")]
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: u16,
    pub color: String,
    /// Person id of the current owner.
    pub owner: String,
    pub malfunctions: Vec<Malfunction>,
    pub price: Decimal,
}

impl Car {
    pub fn has_malfunctions(&self) -> bool {
        !self.malfunctions.is_empty()
    }

    /// Total cost of fixing every outstanding malfunction, or `None` if the
    /// sum overflows.
    pub fn repair_cost(&self) -> Option<Decimal> {
        self.malfunctions
            .iter()
            .try_fold(Decimal::ZERO, |total, m| total.checked_add(m.price))
    }

    /// A car whose repairs cost more than the car itself is a total loss.
    /// `None` if the repair cost overflows.
    pub fn is_write_off(&self) -> Option<bool> {
        Some(self.repair_cost()? > self.price)
    }

    /// Listed price minus outstanding repairs. Negative when repairs exceed
    /// the listed price; callers get the raw value.
    pub fn net_price(&self) -> Option<Decimal> {
        self.price.checked_sub(self.repair_cost()?)
    }
}
