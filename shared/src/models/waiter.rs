//! Waiter Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Waiter snapshot row (ring order)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaiterView {
    pub staff_id: String,
    pub name: String,
    /// Dine-in parties currently assigned and unpaid
    pub dine_in_load: u32,
    pub dine_in_served: u32,
    pub takeout_served: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_sales: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_commission: Decimal,
    /// Below the dine-in cap
    pub available: bool,
}

impl WaiterView {
    pub fn total_served(&self) -> u32 {
        self.dine_in_served + self.takeout_served
    }
}
