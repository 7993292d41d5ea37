//! Dining Table Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Dining table snapshot row (桌台)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub number: u32,
    pub capacity: u32,
    pub occupied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patron_id: Option<i64>,
}

/// Occupancy summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStatus {
    pub total_tables: usize,
    pub occupied_tables: usize,
    pub available_tables: usize,
    /// Free tables per capacity class
    pub available_by_capacity: BTreeMap<u32, usize>,
}
