//! Patron Model

use serde::{Deserialize, Serialize};

/// Patron id, unique for the process lifetime (starts at 1)
pub type PatronId = i64;

/// How the patron is served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceKind {
    /// Needs a waiter only, no table, no capacity cap
    Takeout,
    /// Needs a waiter and a table
    DineIn,
}

impl ServiceKind {
    pub fn is_dine_in(&self) -> bool {
        matches!(self, ServiceKind::DineIn)
    }
}

/// Lifecycle position of a queued patron
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatronState {
    /// Nothing assigned yet
    QueuedUnassigned,
    /// Waiter or table set, but not everything the service kind needs
    PartiallyAssigned,
    /// Every required resource is held
    FullyAssigned,
    /// An order is attached and not yet paid
    OrderPlaced,
}

/// Read-only patron view handed to the API layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatronView {
    pub id: PatronId,
    pub party_size: u32,
    pub service_kind: ServiceKind,
    pub state: PatronState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waiter_staff_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waiter_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i64>,
}

/// Admit patron payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatronCreate {
    pub service_kind: ServiceKind,
    /// Missing or zero means a party of one
    pub party_size: Option<u32>,
}

/// Members of each queue that have not placed an order yet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueCounts {
    pub dine_in_queued: usize,
    pub takeout_queued: usize,
}

/// Placed but unpaid orders per service kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCounts {
    pub dine_in_pending: usize,
    pub takeout_pending: usize,
}

/// Admission preview for a dine-in party
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DineInAvailability {
    pub can_accept: bool,
    pub waiters_available: bool,
    pub tables_available: bool,
    /// Class the party would be seated at
    pub table_capacity: Option<u32>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_kind_wire_format() {
        assert_eq!(
            serde_json::to_string(&ServiceKind::DineIn).unwrap(),
            "\"DINE_IN\""
        );
        let kind: ServiceKind = serde_json::from_str("\"TAKEOUT\"").unwrap();
        assert_eq!(kind, ServiceKind::Takeout);
    }

    #[test]
    fn test_patron_create_without_party_size() {
        let payload: PatronCreate = serde_json::from_str(r#"{"service_kind":"TAKEOUT"}"#).unwrap();
        assert_eq!(payload.service_kind, ServiceKind::Takeout);
        assert!(payload.party_size.is_none());
    }
}
