//! Order Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::patron::{PatronId, ServiceKind};

pub type OrderId = i64;

/// Order as seen by the API layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderView {
    pub id: OrderId,
    pub patron_id: PatronId,
    pub service_kind: ServiceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waiter_staff_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<u32>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub paid: bool,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub patron_id: PatronId,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Add amount payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAmountAdd {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Resources handed back when an order is settled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseSummary {
    pub patron_id: PatronId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waiter_staff_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<u32>,
    /// Patrons that received a resource in the re-sweep that followed
    pub backfilled: Vec<PatronId>,
}

/// Payment response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSettled {
    pub order: OrderView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<ReleaseSummary>,
}
