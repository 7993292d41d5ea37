use rust_decimal::Decimal;
use shared::models::OrderId;
use thiserror::Error;

use crate::seating::SeatingError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    #[error("Order already paid: {0}")]
    AlreadyPaid(OrderId),

    #[error("Amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    #[error(transparent)]
    Seating(#[from] SeatingError),
}

pub type OrderResult<T> = Result<T, OrderError>;
