//! Error mapping
//!
//! Domain errors stay typed inside the engine and are turned into
//! [`AppError`] only at the HTTP edge, each with its own [`ErrorCode`]
//! and the ids involved as details.

use axum::Json;
use serde::Serialize;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

use crate::orders::OrderError;
use crate::seating::{AdmissionError, SeatingError};

impl From<AdmissionError> for AppError {
    fn from(err: AdmissionError) -> Self {
        match err {
            AdmissionError::NoWaiters => AppError::new(ErrorCode::NoWaitersAvailable),
            AdmissionError::NoTables {
                party_size,
                largest_table,
            } => AppError::new(ErrorCode::NoTablesAvailable)
                .with_detail("party_size", party_size)
                .with_detail("largest_table", largest_table),
        }
    }
}

impl From<SeatingError> for AppError {
    fn from(err: SeatingError) -> Self {
        let message = err.to_string();
        match err {
            SeatingError::PatronNotFound(id) => {
                AppError::with_message(ErrorCode::PatronNotFound, message).with_detail("patron_id", id)
            }
            SeatingError::NotSeated(id) => {
                AppError::with_message(ErrorCode::PatronNotSeated, message).with_detail("patron_id", id)
            }
            SeatingError::OrderAlreadyAttached(id) => {
                AppError::with_message(ErrorCode::OrderAlreadyAttached, message)
                    .with_detail("patron_id", id)
            }
            SeatingError::TableNotFound(number) => {
                AppError::with_message(ErrorCode::TableNotFound, message).with_detail("table", number)
            }
            SeatingError::TableOccupied(number) => {
                AppError::with_message(ErrorCode::TableOccupied, message).with_detail("table", number)
            }
        }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        let message = err.to_string();
        match err {
            OrderError::NotFound(id) => {
                AppError::with_message(ErrorCode::OrderNotFound, message).with_detail("order_id", id)
            }
            OrderError::AlreadyPaid(id) => {
                AppError::with_message(ErrorCode::OrderAlreadyPaid, message).with_detail("order_id", id)
            }
            OrderError::InvalidAmount(amount) => {
                AppError::with_message(ErrorCode::OrderInvalidAmount, message)
                    .with_detail("amount", amount.to_string())
            }
            OrderError::Seating(e) => e.into(),
        }
    }
}

/// Wrap data in a success response
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}

/// Wrap data in a success response with a custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success_with_message(message, data))
}
