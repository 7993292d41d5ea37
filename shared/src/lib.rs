//! Shared types for the floor service
//!
//! Wire types used by floor-server and its clients: error codes,
//! the unified API response and the patron/waiter/table/order views.

pub mod error;
pub mod models;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
