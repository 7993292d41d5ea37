//! Utilities
//!
//! - [`AppError`] / [`ApiResponse`] (from shared::error) and the domain error mapping
//! - Logging setup

pub mod error;
pub mod logger;
pub mod result;

pub use error::{ApiResponse, AppError, ErrorCategory, ErrorCode, ok, ok_with_message};
pub use result::{ApiResult, AppResult};
