//! Unified error system for the floor service
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Unified API response format
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Admission errors (capacity exhausted)
//! - 4xxx: Order errors
//! - 6xxx: Patron errors
//! - 7xxx: Table errors
//! - 8xxx: Waiter errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::NoTablesAvailable).with_detail("party_size", 9);
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(1002));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
