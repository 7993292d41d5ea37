//! Result aliases

pub use shared::error::AppResult;

use axum::Json;
use shared::error::ApiResponse;

/// What every JSON handler returns
pub type ApiResult<T> = AppResult<Json<ApiResponse<T>>>;
