//! `AppError` and the response envelope every endpoint returns

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Error returned across the HTTP edge
///
/// Engine errors are converted into this in `floor-server`; `details` carries
/// the ids involved (patron, order, table) so clients need not parse messages.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Error with the code's stock message
    pub fn new(code: ErrorCode) -> Self {
        Self::with_message(code, code.message())
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }
}

/// Response envelope: `code` 0 with `data` on success, the error code with
/// optional `details` on failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self::success_with_message("OK", data)
    }

    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            code: Some(ErrorCode::Success.code()),
            message: message.into(),
            data: Some(data),
            details: None,
        }
    }

    /// Status a response with this envelope is sent with
    fn status(&self) -> StatusCode {
        match self.code.map(ErrorCode::try_from) {
            None | Some(Ok(ErrorCode::Success)) => StatusCode::OK,
            Some(Ok(code)) => code.http_status(),
            Some(Err(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiResponse<()> {
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Only system faults are logged here
        if self.code.category() == ErrorCategory::System {
            tracing::error!(code = %self.code, message = %self.message, "System error");
        }
        (self.http_status(), Json(ApiResponse::<()>::error(&self))).into_response()
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_message() {
        let err = AppError::new(ErrorCode::OrderAlreadyPaid);
        assert_eq!(err.message, "Order has already been paid");
        assert_eq!(err.to_string(), err.message);
        assert!(err.details.is_none());
    }

    #[test]
    fn test_refusal_details() {
        let err = AppError::new(ErrorCode::NoTablesAvailable)
            .with_detail("party_size", 9)
            .with_detail("largest_table", 8);

        assert_eq!(err.http_status(), StatusCode::CONFLICT);
        let body = serde_json::to_value(ApiResponse::<()>::error(&err)).unwrap();
        assert_eq!(body["code"], 1002);
        assert_eq!(body["details"]["party_size"], 9);
        assert_eq!(body["details"]["largest_table"], 8);
        assert!(body.get("data").is_none());
    }

    #[test]
    fn test_success_envelope_omits_details() {
        let response = ApiResponse::success_with_message("Patron admitted", 7);
        let body = serde_json::to_value(response).unwrap();
        assert_eq!(body["code"], 0);
        assert_eq!(body["message"], "Patron admitted");
        assert_eq!(body["data"], 7);
        assert!(body.get("details").is_none());
    }

    #[test]
    fn test_response_status_follows_code() {
        let not_seated =
            AppError::with_message(ErrorCode::PatronNotSeated, "Patron 3 is still waiting")
                .with_detail("patron_id", 3);
        assert_eq!(not_seated.clone().into_response().status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiResponse::<()>::error(&not_seated).into_response().status(),
            StatusCode::CONFLICT
        );

        let missing = AppError::new(ErrorCode::WaiterNotFound);
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        assert_eq!(ApiResponse::success(()).into_response().status(), StatusCode::OK);

        let unknown_code = ApiResponse::<()> {
            code: Some(4242),
            message: "?".into(),
            data: None,
            details: None,
        };
        assert_eq!(
            unknown_code.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
