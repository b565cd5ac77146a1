//! API error types and handling.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use orderscope::OrderscopeError;
use serde::Serialize;
use tracing::warn;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Error from the orderscope library.
    Orderscope(OrderscopeError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Orderscope(e @ OrderscopeError::EmptyInput(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "empty_selection", e.to_string())
            }
            ApiError::Orderscope(e) => {
                (StatusCode::BAD_REQUEST, "orderscope_error", e.to_string())
            }
        };

        if status != StatusCode::NOT_FOUND {
            warn!(%status, %message, "request failed");
        }

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<OrderscopeError> for ApiError {
    fn from(err: OrderscopeError) -> Self {
        ApiError::Orderscope(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Orderscope(e) => write!(f, "Orderscope error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}
