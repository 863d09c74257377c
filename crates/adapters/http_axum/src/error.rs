//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use minibook_domain::error::{InvalidArgumentError, MiniBookError};

/// JSON error body returned by API endpoints.
///
/// `kind` stays machine-readable so booking UIs can distinguish "pick
/// another slot" from "fix your input" from "try again later".
#[derive(Serialize)]
struct ErrorBody {
    kind: &'static str,
    error: String,
}

/// Maps [`MiniBookError`] to an HTTP response with appropriate status code.
pub struct ApiError(MiniBookError);

impl From<MiniBookError> for ApiError {
    fn from(err: MiniBookError) -> Self {
        Self(err)
    }
}

impl From<InvalidArgumentError> for ApiError {
    fn from(err: InvalidArgumentError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match &self.0 {
            MiniBookError::InvalidArgument(err) => {
                (StatusCode::BAD_REQUEST, "invalid_argument", err.to_string())
            }
            MiniBookError::Conflict(err) => (StatusCode::CONFLICT, "conflict", err.to_string()),
            MiniBookError::NotFound(err) => (StatusCode::NOT_FOUND, "not_found", err.to_string()),
            MiniBookError::Unavailable(err) => {
                tracing::error!(error = %err, "storage unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "unavailable",
                    "storage unavailable".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { kind, error: message })).into_response()
    }
}
