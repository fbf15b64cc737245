//! Error types for the relay API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Relay error variants.
///
/// The dispatch path has no local recovery: the first error at any stage
/// aborts the request and is surfaced verbatim to the original caller.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Unauthenticated: Secret token missing")]
    MissingToken,

    #[error("Unauthenticated: Invalid secret token")]
    InvalidToken,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Destination not found")]
    DestinationNotFound,

    #[error("Invalid Data: JSON object expected")]
    InvalidPayload,

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Destination {destination_id} has malformed headers: {detail}")]
    MalformedDestinationConfig { destination_id: i64, detail: String },

    #[error("Unsupported HTTP method: {method}")]
    UnsupportedMethod { destination_id: i64, method: String },

    #[error("Failed to send data to destination: {url}")]
    DeliveryFailed { status: u16, url: String },

    #[error("Destination unreachable: {url}: {source}")]
    DestinationUnreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// JSON error response returned by relay API endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status: u16,
}

impl ApiError {
    /// HTTP status this error renders as.
    ///
    /// `DeliveryFailed` propagates the failing destination's own status code
    /// to the original caller; anything that does not map to a valid status
    /// falls back to 502.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingToken | ApiError::InvalidToken => StatusCode::UNAUTHORIZED,
            ApiError::AccountNotFound | ApiError::DestinationNotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidPayload | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MalformedDestinationConfig { .. }
            | ApiError::UnsupportedMethod { .. }
            | ApiError::Database(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::DeliveryFailed { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::DestinationUnreachable { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            ApiError::MissingToken | ApiError::InvalidToken => "unauthenticated",
            ApiError::AccountNotFound => "account_not_found",
            ApiError::DestinationNotFound => "destination_not_found",
            ApiError::InvalidPayload => "invalid_payload",
            ApiError::Validation(_) => "validation_error",
            ApiError::MalformedDestinationConfig { .. } => "destination_config_error",
            ApiError::UnsupportedMethod { .. } => "unsupported_method",
            ApiError::DeliveryFailed { .. } => "delivery_failed",
            ApiError::DestinationUnreachable { .. } => "destination_unreachable",
            ApiError::Database(_) => "database_error",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.error_type().to_string(),
            message: self.to_string(),
            status: status.as_u16(),
        };
        (status, axum::Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_invalid_token_map_to_401() {
        assert_eq!(ApiError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(ApiError::AccountNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::DestinationNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn invalid_payload_maps_to_400() {
        assert_eq!(ApiError::InvalidPayload.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn delivery_failed_propagates_destination_status() {
        let err = ApiError::DeliveryFailed {
            status: 503,
            url: "http://example.com/hook".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn delivery_failed_with_bogus_status_falls_back_to_502() {
        let err = ApiError::DeliveryFailed {
            status: 0,
            url: "http://example.com/hook".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn delivery_failed_message_names_the_url() {
        let err = ApiError::DeliveryFailed {
            status: 500,
            url: "http://example.com/hook".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to send data to destination: http://example.com/hook"
        );
    }
}
