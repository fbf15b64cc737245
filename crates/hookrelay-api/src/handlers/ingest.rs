//! Data ingestion handler: the inbound half of the relay.
//!
//! Check order is part of the contract: token presence, then token validity,
//! then payload shape. A request with both a bad token and a non-object body
//! gets 401, not 400.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde_json::Value;

use crate::error::{ApiError, ApiResult, ErrorResponse};
use crate::models::MessageResponse;
use crate::router::ApiState;

/// Header carrying the account's secret token.
pub const SECRET_TOKEN_HEADER: &str = "secret_token";

/// Accept an inbound payload and relay it to every destination of the
/// authenticated account.
#[utoipa::path(
    post,
    path = "/server/incoming_data",
    tag = "DataHandling",
    request_body = Object,
    params(
        ("secret_token" = String, Header, description = "Account secret token")
    ),
    responses(
        (status = 200, description = "Payload relayed to all destinations", body = MessageResponse),
        (status = 400, description = "Body is not a JSON object", body = ErrorResponse),
        (status = 401, description = "Missing or invalid secret token", body = ErrorResponse),
        (status = 502, description = "A destination was unreachable", body = ErrorResponse),
    )
)]
pub async fn incoming_data_handler(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResult<Json<MessageResponse>> {
    let token = headers
        .get(SECRET_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if token.is_empty() {
        return Err(ApiError::MissingToken);
    }

    let account_id = state.authenticator.authenticate(token).await?;

    let payload = body.as_object().ok_or(ApiError::InvalidPayload)?;

    state.dispatcher.dispatch(account_id, payload).await?;

    Ok(Json(MessageResponse::new(
        "Data sent to destinations successfully",
    )))
}
