//! CRUD handlers for destinations.

use axum::extract::{Path, State};
use axum::Json;
use validator::Validate;

use crate::error::{ApiError, ApiResult, ErrorResponse};
use crate::models::{
    CreateDestinationRequest, DestinationResponse, MessageResponse, UpdateDestinationRequest,
};
use crate::router::ApiState;

/// Register a new destination under an existing account.
#[utoipa::path(
    post,
    path = "/destinations/",
    tag = "Destinations",
    request_body = CreateDestinationRequest,
    responses(
        (status = 200, description = "Destination created, body is the new id", body = i64),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Owning account not found", body = ErrorResponse),
    )
)]
pub async fn create_destination_handler(
    State(state): State<ApiState>,
    Json(request): Json<CreateDestinationRequest>,
) -> ApiResult<Json<i64>> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let destination_id = state.destinations.create_destination(request).await?;
    Ok(Json(destination_id))
}

/// Get a destination by id.
#[utoipa::path(
    get,
    path = "/destinations/{id}/",
    tag = "Destinations",
    params(("id" = i64, Path, description = "Destination ID")),
    responses(
        (status = 200, description = "Destination record", body = DestinationResponse),
        (status = 404, description = "Destination not found", body = ErrorResponse),
    )
)]
pub async fn get_destination_handler(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DestinationResponse>> {
    let destination = state.destinations.get_destination(id).await?;
    Ok(Json(destination))
}

/// Partially update a destination. Fields not provided are left unchanged.
#[utoipa::path(
    put,
    path = "/destinations/{id}/",
    tag = "Destinations",
    params(("id" = i64, Path, description = "Destination ID")),
    request_body = UpdateDestinationRequest,
    responses(
        (status = 200, description = "Updated destination", body = DestinationResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Destination not found", body = ErrorResponse),
    )
)]
pub async fn update_destination_handler(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateDestinationRequest>,
) -> ApiResult<Json<DestinationResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let destination = state.destinations.update_destination(id, request).await?;
    Ok(Json(destination))
}

/// Delete a destination.
#[utoipa::path(
    delete,
    path = "/destinations/{id}/",
    tag = "Destinations",
    params(("id" = i64, Path, description = "Destination ID")),
    responses(
        (status = 200, description = "Destination deleted", body = MessageResponse),
        (status = 404, description = "Destination not found", body = ErrorResponse),
    )
)]
pub async fn delete_destination_handler(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    state.destinations.delete_destination(id).await?;
    Ok(Json(MessageResponse::new(
        "Destination deleted successfully",
    )))
}
