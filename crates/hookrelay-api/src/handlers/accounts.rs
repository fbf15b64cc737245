//! CRUD handlers for accounts.

use axum::extract::{Path, State};
use axum::Json;
use validator::Validate;

use crate::error::{ApiError, ApiResult, ErrorResponse};
use crate::models::{
    AccountResponse, CreateAccountRequest, MessageResponse, UpdateAccountRequest,
};
use crate::router::ApiState;

/// Create a new account.
///
/// The response body is the generated account id; the secret token is
/// retrievable via `GET /accounts/{id}/`.
#[utoipa::path(
    post,
    path = "/accounts/",
    tag = "Accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 200, description = "Account created, body is the new id", body = i64),
        (status = 400, description = "Validation error", body = ErrorResponse),
    )
)]
pub async fn create_account_handler(
    State(state): State<ApiState>,
    Json(request): Json<CreateAccountRequest>,
) -> ApiResult<Json<i64>> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let account_id = state.accounts.create_account(request).await?;
    Ok(Json(account_id))
}

/// Get an account by id, including its secret token.
#[utoipa::path(
    get,
    path = "/accounts/{id}/",
    tag = "Accounts",
    params(("id" = i64, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account record", body = AccountResponse),
        (status = 404, description = "Account not found", body = ErrorResponse),
    )
)]
pub async fn get_account_handler(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<AccountResponse>> {
    let account = state.accounts.get_account(id).await?;
    Ok(Json(account))
}

/// Partially update an account. Fields not provided are left unchanged and
/// the secret token is never regenerated.
#[utoipa::path(
    put,
    path = "/accounts/{id}/",
    tag = "Accounts",
    params(("id" = i64, Path, description = "Account ID")),
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Updated account", body = AccountResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse),
    )
)]
pub async fn update_account_handler(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateAccountRequest>,
) -> ApiResult<Json<AccountResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let account = state.accounts.update_account(id, request).await?;
    Ok(Json(account))
}

/// Delete an account.
#[utoipa::path(
    delete,
    path = "/accounts/{id}/",
    tag = "Accounts",
    params(("id" = i64, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 404, description = "Account not found", body = ErrorResponse),
    )
)]
pub async fn delete_account_handler(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    state.accounts.delete_account(id).await?;
    Ok(Json(MessageResponse::new("Account deleted successfully")))
}
