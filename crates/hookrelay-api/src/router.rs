//! Axum router setup for the relay endpoints.

use axum::routing::post;
use axum::Router;
use sqlx::PgPool;

use crate::error::ApiError;
use crate::handlers::{accounts, destinations, ingest};
use crate::services::account_service::AccountService;
use crate::services::destination_service::DestinationService;
use crate::services::dispatch_service::DispatchService;
use crate::services::token_service::TokenAuthenticator;

/// Shared state for relay handlers.
#[derive(Clone)]
pub struct ApiState {
    pub accounts: AccountService,
    pub destinations: DestinationService,
    pub authenticator: TokenAuthenticator,
    pub dispatcher: DispatchService,
}

impl ApiState {
    /// Create the relay state over a shared pool.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if the outbound HTTP client cannot be
    /// built.
    pub fn new(pool: PgPool) -> Result<Self, ApiError> {
        Ok(Self {
            accounts: AccountService::new(pool.clone()),
            destinations: DestinationService::new(pool.clone()),
            authenticator: TokenAuthenticator::new(pool.clone()),
            dispatcher: DispatchService::new(pool)?,
        })
    }
}

/// Creates the relay router with all routes.
///
/// Paths keep their trailing slashes; they are part of the public contract.
pub fn api_router(state: ApiState) -> Router {
    Router::new()
        // Account CRUD
        .route("/accounts/", post(accounts::create_account_handler))
        .route(
            "/accounts/{id}/",
            axum::routing::get(accounts::get_account_handler)
                .put(accounts::update_account_handler)
                .delete(accounts::delete_account_handler),
        )
        // Destination CRUD
        .route(
            "/destinations/",
            post(destinations::create_destination_handler),
        )
        .route(
            "/destinations/{id}/",
            axum::routing::get(destinations::get_destination_handler)
                .put(destinations::update_destination_handler)
                .delete(destinations::delete_destination_handler),
        )
        // Data ingestion and fanout
        .route("/server/incoming_data", post(ingest::incoming_data_handler))
        .with_state(state)
}
