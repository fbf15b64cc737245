//! Destination CRUD service.
//!
//! Serializes the header mapping to its stored text form on the way in and
//! back to a mapping on the way out, so storage shape stays out of the
//! handlers.

use sqlx::PgPool;

use crate::error::ApiError;
use crate::models::{CreateDestinationRequest, DestinationResponse, UpdateDestinationRequest};
use hookrelay_db::{Account, CreateDestination, Destination, UpdateDestinationFields};

/// Service for destination operations.
#[derive(Clone)]
pub struct DestinationService {
    pool: PgPool,
}

impl DestinationService {
    /// Create a new destination service.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a destination under an existing account. Returns the new
    /// destination id.
    pub async fn create_destination(
        &self,
        request: CreateDestinationRequest,
    ) -> Result<i64, ApiError> {
        // Every destination belongs to exactly one existing account.
        Account::find_by_id(&self.pool, request.account_id)
            .await?
            .ok_or(ApiError::AccountNotFound)?;

        let headers = serde_json::to_string(&request.headers)
            .map_err(|e| ApiError::Internal(format!("Failed to serialize headers: {e}")))?;

        let destination = Destination::create(
            &self.pool,
            CreateDestination {
                url: request.url,
                http_method: request.http_method,
                headers,
                account_id: request.account_id,
            },
        )
        .await?;

        tracing::info!(
            target: "relay_destinations",
            destination_id = destination.destination_id,
            account_id = destination.account_id,
            "Destination created"
        );
        Ok(destination.destination_id)
    }

    /// Fetch a destination by id.
    pub async fn get_destination(
        &self,
        destination_id: i64,
    ) -> Result<DestinationResponse, ApiError> {
        let destination = Destination::find_by_id(&self.pool, destination_id)
            .await?
            .ok_or(ApiError::DestinationNotFound)?;
        destination.try_into()
    }

    /// Partially update a destination.
    pub async fn update_destination(
        &self,
        destination_id: i64,
        request: UpdateDestinationRequest,
    ) -> Result<DestinationResponse, ApiError> {
        let headers = match &request.headers {
            Some(map) => Some(
                serde_json::to_string(map)
                    .map_err(|e| ApiError::Internal(format!("Failed to serialize headers: {e}")))?,
            ),
            None => None,
        };

        let destination = Destination::update(
            &self.pool,
            destination_id,
            UpdateDestinationFields {
                url: request.url,
                http_method: request.http_method,
                headers,
            },
        )
        .await?
        .ok_or(ApiError::DestinationNotFound)?;
        destination.try_into()
    }

    /// Delete a destination.
    pub async fn delete_destination(&self, destination_id: i64) -> Result<(), ApiError> {
        let deleted = Destination::delete(&self.pool, destination_id).await?;
        if !deleted {
            return Err(ApiError::DestinationNotFound);
        }
        tracing::info!(
            target: "relay_destinations",
            destination_id,
            "Destination deleted"
        );
        Ok(())
    }
}
