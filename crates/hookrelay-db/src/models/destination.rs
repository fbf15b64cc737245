//! Destination model.
//!
//! A destination is an outbound HTTP target owned by an account. Headers are
//! stored as serialized JSON text and parsed back into a mapping at dispatch
//! time; the method string is stored as given and validated at dispatch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};

/// A registered outbound target.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Destination {
    /// Unique identifier, generated by the store.
    pub destination_id: i64,

    /// Target URL. A missing scheme is tolerated here and normalized at
    /// dispatch time.
    pub url: String,

    /// HTTP method as provided at registration (any case).
    pub http_method: String,

    /// Header mapping serialized as a JSON object.
    pub headers: String,

    /// Owning account.
    pub account_id: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a destination. `headers` is already serialized.
#[derive(Debug, Clone)]
pub struct CreateDestination {
    pub url: String,
    pub http_method: String,
    pub headers: String,
    pub account_id: i64,
}

/// Partial update: `None` fields are left unchanged. The owning account
/// cannot be reassigned.
#[derive(Debug, Clone, Default)]
pub struct UpdateDestinationFields {
    pub url: Option<String>,
    pub http_method: Option<String>,
    pub headers: Option<String>,
}

impl Destination {
    /// Insert a new destination.
    pub async fn create<'e, E>(executor: E, data: CreateDestination) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            r#"
            INSERT INTO destinations (url, http_method, headers, account_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.url)
        .bind(&data.http_method)
        .bind(&data.headers)
        .bind(data.account_id)
        .fetch_one(executor)
        .await
    }

    /// Find a destination by id.
    pub async fn find_by_id<'e, E>(
        executor: E,
        destination_id: i64,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            r#"
            SELECT * FROM destinations WHERE destination_id = $1
            "#,
        )
        .bind(destination_id)
        .fetch_optional(executor)
        .await
    }

    /// List all destinations owned by an account, in store order.
    pub async fn list_by_account<'e, E>(
        executor: E,
        account_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            r#"
            SELECT * FROM destinations WHERE account_id = $1 ORDER BY destination_id
            "#,
        )
        .bind(account_id)
        .fetch_all(executor)
        .await
    }

    /// Partially update a destination. Absent fields keep their stored values.
    pub async fn update<'e, E>(
        executor: E,
        destination_id: i64,
        fields: UpdateDestinationFields,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            r#"
            UPDATE destinations
            SET url = COALESCE($2, url),
                http_method = COALESCE($3, http_method),
                headers = COALESCE($4, headers),
                updated_at = NOW()
            WHERE destination_id = $1
            RETURNING *
            "#,
        )
        .bind(destination_id)
        .bind(&fields.url)
        .bind(&fields.http_method)
        .bind(&fields.headers)
        .fetch_optional(executor)
        .await
    }

    /// Delete a destination. Returns `true` if a row was removed.
    pub async fn delete<'e, E>(executor: E, destination_id: i64) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            r#"
            DELETE FROM destinations WHERE destination_id = $1
            "#,
        )
        .bind(destination_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
