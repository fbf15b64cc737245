//! Account model.
//!
//! An account is a tenant of the relay: it owns destinations and presents its
//! secret token to push data through `/server/incoming_data`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};

/// A registered account.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier, generated by the store.
    pub account_id: i64,

    /// Contact email, unique across accounts.
    pub email: String,

    /// Display name.
    pub account_name: String,

    /// 32-character alphanumeric credential, generated once at creation.
    /// Update operations never touch this column.
    pub secret_token: String,

    /// Optional website.
    pub website: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating an account. The secret token is generated by the
/// caller and passed in alongside.
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub email: String,
    pub account_name: String,
    pub website: Option<String>,
}

/// Partial update: `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountFields {
    pub email: Option<String>,
    pub account_name: Option<String>,
    pub website: Option<String>,
}

impl Account {
    /// Insert a new account with its generated secret token.
    pub async fn create<'e, E>(
        executor: E,
        data: CreateAccount,
        secret_token: &str,
    ) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            r#"
            INSERT INTO accounts (email, account_name, secret_token, website)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.email)
        .bind(&data.account_name)
        .bind(secret_token)
        .bind(&data.website)
        .fetch_one(executor)
        .await
    }

    /// Find an account by id.
    pub async fn find_by_id<'e, E>(executor: E, account_id: i64) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            r#"
            SELECT * FROM accounts WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(executor)
        .await
    }

    /// Find an account by its secret token (unique index).
    pub async fn find_by_secret_token<'e, E>(
        executor: E,
        secret_token: &str,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            r#"
            SELECT * FROM accounts WHERE secret_token = $1
            "#,
        )
        .bind(secret_token)
        .fetch_optional(executor)
        .await
    }

    /// Partially update an account. Absent fields keep their stored values;
    /// the secret token is never written.
    pub async fn update<'e, E>(
        executor: E,
        account_id: i64,
        fields: UpdateAccountFields,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            r#"
            UPDATE accounts
            SET email = COALESCE($2, email),
                account_name = COALESCE($3, account_name),
                website = COALESCE($4, website),
                updated_at = NOW()
            WHERE account_id = $1
            RETURNING *
            "#,
        )
        .bind(account_id)
        .bind(&fields.email)
        .bind(&fields.account_name)
        .bind(&fields.website)
        .fetch_optional(executor)
        .await
    }

    /// Delete an account. Returns `true` if a row was removed.
    pub async fn delete<'e, E>(executor: E, account_id: i64) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            r#"
            DELETE FROM accounts WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
