//! Account CRUD service.
//!
//! Pure persistence plumbing over [`hookrelay_db::Account`]. The only logic
//! here is secret token issuance: generated once at creation, never touched
//! again.

use sqlx::PgPool;

use crate::error::ApiError;
use crate::models::{AccountResponse, CreateAccountRequest, UpdateAccountRequest};
use crate::services::token_service::generate_secret_token;
use hookrelay_db::{Account, CreateAccount, UpdateAccountFields};

/// Service for account operations.
#[derive(Clone)]
pub struct AccountService {
    pool: PgPool,
}

impl AccountService {
    /// Create a new account service.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an account with a freshly generated secret token. Returns the
    /// new account id.
    pub async fn create_account(&self, request: CreateAccountRequest) -> Result<i64, ApiError> {
        let secret_token = generate_secret_token();

        let account = Account::create(
            &self.pool,
            CreateAccount {
                email: request.email,
                account_name: request.account_name,
                website: request.website,
            },
            &secret_token,
        )
        .await?;

        tracing::info!(
            target: "relay_accounts",
            account_id = account.account_id,
            "Account created"
        );
        Ok(account.account_id)
    }

    /// Fetch an account by id.
    pub async fn get_account(&self, account_id: i64) -> Result<AccountResponse, ApiError> {
        let account = Account::find_by_id(&self.pool, account_id)
            .await?
            .ok_or(ApiError::AccountNotFound)?;
        Ok(account.into())
    }

    /// Partially update an account. The secret token is never mutated.
    pub async fn update_account(
        &self,
        account_id: i64,
        request: UpdateAccountRequest,
    ) -> Result<AccountResponse, ApiError> {
        let account = Account::update(
            &self.pool,
            account_id,
            UpdateAccountFields {
                email: request.email,
                account_name: request.account_name,
                website: request.website,
            },
        )
        .await?
        .ok_or(ApiError::AccountNotFound)?;
        Ok(account.into())
    }

    /// Delete an account. Destinations it owns are left in place.
    pub async fn delete_account(&self, account_id: i64) -> Result<(), ApiError> {
        let deleted = Account::delete(&self.pool, account_id).await?;
        if !deleted {
            return Err(ApiError::AccountNotFound);
        }
        tracing::info!(target: "relay_accounts", account_id, "Account deleted");
        Ok(())
    }
}
