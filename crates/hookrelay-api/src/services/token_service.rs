//! Secret token generation and authentication.
//!
//! Every account is issued a 32-character alphanumeric token at creation.
//! Inbound data presents the token in the `secret_token` header; the
//! authenticator maps it back to the owning account or rejects.

use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;
use sqlx::PgPool;
use subtle::ConstantTimeEq;

use crate::error::ApiError;
use hookrelay_db::Account;

/// Length of a generated secret token.
pub const SECRET_TOKEN_LENGTH: usize = 32;

/// Generate a fresh secret token.
///
/// SECURITY: Uses `OsRng` directly from the operating system's CSPRNG.
#[must_use]
pub fn generate_secret_token() -> String {
    (0..SECRET_TOKEN_LENGTH)
        .map(|_| OsRng.sample(Alphanumeric) as char)
        .collect()
}

/// Maps a presented secret token to an account id.
#[derive(Clone)]
pub struct TokenAuthenticator {
    pool: PgPool,
}

impl TokenAuthenticator {
    /// Create a new authenticator.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolve a secret token to its account id.
    ///
    /// An empty token is rejected before any lookup. The stored token is
    /// re-checked against the presented one in constant time so the
    /// comparison itself leaks nothing through timing.
    ///
    /// # Errors
    ///
    /// `ApiError::MissingToken` for an empty token, `ApiError::InvalidToken`
    /// when no account matches.
    pub async fn authenticate(&self, token: &str) -> Result<i64, ApiError> {
        if token.is_empty() {
            return Err(ApiError::MissingToken);
        }

        let account = Account::find_by_secret_token(&self.pool, token)
            .await?
            .ok_or(ApiError::InvalidToken)?;

        let matches: bool = account
            .secret_token
            .as_bytes()
            .ct_eq(token.as_bytes())
            .into();
        if !matches {
            return Err(ApiError::InvalidToken);
        }

        tracing::debug!(
            target: "relay_auth",
            account_id = account.account_id,
            "Secret token authenticated"
        );
        Ok(account.account_id)
    }
}
