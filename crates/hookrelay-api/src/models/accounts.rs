//! Account request/response types.

use hookrelay_db::Account;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Body for `POST /accounts/`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAccountRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub account_name: String,

    pub website: Option<String>,
}

/// Body for `PUT /accounts/{id}/`. Absent fields are left unchanged; the
/// secret token cannot be updated through this type at all.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAccountRequest {
    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 1))]
    pub account_name: Option<String>,

    pub website: Option<String>,
}

/// Full account record, including the secret token.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    pub account_id: i64,
    pub email: String,
    pub account_name: String,
    pub secret_token: String,
    pub website: Option<String>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            account_id: account.account_id,
            email: account.email,
            account_name: account.account_name,
            secret_token: account.secret_token,
            website: account.website,
        }
    }
}
