//! Destination request/response types.
//!
//! Headers cross the wire as a JSON object; the store keeps them as
//! serialized text. Serialization happens in the service, deserialization
//! happens when a record is returned, so callers never see the stored form.

use std::collections::HashMap;

use hookrelay_db::Destination;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::ApiError;

/// Body for `POST /destinations/`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDestinationRequest {
    #[validate(length(min = 1))]
    pub url: String,

    /// One of GET/POST/PUT/DELETE, any case. Validated at dispatch time.
    #[validate(length(min = 1))]
    pub http_method: String,

    pub headers: HashMap<String, String>,

    pub account_id: i64,
}

/// Body for `PUT /destinations/{id}/`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateDestinationRequest {
    #[validate(length(min = 1))]
    pub url: Option<String>,

    #[validate(length(min = 1))]
    pub http_method: Option<String>,

    pub headers: Option<HashMap<String, String>>,
}

/// Full destination record with headers as a mapping.
#[derive(Debug, Serialize, ToSchema)]
pub struct DestinationResponse {
    pub destination_id: i64,
    pub url: String,
    pub http_method: String,
    pub headers: HashMap<String, String>,
    pub account_id: i64,
}

impl TryFrom<Destination> for DestinationResponse {
    type Error = ApiError;

    fn try_from(destination: Destination) -> Result<Self, Self::Error> {
        let headers = serde_json::from_str(&destination.headers).map_err(|e| {
            ApiError::MalformedDestinationConfig {
                destination_id: destination.destination_id,
                detail: e.to_string(),
            }
        })?;
        Ok(Self {
            destination_id: destination.destination_id,
            url: destination.url,
            http_method: destination.http_method,
            headers,
            account_id: destination.account_id,
        })
    }
}
