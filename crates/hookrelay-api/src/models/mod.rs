//! Request and response types for the relay API.

pub mod accounts;
pub mod destinations;

pub use accounts::{AccountResponse, CreateAccountRequest, UpdateAccountRequest};
pub use destinations::{
    CreateDestinationRequest, DestinationResponse, UpdateDestinationRequest,
};

use serde::Serialize;
use utoipa::ToSchema;

/// Generic confirmation message.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
