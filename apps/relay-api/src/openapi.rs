//! `OpenAPI` documentation and Swagger UI configuration.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::health;

/// `OpenAPI` documentation for the relay API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "hookrelay API",
        version = "0.1.0",
        description = "Multi-tenant webhook relay: accounts, destinations, and data fanout"
    ),
    paths(
        health::health_handler,
        hookrelay_api::handlers::accounts::create_account_handler,
        hookrelay_api::handlers::accounts::get_account_handler,
        hookrelay_api::handlers::accounts::update_account_handler,
        hookrelay_api::handlers::accounts::delete_account_handler,
        hookrelay_api::handlers::destinations::create_destination_handler,
        hookrelay_api::handlers::destinations::get_destination_handler,
        hookrelay_api::handlers::destinations::update_destination_handler,
        hookrelay_api::handlers::destinations::delete_destination_handler,
        hookrelay_api::handlers::ingest::incoming_data_handler,
    ),
    tags(
        (name = "Health", description = "Service health and status"),
        (name = "Accounts", description = "Account management"),
        (name = "Destinations", description = "Destination management"),
        (name = "DataHandling", description = "Inbound data ingestion and fanout"),
    )
)]
pub struct ApiDoc;

/// Swagger UI routes serving the generated spec.
pub fn swagger_routes() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
