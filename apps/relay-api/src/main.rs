//! hookrelay server
//!
//! A multi-tenant webhook relay built with Axum. Accounts register outbound
//! destinations; inbound JSON posted under an account's secret token is
//! relayed synchronously to all of that account's destinations.

mod config;
mod health;
mod logging;
mod openapi;

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::Method;
use axum::routing::get;
use axum::Router;
use config::Config;
use tokio::signal;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use hookrelay_api::{api_router, ApiState};

#[tokio::main]
async fn main() {
    // Load configuration (fail-fast on missing required values)
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.rust_log);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.host,
        port = config.port,
        "Starting hookrelay API"
    );

    // Create database connection pool
    let pool = match hookrelay_db::create_pool(&config.database_url).await {
        Ok(pool) => {
            info!("Database connection established");
            pool
        }
        Err(e) => {
            eprintln!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = hookrelay_db::run_migrations(&pool).await {
        eprintln!("FATAL: {e}");
        std::process::exit(1);
    }

    let api_state = match ApiState::new(pool) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to create relay state: {e}");
            std::process::exit(1);
        }
    };

    let app = Router::new()
        // Health check endpoint (no auth required)
        .route("/health", get(health::health_handler))
        // Swagger UI and OpenAPI spec
        .merge(openapi::swagger_routes())
        // Account/destination CRUD and the ingestion endpoint
        .merge(api_router(api_state))
        .layer(RequestBodyLimitLayer::new(config.max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer());

    let addr: SocketAddr = match config.bind_addr().parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!("Invalid bind address '{}': {e}", config.bind_addr());
            std::process::exit(1);
        }
    };

    info!(%addr, "Server listening");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to address {addr}: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

/// CORS: every origin is allowed with credentials, methods limited to
/// GET/POST/OPTIONS.
///
/// The origin is mirrored rather than wildcarded because browsers reject
/// `Access-Control-Allow-Origin: *` on credentialed requests.
fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .max_age(Duration::from_secs(3600))
}

/// Graceful shutdown on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {e}");
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
