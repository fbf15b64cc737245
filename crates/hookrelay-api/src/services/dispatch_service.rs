//! Synchronous fanout of inbound payloads to an account's destinations.
//!
//! Destinations are attempted one at a time in store order. The first failing
//! delivery aborts the whole fanout; destinations after it in iteration order
//! are never attempted. Fan-out is not best-effort-per-destination; it is
//! sequential and fail-fast.

use std::str::FromStr;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde_json::{Map, Value};
use sqlx::PgPool;

use crate::error::ApiError;
use hookrelay_db::Destination;

/// HTTP methods a destination may be registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl FromStr for DeliveryMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            other => Err(format!("Unsupported HTTP method: {other}")),
        }
    }
}

impl std::fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// Outcome of a completed fanout.
#[derive(Debug, Clone, Copy)]
pub struct DispatchReport {
    /// Number of destinations that were attempted and succeeded. Equals the
    /// account's destination count on success; zero destinations is a valid,
    /// trivially successful fanout.
    pub delivered: usize,
}

/// Service for relaying inbound payloads to destinations.
#[derive(Clone)]
pub struct DispatchService {
    pool: PgPool,
    http_client: Client,
}

impl DispatchService {
    /// Create a new dispatch service with a shared HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if the HTTP client cannot be built.
    pub fn new(pool: PgPool) -> Result<Self, ApiError> {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .user_agent("hookrelay/1.0")
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ApiError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { pool, http_client })
    }

    /// Load an account's destinations and deliver the payload to each.
    ///
    /// # Errors
    ///
    /// Fails with the first per-destination error encountered; see
    /// [`DispatchService::deliver_all`].
    pub async fn dispatch(
        &self,
        account_id: i64,
        payload: &Map<String, Value>,
    ) -> Result<DispatchReport, ApiError> {
        let destinations = Destination::list_by_account(&self.pool, account_id).await?;

        if destinations.is_empty() {
            tracing::debug!(
                target: "relay_dispatch",
                account_id,
                "No destinations registered, nothing to deliver"
            );
            return Ok(DispatchReport { delivered: 0 });
        }

        tracing::info!(
            target: "relay_dispatch",
            account_id,
            destination_count = destinations.len(),
            "Relaying payload to destinations"
        );

        self.deliver_all(&destinations, payload).await
    }

    /// Deliver the payload to every destination, sequentially, failing fast.
    pub async fn deliver_all(
        &self,
        destinations: &[Destination],
        payload: &Map<String, Value>,
    ) -> Result<DispatchReport, ApiError> {
        for destination in destinations {
            self.deliver_one(destination, payload).await?;
        }
        Ok(DispatchReport {
            delivered: destinations.len(),
        })
    }

    /// Perform exactly one delivery attempt to a single destination.
    async fn deliver_one(
        &self,
        destination: &Destination,
        payload: &Map<String, Value>,
    ) -> Result<(), ApiError> {
        // Stored headers are parsed once per dispatch, before any request is
        // constructed for this destination.
        let headers = parse_stored_headers(destination)?;

        let method = destination.http_method.parse::<DeliveryMethod>().map_err(|_| {
            ApiError::UnsupportedMethod {
                destination_id: destination.destination_id,
                method: destination.http_method.clone(),
            }
        })?;

        let url = normalize_url(&destination.url);

        let request = match method {
            // GET carries the payload as query parameters, not a body.
            DeliveryMethod::Get => self
                .http_client
                .get(&url)
                .query(&query_parameters(payload)),
            DeliveryMethod::Post => self.http_client.post(&url).json(payload),
            DeliveryMethod::Put => self.http_client.put(&url).json(payload),
            DeliveryMethod::Delete => self.http_client.delete(&url).json(payload),
        };

        let response = request.headers(headers).send().await.map_err(|e| {
            tracing::warn!(
                target: "relay_dispatch",
                destination_id = destination.destination_id,
                url = %url,
                error = %e,
                "Destination unreachable"
            );
            ApiError::DestinationUnreachable {
                url: url.clone(),
                source: e,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                target: "relay_dispatch",
                destination_id = destination.destination_id,
                url = %url,
                status = status.as_u16(),
                "Delivery failed, aborting fanout"
            );
            return Err(ApiError::DeliveryFailed {
                status: status.as_u16(),
                url,
            });
        }

        tracing::debug!(
            target: "relay_dispatch",
            destination_id = destination.destination_id,
            url = %url,
            status = status.as_u16(),
            "Delivered"
        );
        Ok(())
    }
}

/// Parse a destination's stored header text into a request header map.
fn parse_stored_headers(destination: &Destination) -> Result<HeaderMap, ApiError> {
    let malformed = |detail: String| ApiError::MalformedDestinationConfig {
        destination_id: destination.destination_id,
        detail,
    };

    let parsed: std::collections::HashMap<String, String> =
        serde_json::from_str(&destination.headers).map_err(|e| malformed(e.to_string()))?;

    let mut headers = HeaderMap::with_capacity(parsed.len());
    for (name, value) in &parsed {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| malformed(format!("invalid header name {name:?}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| malformed(format!("invalid header value for {name}: {e}")))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// Prepend `http://` when the url carries no recognized scheme.
fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}

/// Flatten a JSON object into query parameters for GET deliveries.
///
/// String values are passed through verbatim; numbers and booleans use their
/// JSON text; nested objects and arrays are sent as compact JSON; nulls are
/// omitted entirely.
fn query_parameters(payload: &Map<String, Value>) -> Vec<(String, String)> {
    payload
        .iter()
        .filter_map(|(key, value)| {
            let rendered = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some((key.clone(), rendered))
        })
        .collect()
}
