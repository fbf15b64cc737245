//! Common test utilities for hookrelay-api integration tests.
//!
//! Provides wiremock responders and fixtures for verifying fanout behavior
//! without requiring a real database: `DispatchService::deliver_all` is
//! exercised against constructed destination records, and the pool behind the
//! service is lazy so it never actually connects.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use wiremock::{Request, Respond, ResponseTemplate};

use hookrelay_db::Destination;

/// A pool that never connects. Fanout tests only exercise the delivery path,
/// which takes destination records directly.
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgres://postgres@127.0.0.1/hookrelay_test")
        .expect("lazy pool construction cannot fail")
}

/// Build a destination record without touching a database.
pub fn make_destination(
    destination_id: i64,
    url: &str,
    http_method: &str,
    headers: &HashMap<String, String>,
) -> Destination {
    Destination {
        destination_id,
        url: url.to_string(),
        http_method: http_method.to_string(),
        headers: serde_json::to_string(headers).expect("headers serialize"),
        account_id: 1,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Destination with an empty header mapping.
pub fn plain_destination(destination_id: i64, url: &str, http_method: &str) -> Destination {
    make_destination(destination_id, url, http_method, &HashMap::new())
}

/// A captured HTTP request with url, body, and headers.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub url: String,
    pub body: Vec<u8>,
    pub headers: HashMap<String, String>,
}

impl CapturedRequest {
    /// Parse the body as JSON.
    pub fn body_json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Get a header value by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        let name_lower = name.to_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| k.to_lowercase() == name_lower)
            .map(|(_, v)| v.as_str())
    }
}

/// A wiremock responder that captures incoming requests.
#[derive(Clone)]
pub struct CaptureResponder {
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    response_code: u16,
}

impl CaptureResponder {
    /// Create a new capture responder that returns 200 OK.
    pub fn new() -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            response_code: 200,
        }
    }

    /// Get all captured requests.
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Get the number of captured requests.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Default for CaptureResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl Respond for CaptureResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let captured = CapturedRequest {
            url: request.url.to_string(),
            body: request.body.clone(),
            headers: request
                .headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
                .collect(),
        };
        self.requests.lock().unwrap().push(captured);
        ResponseTemplate::new(self.response_code)
    }
}

/// A wiremock responder that counts incoming requests.
#[derive(Clone)]
pub struct CountingResponder {
    count: Arc<AtomicU32>,
    response_code: u16,
}

impl CountingResponder {
    /// Create a new counting responder that returns 200 OK.
    pub fn new() -> Self {
        Self {
            count: Arc::new(AtomicU32::new(0)),
            response_code: 200,
        }
    }

    /// Create a counting responder that returns a custom status code.
    pub fn with_status(status: u16) -> Self {
        Self {
            count: Arc::new(AtomicU32::new(0)),
            response_code: status,
        }
    }

    /// Get the current request count.
    pub fn count(&self) -> u32 {
        self.count.load(Ordering::SeqCst)
    }
}

impl Default for CountingResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl Respond for CountingResponder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        self.count.fetch_add(1, Ordering::SeqCst);
        ResponseTemplate::new(self.response_code)
    }
}

/// A representative inbound payload.
pub fn sample_payload() -> serde_json::Map<String, serde_json::Value> {
    serde_json::json!({
        "event": "order.created",
        "order_id": 4711,
        "paid": true
    })
    .as_object()
    .expect("sample payload is an object")
    .clone()
}
