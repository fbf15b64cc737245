//! Integration tests for the fanout dispatcher.
//!
//! Delivery semantics are verified against wiremock endpoints: method
//! handling, payload placement, header passthrough, url normalization, and
//! the fail-fast contract between destinations.

mod common;

use std::collections::HashMap;

use common::*;
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer};

use hookrelay_api::error::ApiError;
use hookrelay_api::DispatchService;

fn dispatcher() -> DispatchService {
    DispatchService::new(lazy_pool()).expect("dispatch service builds")
}

/// POST delivery carries the exact JSON payload as body plus the configured
/// headers.
#[tokio::test]
async fn post_delivery_sends_json_body_and_configured_headers() {
    let server = MockServer::start().await;
    let capture = CaptureResponder::new();

    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(capture.clone())
        .mount(&server)
        .await;

    let mut headers = HashMap::new();
    headers.insert("x-api-key".to_string(), "s3cret".to_string());
    let destination = make_destination(1, &format!("{}/hook", server.uri()), "post", &headers);

    let payload = sample_payload();
    let report = dispatcher()
        .deliver_all(&[destination], &payload)
        .await
        .expect("delivery succeeds");
    assert_eq!(report.delivered, 1);

    assert_eq!(capture.request_count(), 1);
    let captured = &capture.requests()[0];
    let received: Value = captured.body_json().expect("body is JSON");
    assert_eq!(received, Value::Object(payload));
    assert_eq!(captured.header("x-api-key"), Some("s3cret"));
}

/// GET delivery carries payload fields as query parameters, not a body.
#[tokio::test]
async fn get_delivery_sends_query_parameters() {
    let server = MockServer::start().await;
    let capture = CaptureResponder::new();

    Mock::given(method("GET"))
        .and(path("/hook"))
        .respond_with(capture.clone())
        .mount(&server)
        .await;

    let destination = plain_destination(1, &format!("{}/hook", server.uri()), "GET");
    let payload = sample_payload();

    dispatcher()
        .deliver_all(&[destination], &payload)
        .await
        .expect("delivery succeeds");

    assert_eq!(capture.request_count(), 1);
    let captured = &capture.requests()[0];
    assert!(captured.body.is_empty(), "GET must not carry a body");
    assert!(captured.url.contains("event=order.created"));
    assert!(captured.url.contains("order_id=4711"));
    assert!(captured.url.contains("paid=true"));
}

/// PUT delivery carries a JSON body like POST.
#[tokio::test]
async fn put_delivery_sends_json_body() {
    let server = MockServer::start().await;
    let capture = CaptureResponder::new();

    Mock::given(method("PUT"))
        .and(path("/hook"))
        .respond_with(capture.clone())
        .mount(&server)
        .await;

    let destination = plain_destination(1, &format!("{}/hook", server.uri()), "Put");
    let payload = sample_payload();

    dispatcher()
        .deliver_all(&[destination], &payload)
        .await
        .expect("delivery succeeds");

    let received: Value = capture.requests()[0].body_json().expect("body is JSON");
    assert_eq!(received, Value::Object(payload));
}

/// DELETE passes method validation and delivers with a JSON body.
#[tokio::test]
async fn delete_delivery_sends_json_body() {
    let server = MockServer::start().await;
    let capture = CaptureResponder::new();

    Mock::given(method("DELETE"))
        .and(path("/hook"))
        .respond_with(capture.clone())
        .mount(&server)
        .await;

    let destination = plain_destination(1, &format!("{}/hook", server.uri()), "DELETE");
    let payload = sample_payload();

    dispatcher()
        .deliver_all(&[destination], &payload)
        .await
        .expect("delivery succeeds");

    let received: Value = capture.requests()[0].body_json().expect("body is JSON");
    assert_eq!(received, Value::Object(payload));
}

/// Zero destinations succeed trivially with no deliveries.
#[tokio::test]
async fn zero_destinations_succeed_trivially() {
    let report = dispatcher()
        .deliver_all(&[], &sample_payload())
        .await
        .expect("empty fanout succeeds");
    assert_eq!(report.delivered, 0);
}

/// The first failing delivery aborts the fanout; later destinations are
/// never attempted.
#[tokio::test]
async fn first_failure_aborts_fanout_before_later_destinations() {
    let failing_server = MockServer::start().await;
    let second_server = MockServer::start().await;

    let failing = CountingResponder::with_status(500);
    let second = CountingResponder::new();

    Mock::given(method("POST"))
        .respond_with(failing.clone())
        .mount(&failing_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(second.clone())
        .mount(&second_server)
        .await;

    let destinations = vec![
        plain_destination(1, &failing_server.uri(), "POST"),
        plain_destination(2, &second_server.uri(), "POST"),
    ];

    let err = dispatcher()
        .deliver_all(&destinations, &sample_payload())
        .await
        .expect_err("fanout must fail");

    match err {
        ApiError::DeliveryFailed { status, url } => {
            assert_eq!(status, 500);
            assert!(url.starts_with(&failing_server.uri()));
        }
        other => panic!("expected DeliveryFailed, got {other:?}"),
    }

    assert_eq!(failing.count(), 1);
    assert_eq!(second.count(), 0, "second destination must never be called");
}

/// An invalid method is fatal for the dispatch and no HTTP call is made.
#[tokio::test]
async fn unsupported_method_fails_without_http_call() {
    let server = MockServer::start().await;
    let counter = CountingResponder::new();

    Mock::given(wiremock::matchers::any())
        .respond_with(counter.clone())
        .mount(&server)
        .await;

    let destination = plain_destination(7, &server.uri(), "patch");

    let err = dispatcher()
        .deliver_all(&[destination], &sample_payload())
        .await
        .expect_err("patch is not deliverable");

    match err {
        ApiError::UnsupportedMethod {
            destination_id,
            method,
        } => {
            assert_eq!(destination_id, 7);
            assert_eq!(method, "patch");
        }
        other => panic!("expected UnsupportedMethod, got {other:?}"),
    }
    assert_eq!(counter.count(), 0);
}

/// Malformed stored headers are fatal before any request is constructed.
#[tokio::test]
async fn malformed_headers_fail_without_http_call() {
    let server = MockServer::start().await;
    let counter = CountingResponder::new();

    Mock::given(wiremock::matchers::any())
        .respond_with(counter.clone())
        .mount(&server)
        .await;

    let mut destination = plain_destination(3, &server.uri(), "POST");
    destination.headers = "not a json object".to_string();

    let err = dispatcher()
        .deliver_all(&[destination], &sample_payload())
        .await
        .expect_err("headers must fail to parse");

    assert!(matches!(
        err,
        ApiError::MalformedDestinationConfig {
            destination_id: 3,
            ..
        }
    ));
    assert_eq!(counter.count(), 0);
}

/// A scheme-less url is normalized to http:// before dispatch.
#[tokio::test]
async fn bare_url_is_normalized_to_http() {
    let server = MockServer::start().await;
    let counter = CountingResponder::new();

    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(counter.clone())
        .mount(&server)
        .await;

    let bare = format!(
        "{}/hook",
        server.uri().trim_start_matches("http://")
    );
    let destination = plain_destination(1, &bare, "POST");

    dispatcher()
        .deliver_all(&[destination], &sample_payload())
        .await
        .expect("normalized url is reachable");

    assert_eq!(counter.count(), 1);
}
