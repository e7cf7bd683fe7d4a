//! Retry behavior over real HTTP.
//!
//! Complements the unit tests in `retry.rs` (which pin the backoff
//! schedule against a paused clock) by verifying the policy end to end:
//! which responses trigger retries, which fail fast, and how many requests
//! actually hit the server.

use std::time::Duration;

use psaclient::entities::Tickets;
use psaclient::{Create, Get, PsaClient, Record, RetryConfig};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_retry() -> RetryConfig {
    RetryConfig {
        retries: 3,
        base_delay: Duration::from_millis(10),
        max_delay: Duration::from_millis(100),
    }
}

#[tokio::test]
async fn test_get_retries_transient_failures_then_succeeds() {
    let mock_server = MockServer::start().await;

    // First two attempts fail with 503, then the happy path takes over.
    Mock::given(method("GET"))
        .and(path("/Tickets/1"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Tickets/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"item": {"id": 1}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PsaClient::new("test-token", &mock_server.uri())
        .unwrap()
        .with_retry(fast_retry());

    let record = Tickets::get(&client, 1).await.unwrap();
    assert_eq!(record.id, Some(1));
}

#[tokio::test]
async fn test_get_exhausts_retry_budget() {
    let mock_server = MockServer::start().await;

    // retries = 3, so 4 attempts total before giving up.
    Mock::given(method("GET"))
        .and(path("/Tickets/1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .expect(4)
        .mount(&mock_server)
        .await;

    let client = PsaClient::new("test-token", &mock_server.uri())
        .unwrap()
        .with_retry(fast_retry());

    let err = Tickets::get(&client, 1).await.unwrap_err();
    match err {
        psaclient::PsaError::Api {
            message,
            status_code,
        } => {
            assert_eq!(message, "boom");
            assert_eq!(status_code, Some(500));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Tickets/1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PsaClient::new("test-token", &mock_server.uri())
        .unwrap()
        .with_retry(fast_retry());

    let err = Tickets::get(&client, 1).await.unwrap_err();
    assert!(matches!(
        err,
        psaclient::PsaError::Api {
            status_code: Some(404),
            ..
        }
    ));
}

#[tokio::test]
async fn test_create_is_never_retried() {
    let mock_server = MockServer::start().await;

    // Even a retryable status must not re-issue a create.
    Mock::given(method("POST"))
        .and(path("/Tickets"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PsaClient::new("test-token", &mock_server.uri())
        .unwrap()
        .with_retry(fast_retry());

    let result = Tickets::create(&client, &Record::new().field("title", "X")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_rate_limit_reports_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Tickets/1"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
        .mount(&mock_server)
        .await;

    let client = PsaClient::new("test-token", &mock_server.uri())
        .unwrap()
        .with_retry(RetryConfig::disabled());

    let err = Tickets::get(&client, 1).await.unwrap_err();
    assert!(matches!(
        err,
        psaclient::PsaError::RateLimited {
            retry_after_secs: Some(7)
        }
    ));
}
