//! E2E tests using the mock Trustpilot server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use std::num::NonZeroU32;
use std::time::Duration;

use trustpilot_client::mock_server::{Fixtures, MockServer, MockState};
use trustpilot_client::output::RatingSummary;
use trustpilot_client::{
    first_business_unit_id, reviews_in, ClientConfig, TrustpilotClient, TrustpilotError,
};

const BUSINESS_UNIT_ID: &str = "46d6a890000064000500e0c3";

fn client_for(server: &MockServer, api_key: &str) -> TrustpilotClient {
    let config = ClientConfig::new(api_key)
        .with_base_url(server.url())
        .with_request_delay(Duration::ZERO);
    TrustpilotClient::new(config).unwrap()
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_client_after_shutdown_gets_connection_error() {
    let server = MockServer::start().await;
    let client = client_for(&server, "test-key");

    server.shutdown().await;

    let err = client.get_business_unit(BUSINESS_UNIT_ID).await.unwrap_err();
    assert!(matches!(err, TrustpilotError::Connection(_)), "got {err:?}");
}

// =============================================================================
// Lookup Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_find_then_details_then_statistics() {
    let server = MockServer::start().await;
    let client = client_for(&server, "test-key");

    // Step 1: Find the business by domain
    let found = client
        .find_business_unit("trustpilot.com")
        .await
        .expect("Failed to find business unit");
    let id = first_business_unit_id(&found).expect("No business unit id");
    assert_eq!(id, BUSINESS_UNIT_ID);

    // Step 2: Get its details
    let details = client
        .get_business_unit(id)
        .await
        .expect("Failed to get details");
    assert_eq!(details["displayName"], "Trustpilot");
    assert_eq!(details["numberOfReviews"]["total"], 242);

    // Step 3: Get its statistics
    let stats = client.get_statistics(id).await.expect("Failed to get stats");
    assert_eq!(stats["numberOfReviews"]["total"], 242);

    assert_eq!(server.request_count().await, 3);

    server.shutdown().await;
}

#[tokio::test]
async fn test_unknown_domain_not_found() {
    let server = MockServer::start().await;
    let client = client_for(&server, "test-key");

    let result = client.find_business_unit("nowhere.invalid").await;
    assert!(matches!(result, Err(TrustpilotError::NotFound)));

    server.shutdown().await;
}

#[tokio::test]
async fn test_wrong_api_key_rejected() {
    let state = MockState::new()
        .with_required_api_key("right-key")
        .with_business_unit(Fixtures::business_unit("bu-1", "example.com"));
    let server = MockServer::with_state(state).await;

    let rejected = client_for(&server, "wrong-key");
    assert!(matches!(
        rejected.get_business_unit("bu-1").await,
        Err(TrustpilotError::Authentication)
    ));

    let accepted = client_for(&server, "right-key");
    assert!(accepted.get_business_unit("bu-1").await.is_ok());

    server.shutdown().await;
}

// =============================================================================
// Review Pagination Tests
// =============================================================================

#[tokio::test]
async fn test_recent_reviews_page() {
    let server = MockServer::start().await;
    let client = client_for(&server, "test-key");

    let page = client
        .get_reviews(BUSINESS_UNIT_ID, 3, 1)
        .await
        .expect("Failed to get reviews");

    let reviews = reviews_in(&page);
    assert_eq!(reviews.len(), 3);
    assert_eq!(reviews[0]["id"], "review-00000");

    server.shutdown().await;
}

#[tokio::test]
async fn test_all_reviews_across_pages() {
    let server = MockServer::start().await;
    let client = client_for(&server, "test-key");

    let collection = client.get_all_reviews(BUSINESS_UNIT_ID, None).await;

    assert!(collection.is_complete());
    assert_eq!(collection.len(), 242);
    assert_eq!(collection.pages_fetched, 3);
    assert_eq!(server.request_count().await, 3);

    let summary = RatingSummary::from_reviews(&collection);
    assert_eq!(summary.count, 242);
    assert_eq!(summary.distribution.values().sum::<usize>(), 242);

    server.shutdown().await;
}

#[tokio::test]
async fn test_all_reviews_with_page_limit() {
    let server = MockServer::start().await;
    let client = client_for(&server, "test-key");

    let collection = client
        .get_all_reviews(BUSINESS_UNIT_ID, NonZeroU32::new(2))
        .await;

    assert_eq!(collection.len(), 200);
    assert_eq!(server.request_count().await, 2);

    server.shutdown().await;
}

#[tokio::test]
async fn test_all_reviews_rate_limited_midway() {
    let state = MockState::new()
        .with_business_unit(Fixtures::business_unit("bu-1", "example.com"))
        .with_reviews("bu-1", Fixtures::reviews(0, 242))
        .with_rate_limited_page(2);
    let server = MockServer::with_state(state).await;
    let client = client_for(&server, "test-key");

    let collection = client.get_all_reviews("bu-1", None).await;

    assert_eq!(collection.len(), 100);
    assert!(matches!(
        collection.stopped_early,
        Some(TrustpilotError::RateLimited {
            retry_after_secs: Some(1)
        })
    ));
    assert_eq!(server.request_count().await, 2);

    server.shutdown().await;
}

#[tokio::test]
async fn test_state_changes_between_requests() {
    let server = MockServer::start_empty().await;
    let client = client_for(&server, "test-key");

    assert!(matches!(
        client.get_statistics("bu-late").await,
        Err(TrustpilotError::NotFound)
    ));

    {
        let state = server.state();
        let mut state = state.write().await;
        state
            .statistics
            .insert("bu-late".to_string(), Fixtures::statistics(5, 3.0));
    }

    let stats = client.get_statistics("bu-late").await.unwrap();
    assert_eq!(stats["numberOfReviews"]["total"], 5);

    server.shutdown().await;
}
