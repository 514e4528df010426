//! Mock Trustpilot API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the
//! Trustpilot API for integration and end-to-end testing. Unlike wiremock
//! which mocks at the HTTP level per-test, this server keeps state across
//! requests: paged reviews, API key checks, rate-limited pages and a request
//! counter.
//!
//! # Example
//!
//! ```ignore
//! use trustpilot_client::mock_server::MockServer;
//! use trustpilot_client::{ClientConfig, TrustpilotClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let config = ClientConfig::new("test-key").with_base_url(server.url());
//!     let client = TrustpilotClient::new(config).unwrap();
//!
//!     // Server comes with default fixtures
//!     let found = client.find_business_unit("trustpilot.com").await.unwrap();
//!     assert_eq!(found["businessUnits"][0]["displayName"], "Trustpilot");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::MockState;
