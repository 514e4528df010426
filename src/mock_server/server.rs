//! Mock Trustpilot API server.
//!
//! Provides an axum-based HTTP server that simulates the Trustpilot API.

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock Trustpilot API server for testing.
///
/// The server runs in the background and can be used to test the client
/// against a realistic API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL as the client's base URL when testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Number of API requests the server has received.
    pub async fn request_count(&self) -> usize {
        self.state.read().await.request_count
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for unit in scenario.business_units {
            state = state.with_business_unit(unit);
        }

        for (id, reviews) in scenario.reviews {
            state = state.with_reviews(&id, reviews);
        }

        for (id, stats) in scenario.statistics {
            state = state.with_statistics(&id, stats);
        }

        state
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            .route("/business-units/find", get(handlers::find_business_unit))
            .route("/business-units/:id", get(handlers::get_business_unit))
            .route("/business-units/:id/reviews", get(handlers::list_reviews))
            .route(
                "/business-units/:id/statistics",
                get(handlers::get_statistics),
            )
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_server::fixtures::{DEFAULT_BUSINESS_UNIT_ID, DEFAULT_DOMAIN};
    use crate::{ClientConfig, TrustpilotClient, TrustpilotError};
    use std::time::Duration;

    fn client_for(server: &MockServer) -> TrustpilotClient {
        let config = ClientConfig::new("test-key")
            .with_base_url(server.url())
            .with_request_delay(Duration::ZERO);
        TrustpilotClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_server_starts_and_responds() {
        let server = MockServer::start().await;

        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/health", server.url()))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_find_with_trustpilot_client() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let found = client
            .find_business_unit(DEFAULT_DOMAIN)
            .await
            .expect("Failed to find business unit");

        assert_eq!(found["businessUnits"][0]["id"], DEFAULT_BUSINESS_UNIT_ID);

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_empty_server() {
        let server = MockServer::start_empty().await;
        let client = client_for(&server);

        let result = client.get_business_unit("nonexistent").await;

        assert!(matches!(result, Err(TrustpilotError::NotFound)));
        assert_eq!(server.request_count().await, 1);

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_custom_state() {
        let state = MockState::new()
            .with_business_unit(Fixtures::business_unit("bu-custom", "custom.io"))
            .with_reviews("bu-custom", Fixtures::reviews(0, 7));

        let server = MockServer::with_state(state).await;
        let client = client_for(&server);

        let page = client
            .get_reviews("bu-custom", 5, 2)
            .await
            .expect("Failed to get reviews");

        assert_eq!(page["reviews"].as_array().unwrap().len(), 2);

        server.shutdown().await;
    }
}
