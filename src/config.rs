//! Client configuration.

use std::time::Duration;

/// Default base URL of the Trustpilot public API.
pub const DEFAULT_API_URL: &str = "https://api.trustpilot.com/v1";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default pause after every request.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(100);

/// Connection settings for a [`TrustpilotClient`](crate::TrustpilotClient).
///
/// The configuration is consumed by the client at construction and never
/// changes afterwards.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use trustpilot_client::ClientConfig;
///
/// let config = ClientConfig::new("your-api-key")
///     .with_timeout(Duration::from_secs(10))
///     .with_request_delay(Duration::from_millis(250));
///
/// assert_eq!(config.base_url(), "https://api.trustpilot.com/v1");
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    timeout: Duration,
    request_delay: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("request_delay", &self.request_delay)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    /// Create a configuration with the default base URL, timeout and delay.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            request_delay: DEFAULT_REQUEST_DELAY,
        }
    }

    /// Point the client at a different API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the pause applied after every request, successful or not.
    #[must_use]
    pub fn with_request_delay(mut self, request_delay: Duration) -> Self {
        self.request_delay = request_delay;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn request_delay(&self) -> Duration {
        self.request_delay
    }
}
