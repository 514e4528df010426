//! Trustpilot API client.
//!
//! Every public operation goes through one request executor that applies
//! the authentication headers, the timeout, the inter-request delay and the
//! status-to-error mapping.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Result, TrustpilotError};
use crate::pagination::{ReviewCollection, ReviewsQuery, MAX_PAGE_SIZE};
use crate::payload::{into_reviews, Payload};

/// Header carrying the API key, per Trustpilot's convention.
pub const API_KEY_HEADER: &str = "apikey";

const USER_AGENT: &str = concat!("trustpilot-client/", env!("CARGO_PKG_VERSION"));

/// Trustpilot API client.
///
/// Holds the connection settings and a reusable HTTP connection pool with the
/// API key, JSON content type and user agent installed as default headers.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool, which is safe to use from concurrent tasks.
///
/// # Example
///
/// ```no_run
/// use trustpilot_client::{ClientConfig, TrustpilotClient};
///
/// # async fn example() -> trustpilot_client::Result<()> {
/// let client = TrustpilotClient::new(ClientConfig::new("your-api-key"))?;
/// let found = client.find_business_unit("trustpilot.com").await?;
/// println!("{found}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TrustpilotClient {
    http: Client,
    base_url: Arc<Url>,
    timeout: Duration,
    request_delay: Duration,
}

impl std::fmt::Debug for TrustpilotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrustpilotClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("request_delay", &self.request_delay)
            .finish_non_exhaustive()
    }
}

impl TrustpilotClient {
    /// Create a new client from its configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or not a valid header value,
    /// or if the base URL is invalid.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.api_key().trim().is_empty() {
            return Err(TrustpilotError::ConfigMissing(
                "API key must not be empty".to_string(),
            ));
        }

        // Ensure base URL ends with / so joins keep the version prefix
        let base_url_str = if config.base_url().ends_with('/') {
            config.base_url().to_string()
        } else {
            format!("{}/", config.base_url())
        };
        let base_url = Url::parse(&base_url_str)?;

        let mut key_value = HeaderValue::from_str(config.api_key()).map_err(|_| {
            TrustpilotError::ConfigMissing(
                "API key contains characters not allowed in a header".to_string(),
            )
        })?;
        key_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            timeout: config.timeout(),
            request_delay: config.request_delay(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn request_delay(&self) -> Duration {
        self.request_delay
    }

    /// Find a business unit by its domain name (e.g. `example.com`).
    ///
    /// The returned payload holds a `businessUnits` array of candidates.
    ///
    /// # Errors
    ///
    /// Returns an error if `domain` is empty or the request fails.
    #[tracing::instrument(skip(self))]
    pub async fn find_business_unit(&self, domain: &str) -> Result<Payload> {
        require_non_empty("domain", domain)?;
        self.request("business-units/find", Some(&[("name", domain)]))
            .await
    }

    /// Get the details of a business unit (name, domain, review count,
    /// TrustScore and so on).
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty or the request fails.
    #[tracing::instrument(skip(self))]
    pub async fn get_business_unit(&self, business_unit_id: &str) -> Result<Payload> {
        let path = business_unit_path(business_unit_id, "")?;
        self.request(&path, NO_QUERY).await
    }

    /// Get one page of reviews for a business unit.
    ///
    /// `per_page` is clamped to [`MAX_PAGE_SIZE`]; `page` is 1-indexed.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty, `page` is zero, or the request
    /// fails.
    #[tracing::instrument(skip(self))]
    pub async fn get_reviews(
        &self,
        business_unit_id: &str,
        per_page: u32,
        page: u32,
    ) -> Result<Payload> {
        let path = business_unit_path(business_unit_id, "/reviews")?;
        if page == 0 {
            return Err(TrustpilotError::InvalidArgument(
                "page numbers start at 1".to_string(),
            ));
        }
        self.request(&path, Some(&ReviewsQuery::new(per_page, page)))
            .await
    }

    /// Get aggregate statistics for a business unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty or the request fails.
    #[tracing::instrument(skip(self))]
    pub async fn get_statistics(&self, business_unit_id: &str) -> Result<Payload> {
        let path = business_unit_path(business_unit_id, "/statistics")?;
        self.request(&path, NO_QUERY).await
    }

    /// Get every review of a business unit by walking pages of
    /// [`MAX_PAGE_SIZE`] reviews.
    ///
    /// Pagination stops at the first empty page, at the first short page, or
    /// once `max_pages` pages have been fetched. If a page request fails,
    /// pagination stops and the reviews collected so far are returned with
    /// the error stored in [`ReviewCollection::stopped_early`]; this method
    /// itself never fails.
    #[tracing::instrument(skip(self))]
    pub async fn get_all_reviews(
        &self,
        business_unit_id: &str,
        max_pages: Option<NonZeroU32>,
    ) -> ReviewCollection {
        let mut collection = ReviewCollection::default();
        let mut page: u32 = 1;

        loop {
            if max_pages.is_some_and(|max| page > max.get()) {
                debug!(page, "reached page limit");
                break;
            }

            let response = match self.get_reviews(business_unit_id, MAX_PAGE_SIZE, page).await {
                Ok(response) => response,
                Err(err) => {
                    warn!(page, error = %err, "error fetching reviews page, returning partial results");
                    collection.stopped_early = Some(err);
                    break;
                }
            };
            collection.pages_fetched += 1;

            let reviews = into_reviews(response);
            if reviews.is_empty() {
                break;
            }
            let count = reviews.len();
            collection.reviews.extend(reviews);

            // A short page is the last one
            if count < MAX_PAGE_SIZE as usize {
                break;
            }
            page += 1;
        }

        debug!(
            reviews = collection.len(),
            pages = collection.pages_fetched,
            "finished collecting reviews"
        );
        collection
    }

    /// Send a GET request and decode its JSON body.
    ///
    /// The configured request delay is applied after every exchange,
    /// whatever its outcome.
    #[tracing::instrument(skip(self, query))]
    async fn request<Q: Serialize + ?Sized>(&self, path: &str, query: Option<&Q>) -> Result<Payload> {
        let url = self.base_url.join(path.trim_start_matches('/'))?;
        debug!(url = %url, "GET request");

        let mut request = self.http.get(url);
        if let Some(query) = query {
            request = request.query(query);
        }

        let outcome = match request.send().await {
            Ok(response) => Self::check_response(response).await,
            Err(err) => Err(TrustpilotError::from(err)),
        };

        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }

        outcome
    }

    /// Check response status and convert to a payload or an error.
    async fn check_response(response: Response) -> Result<Payload> {
        let status = response.status();
        debug!(status = status.as_u16(), "response received");

        match status {
            StatusCode::OK => {
                let body = response.text().await?;
                Ok(serde_json::from_str(&body)?)
            }
            StatusCode::UNAUTHORIZED => Err(TrustpilotError::Authentication),
            StatusCode::NOT_FOUND => Err(TrustpilotError::NotFound),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok());
                Err(TrustpilotError::RateLimited {
                    retry_after_secs: retry_after,
                })
            }
            _ => {
                let message = match response.text().await {
                    Ok(body) => body,
                    Err(_) => format!("HTTP {status}"),
                };
                Err(TrustpilotError::Request {
                    status: Some(status.as_u16()),
                    message,
                })
            }
        }
    }
}

const NO_QUERY: Option<&()> = None;

fn require_non_empty(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TrustpilotError::InvalidArgument(format!(
            "{name} must not be empty"
        )));
    }
    Ok(())
}

/// Build `business-units/<id><suffix>` with the id as one encoded segment.
///
/// `.` and `..` are rejected: URL joining resolves them as dot-segments even
/// when percent-encoded, which would address a different endpoint.
fn business_unit_path(business_unit_id: &str, suffix: &str) -> Result<String> {
    require_non_empty("business unit id", business_unit_id)?;
    if matches!(business_unit_id, "." | "..") {
        return Err(TrustpilotError::InvalidArgument(format!(
            "business unit id '{business_unit_id}' is not a valid path segment"
        )));
    }
    Ok(format!(
        "business-units/{}{suffix}",
        urlencoding::encode(business_unit_id)
    ))
}
