//! Trustpilot API client library.
//!
//! A small Rust client for Trustpilot's public REST API: business lookup,
//! business-unit details, paginated reviews and statistics. Responses are
//! returned as the decoded JSON document, untouched.
//!
//! # Quick Start
//!
//! ```no_run
//! use trustpilot_client::{first_business_unit_id, ClientConfig, TrustpilotClient};
//!
//! #[tokio::main]
//! async fn main() -> trustpilot_client::Result<()> {
//!     let client = TrustpilotClient::new(ClientConfig::new("your-api-key"))?;
//!
//!     // Look up a business by domain
//!     let found = client.find_business_unit("trustpilot.com").await?;
//!     let Some(id) = first_business_unit_id(&found) else {
//!         return Ok(());
//!     };
//!
//!     // Fetch the first three pages of reviews
//!     let reviews = client.get_all_reviews(id, std::num::NonZeroU32::new(3)).await;
//!     println!("Fetched {} reviews", reviews.len());
//!     if let Some(err) = &reviews.stopped_early {
//!         eprintln!("stopped early: {err}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Every operation fails with a [`TrustpilotError`]. HTTP 401, 404 and 429
//! map to `Authentication`, `NotFound` and `RateLimited`; other statuses
//! map to `Request` carrying the status and raw body. Transport failures map
//! to `Timeout`, `Connection` or `Request`.
//!
//! [`TrustpilotClient::get_all_reviews`] is the exception: a failed page
//! ends pagination and the reviews gathered so far are returned along with
//! the error in [`ReviewCollection::stopped_early`].
//!
//! # Configuration
//!
//! The library reads no environment variables. [`ClientConfig`] takes the API
//! key and optionally a base URL (defaults to `https://api.trustpilot.com/v1`),
//! a timeout (30 seconds) and a pause applied after every request (100 ms).

pub mod cli;
mod client;
mod config;
mod error;
pub mod output;
mod pagination;
mod payload;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{TrustpilotClient, API_KEY_HEADER};
pub use config::{ClientConfig, DEFAULT_API_URL, DEFAULT_REQUEST_DELAY, DEFAULT_TIMEOUT};
pub use error::{ErrorKind, Result, TrustpilotError};
pub use pagination::{ReviewCollection, ReviewsQuery, MAX_PAGE_SIZE};
pub use payload::{first_business_unit_id, into_reviews, reviews_in, Payload};
