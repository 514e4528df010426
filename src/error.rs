//! Error types for Trustpilot API operations.

use thiserror::Error;

/// Errors that can occur during Trustpilot API operations.
///
/// Every failure a request can produce is a variant of this one enum, so
/// callers branch on the variant (or on [`TrustpilotError::kind`]) instead of
/// juggling unrelated error types.
#[derive(Debug, Error)]
pub enum TrustpilotError {
    /// HTTP 401: the API key was rejected.
    #[error("Invalid API key or unauthorized access")]
    Authentication,

    /// HTTP 404.
    #[error("Resource not found")]
    NotFound,

    /// HTTP 429.
    #[error("Rate limit exceeded, wait before making more requests")]
    RateLimited { retry_after_secs: Option<u64> },

    /// The request did not complete within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The connection to the API could not be established.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Any other failed request.
    ///
    /// `status` is set for unexpected HTTP statuses, in which case `message`
    /// is the raw response body. It is `None` for transport failures.
    #[error("{}", request_failure(*status, message))]
    Request {
        status: Option<u16>,
        message: String,
    },

    /// A 200 response whose body was not valid JSON.
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configuration is missing or incomplete.
    #[error("Trustpilot configuration required: {0}")]
    ConfigMissing(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// An argument was rejected before any request was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

fn request_failure(status: Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("API request failed with status {code}: {message}"),
        None => format!("Request failed: {message}"),
    }
}

/// Fieldless discriminant of [`TrustpilotError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Authentication,
    NotFound,
    RateLimited,
    Timeout,
    Connection,
    Request,
    Decode,
    ConfigMissing,
    InvalidUrl,
    InvalidArgument,
}

impl TrustpilotError {
    /// The kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication => ErrorKind::Authentication,
            Self::NotFound => ErrorKind::NotFound,
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            Self::Timeout => ErrorKind::Timeout,
            Self::Connection(_) => ErrorKind::Connection,
            Self::Request { .. } => ErrorKind::Request,
            Self::Decode(_) => ErrorKind::Decode,
            Self::ConfigMissing(_) => ErrorKind::ConfigMissing,
            Self::InvalidUrl(_) => ErrorKind::InvalidUrl,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
        }
    }

    /// The HTTP status behind this error, if it came from a response.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Authentication => Some(401),
            Self::NotFound => Some(404),
            Self::RateLimited { .. } => Some(429),
            Self::Request { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TrustpilotError {
    fn from(err: reqwest::Error) -> Self {
        // Timeout first: reqwest can flag a connect timeout as both.
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else {
            Self::Request {
                status: None,
                message: err.to_string(),
            }
        }
    }
}

/// Result type alias for Trustpilot operations.
pub type Result<T> = core::result::Result<T, TrustpilotError>;
