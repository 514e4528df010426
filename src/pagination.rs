//! Pagination types for the reviews endpoint.

use serde::Serialize;

use crate::error::{Result, TrustpilotError};
use crate::payload::Payload;

/// Largest page size the reviews endpoint accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Query parameters for one page of reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsQuery {
    /// Reviews per page, never above [`MAX_PAGE_SIZE`].
    pub per_page: u32,
    /// Page number (1-indexed).
    pub page: u32,
}

impl ReviewsQuery {
    /// Build the query for a page, clamping the page size to [`MAX_PAGE_SIZE`].
    #[must_use]
    pub fn new(per_page: u32, page: u32) -> Self {
        Self {
            per_page: per_page.min(MAX_PAGE_SIZE),
            page,
        }
    }
}

/// Reviews gathered across pages by
/// [`TrustpilotClient::get_all_reviews`](crate::TrustpilotClient::get_all_reviews).
///
/// A failed page request ends pagination without discarding what was already
/// collected. That failure is kept in `stopped_early` so callers that need a
/// complete set can tell a partial result apart from a finished one.
#[derive(Debug, Default)]
pub struct ReviewCollection {
    /// Reviews in page order.
    pub reviews: Vec<Payload>,
    /// Number of pages successfully fetched.
    pub pages_fetched: u32,
    /// The error that stopped pagination, if any.
    pub stopped_early: Option<TrustpilotError>,
}

impl ReviewCollection {
    /// Returns true if pagination ran to its natural end (or the page limit).
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.stopped_early.is_none()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Payload> {
        self.reviews.iter()
    }

    /// Convert into the reviews, failing if pagination stopped on an error.
    ///
    /// # Errors
    ///
    /// Returns the error that interrupted pagination.
    pub fn into_result(self) -> Result<Vec<Payload>> {
        match self.stopped_early {
            Some(err) => Err(err),
            None => Ok(self.reviews),
        }
    }
}

impl IntoIterator for ReviewCollection {
    type Item = Payload;
    type IntoIter = std::vec::IntoIter<Payload>;

    fn into_iter(self) -> Self::IntoIter {
        self.reviews.into_iter()
    }
}

impl<'a> IntoIterator for &'a ReviewCollection {
    type Item = &'a Payload;
    type IntoIter = std::slice::Iter<'a, Payload>;

    fn into_iter(self) -> Self::IntoIter {
        self.reviews.iter()
    }
}
