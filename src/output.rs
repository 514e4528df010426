//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output as an
//! alternative to JSON, plus table rows and rating summaries for reviews.
//! Placeholder values such as `N/A` are only ever introduced here.

use std::collections::BTreeMap;

use serde::Serialize;
use tabled::Tabled;
use thiserror::Error;

use crate::payload::Payload;

const NOT_AVAILABLE: &str = "N/A";

/// Trait for human-readable key-value output.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

/// Business-unit details payload, viewed for display.
pub struct BusinessView<'a>(pub &'a Payload);

/// A single review payload, viewed for display.
pub struct ReviewView<'a>(pub &'a Payload);

impl PrettyPrint for BusinessView<'_> {
    fn pretty_print(&self) -> String {
        let name = display_field(self.0, &["displayName"]);
        let divider = "─".repeat(name.chars().count().max(30));

        let lines = [
            format!("Business: {}", name),
            divider,
            format!("ID:             {}", display_field(self.0, &["id"])),
            format!(
                "Domain:         {}",
                display_first(self.0, &[&["name", "identifying"], &["domain"]])
            ),
            format!("Website:        {}", display_field(self.0, &["websiteUrl"])),
            format!(
                "Total Reviews:  {}",
                display_first(self.0, &[&["numberOfReviews", "total"], &["numberOfReviews"]])
            ),
            format!("TrustScore:     {}", display_field(self.0, &["trustScore"])),
            format!("Stars:          {}", display_field(self.0, &["stars"])),
        ];

        lines.join("\n")
    }
}

impl PrettyPrint for ReviewView<'_> {
    fn pretty_print(&self) -> String {
        let review = self.0;
        let stars = review.get("stars").and_then(Payload::as_u64).unwrap_or(0);

        [
            format!("Title:  {}", text_field(review, &["title"], "No title")),
            format!(
                "Author: {}",
                text_field(review, &["consumer", "displayName"], "Anonymous")
            ),
            format!("Rating: {}/5 stars", stars),
            format!("Date:   {}", text_field(review, &["createdAt"], "Unknown date")),
            format!("Review: {}", text_field(review, &["text"], "No text")),
            "=".repeat(50),
        ]
        .join("\n")
    }
}

/// Table row for a review.
#[derive(Debug, Tabled)]
pub struct ReviewRow {
    pub stars: String,
    pub author: String,
    pub date: String,
    pub title: String,
}

impl From<&Payload> for ReviewRow {
    fn from(review: &Payload) -> Self {
        Self {
            stars: display_field(review, &["stars"]),
            author: text_field(review, &["consumer", "displayName"], "Anonymous"),
            date: display_field(review, &["createdAt"]),
            title: truncate(&display_field(review, &["title"]), 60),
        }
    }
}

/// Average rating and star distribution over a set of reviews.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingSummary {
    pub count: usize,
    pub average: f64,
    /// Number of reviews per star rating.
    pub distribution: BTreeMap<u64, usize>,
}

impl RatingSummary {
    /// Summarize reviews, counting a missing `stars` field as 0.
    pub fn from_reviews<'a, I>(reviews: I) -> Self
    where
        I: IntoIterator<Item = &'a Payload>,
    {
        let mut distribution = BTreeMap::new();
        let mut count = 0usize;
        let mut total = 0u64;

        for review in reviews {
            let stars = review.get("stars").and_then(Payload::as_u64).unwrap_or(0);
            *distribution.entry(stars).or_insert(0) += 1;
            total += stars;
            count += 1;
        }

        let average = if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        };

        Self {
            count,
            average,
            distribution,
        }
    }
}

impl PrettyPrint for RatingSummary {
    fn pretty_print(&self) -> String {
        let distribution = self
            .distribution
            .iter()
            .map(|(stars, n)| format!("{stars}★: {n}"))
            .collect::<Vec<_>>()
            .join(", ");

        [
            format!("Total reviews fetched: {}", self.count),
            format!("Average rating:        {:.2}", self.average),
            format!("Rating distribution:   {}", distribution),
        ]
        .join("\n")
    }
}

/// Failure to render output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize output: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Render a value as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if the value cannot be represented as JSON.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, OutputError> {
    serde_json::to_string_pretty(value).map_err(OutputError::Serialize)
}

fn lookup<'a>(payload: &'a Payload, path: &[&str]) -> Option<&'a Payload> {
    path.iter().try_fold(payload, |value, key| value.get(key))
}

/// Render a nested field for display, `N/A` when absent or null.
fn display_field(payload: &Payload, path: &[&str]) -> String {
    match lookup(payload, path) {
        None | Some(Payload::Null) => NOT_AVAILABLE.to_string(),
        Some(Payload::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Render the first path that holds a scalar, `N/A` if none does.
fn display_first(payload: &Payload, paths: &[&[&str]]) -> String {
    paths
        .iter()
        .find(|path| {
            matches!(
                lookup(payload, path),
                Some(value) if !value.is_null() && !value.is_object() && !value.is_array()
            )
        })
        .map(|path| display_field(payload, path))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn text_field(payload: &Payload, path: &[&str], fallback: &str) -> String {
    lookup(payload, path)
        .and_then(Payload::as_str)
        .unwrap_or(fallback)
        .to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{cut}…")
}
