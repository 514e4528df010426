//! Test data fixtures for the mock server.
//!
//! Provides factory functions for realistic Trustpilot payloads.

use serde_json::json;

use crate::Payload;

/// Id of the business unit in the default scenario.
pub const DEFAULT_BUSINESS_UNIT_ID: &str = "46d6a890000064000500e0c3";

/// Domain of the business unit in the default scenario.
pub const DEFAULT_DOMAIN: &str = "trustpilot.com";

/// Number of reviews in the default scenario (two full pages plus one short).
pub const DEFAULT_REVIEW_COUNT: usize = 242;

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    /// Create a business unit details payload.
    pub fn business_unit(id: &str, domain: &str) -> Payload {
        let display_name = domain.split('.').next().unwrap_or(domain);
        json!({
            "id": id,
            "displayName": capitalize(display_name),
            "name": {
                "identifying": domain,
                "referring": [domain, format!("www.{domain}")]
            },
            "websiteUrl": format!("https://www.{domain}"),
            "country": "DK",
            "numberOfReviews": {
                "total": 0,
                "oneStar": 0,
                "twoStars": 0,
                "threeStars": 0,
                "fourStars": 0,
                "fiveStars": 0
            },
            "trustScore": 4.3,
            "stars": 4.5
        })
    }

    /// Create a statistics payload.
    pub fn statistics(total: usize, average: f64) -> Payload {
        json!({
            "numberOfReviews": { "total": total },
            "trustScore": average,
            "stars": (average * 2.0).round() / 2.0
        })
    }

    /// Create a single review. Star ratings cycle through 1 to 5.
    pub fn review(index: usize) -> Payload {
        json!({
            "id": format!("review-{index:05}"),
            "stars": (index % 5) + 1,
            "title": format!("Review number {index}"),
            "text": format!("This is the text of review {index}."),
            "language": "en",
            "createdAt": "2024-01-15T10:30:00Z",
            "consumer": {
                "id": format!("consumer-{index}"),
                "displayName": format!("Reviewer {index}")
            }
        })
    }

    /// Create `count` consecutive reviews starting at `first`.
    pub fn reviews(first: usize, count: usize) -> Vec<Payload> {
        (first..first + count).map(Self::review).collect()
    }

    /// Business units, statistics and reviews served by a default mock server.
    pub fn default_scenario() -> DefaultScenario {
        let mut business_unit = Self::business_unit(DEFAULT_BUSINESS_UNIT_ID, DEFAULT_DOMAIN);
        business_unit["numberOfReviews"]["total"] = json!(DEFAULT_REVIEW_COUNT);

        DefaultScenario {
            business_units: vec![
                business_unit,
                Self::business_unit("5f1a0c6e9b2d3e0001a1b2c3", "example.com"),
            ],
            reviews: vec![(
                DEFAULT_BUSINESS_UNIT_ID.to_string(),
                Self::reviews(0, DEFAULT_REVIEW_COUNT),
            )],
            statistics: vec![(
                DEFAULT_BUSINESS_UNIT_ID.to_string(),
                Self::statistics(DEFAULT_REVIEW_COUNT, 4.3),
            )],
        }
    }
}

/// Data for the default mock server.
pub struct DefaultScenario {
    pub business_units: Vec<Payload>,
    pub reviews: Vec<(String, Vec<Payload>)>,
    pub statistics: Vec<(String, Payload)>,
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
