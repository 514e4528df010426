//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Trustpilot API server.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::Payload;

/// Shared state for the mock server.
///
/// Holds all the mock data that the server will serve. It's wrapped in
/// `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Business-unit detail payloads indexed by id, iterated in id order.
    pub business_units: BTreeMap<String, Payload>,

    /// Reviews per business-unit id, in the order they are served.
    pub reviews: HashMap<String, Vec<Payload>>,

    /// Statistics payloads indexed by business-unit id.
    pub statistics: HashMap<String, Payload>,

    /// If set, requests must carry this value in the `apikey` header.
    pub required_api_key: Option<String>,

    /// Review page numbers that answer with HTTP 429.
    pub rate_limited_pages: HashSet<u32>,

    /// Number of API requests received (health checks excluded).
    pub request_count: usize,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a business unit, keyed by its `id` field.
    pub fn with_business_unit(mut self, business_unit: Payload) -> Self {
        if let Some(id) = business_unit.get("id").and_then(Payload::as_str) {
            self.business_units.insert(id.to_string(), business_unit);
        }
        self
    }

    /// Set the reviews of a business unit.
    pub fn with_reviews(mut self, business_unit_id: &str, reviews: Vec<Payload>) -> Self {
        self.reviews.insert(business_unit_id.to_string(), reviews);
        self
    }

    /// Set the statistics of a business unit.
    pub fn with_statistics(mut self, business_unit_id: &str, statistics: Payload) -> Self {
        self.statistics
            .insert(business_unit_id.to_string(), statistics);
        self
    }

    /// Set the required API key.
    pub fn with_required_api_key(mut self, api_key: &str) -> Self {
        self.required_api_key = Some(api_key.to_string());
        self
    }

    /// Make a review page answer with 429.
    pub fn with_rate_limited_page(mut self, page: u32) -> Self {
        self.rate_limited_pages.insert(page);
        self
    }

    /// Check a presented API key against the required one.
    pub fn accepts_api_key(&self, presented: Option<&str>) -> bool {
        match &self.required_api_key {
            Some(required) => presented == Some(required.as_str()),
            None => true,
        }
    }

    /// Find business units whose identifying name or website matches a domain.
    ///
    /// Matches are returned in id order.
    pub fn find_by_domain(&self, domain: &str) -> Vec<&Payload> {
        let domain = domain.to_lowercase();
        self.business_units
            .values()
            .filter(|unit| {
                let identifying = unit
                    .get("name")
                    .and_then(|n| n.get("identifying"))
                    .and_then(Payload::as_str);
                let website = unit.get("websiteUrl").and_then(Payload::as_str);
                identifying.is_some_and(|name| name.eq_ignore_ascii_case(&domain))
                    || website.is_some_and(|url| url.to_lowercase().contains(&domain))
            })
            .collect()
    }

    /// Get a business unit by id.
    pub fn get_business_unit(&self, id: &str) -> Option<&Payload> {
        self.business_units.get(id)
    }

    /// Get statistics for a business unit.
    pub fn get_statistics(&self, id: &str) -> Option<&Payload> {
        self.statistics.get(id)
    }

    /// Slice one page of reviews. `None` if the business unit is unknown.
    pub fn reviews_page(&self, id: &str, per_page: u32, page: u32) -> Option<&[Payload]> {
        self.get_business_unit(id)?;
        let all = self.reviews.get(id).map(Vec::as_slice).unwrap_or_default();

        let start = (page.saturating_sub(1) as usize)
            .saturating_mul(per_page as usize)
            .min(all.len());
        let end = start.saturating_add(per_page as usize).min(all.len());
        Some(&all[start..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_server::Fixtures;

    #[test]
    fn test_state_add_and_get_business_unit() {
        let state =
            MockState::new().with_business_unit(Fixtures::business_unit("bu-1", "example.com"));

        let unit = state.get_business_unit("bu-1");
        assert!(unit.is_some());
        assert_eq!(unit.unwrap()["name"]["identifying"], "example.com");
    }

    #[test]
    fn test_state_find_by_domain() {
        let state = MockState::new()
            .with_business_unit(Fixtures::business_unit("bu-1", "alpha.com"))
            .with_business_unit(Fixtures::business_unit("bu-2", "beta.com"));

        assert_eq!(state.find_by_domain("ALPHA.com").len(), 1);
        assert_eq!(state.find_by_domain("beta.com").len(), 1);
        assert!(state.find_by_domain("gamma.com").is_empty());
    }

    #[test]
    fn test_state_find_by_domain_orders_by_id() {
        let state = MockState::new()
            .with_business_unit(Fixtures::business_unit("bu-3", "example.com"))
            .with_business_unit(Fixtures::business_unit("bu-1", "example.com"))
            .with_business_unit(Fixtures::business_unit("bu-2", "example.com"));

        let ids: Vec<&str> = state
            .find_by_domain("example.com")
            .into_iter()
            .filter_map(|unit| unit["id"].as_str())
            .collect();
        assert_eq!(ids, ["bu-1", "bu-2", "bu-3"]);
    }

    #[test]
    fn test_state_with_statistics() {
        let state = MockState::new().with_statistics("bu-1", Fixtures::statistics(5, 3.0));

        assert_eq!(
            state.get_statistics("bu-1").unwrap()["numberOfReviews"]["total"],
            5
        );
        assert!(state.get_statistics("bu-2").is_none());
    }

    #[test]
    fn test_state_reviews_page_slicing() {
        let state = MockState::new()
            .with_business_unit(Fixtures::business_unit("bu-1", "example.com"))
            .with_reviews("bu-1", Fixtures::reviews(0, 25));

        assert_eq!(state.reviews_page("bu-1", 10, 1).unwrap().len(), 10);
        assert_eq!(state.reviews_page("bu-1", 10, 3).unwrap().len(), 5);
        assert!(state.reviews_page("bu-1", 10, 4).unwrap().is_empty());
        assert!(state.reviews_page("missing", 10, 1).is_none());
    }

    #[test]
    fn test_state_api_key_check() {
        let open = MockState::new();
        assert!(open.accepts_api_key(None));

        let locked = MockState::new().with_required_api_key("secret");
        assert!(locked.accepts_api_key(Some("secret")));
        assert!(!locked.accepts_api_key(Some("wrong")));
        assert!(!locked.accepts_api_key(None));
    }
}
