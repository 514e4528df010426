//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use serde_json::{json, Value};
use trustpilot_client::{ClientConfig, TrustpilotClient};

pub const API_KEY: &str = "test-key";

/// Client pointed at `base_url` with no inter-request delay.
pub fn client(base_url: &str) -> TrustpilotClient {
    let config = ClientConfig::new(API_KEY)
        .with_base_url(base_url)
        .with_request_delay(Duration::ZERO);
    TrustpilotClient::new(config).unwrap()
}

/// `count` numbered reviews starting at `first`.
pub fn reviews(first: usize, count: usize) -> Vec<Value> {
    (first..first + count)
        .map(|i| json!({ "id": format!("r{i}"), "stars": (i % 5) + 1 }))
        .collect()
}

pub fn reviews_page(first: usize, count: usize) -> Value {
    json!({ "reviews": reviews(first, count), "links": [] })
}
