//! HTTP request handlers for the mock server.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;
use crate::API_KEY_HEADER;

type SharedState = State<Arc<RwLock<MockState>>>;

/// Query parameters for the find endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct FindQuery {
    pub name: Option<String>,
}

/// Query parameters for the reviews endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsPageQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

/// GET /business-units/find?name={domain}
pub async fn find_business_unit(
    State(state): SharedState,
    headers: HeaderMap,
    Query(query): Query<FindQuery>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = record_and_authorize(&mut state, &headers) {
        return rejection;
    }

    let domain = query.name.unwrap_or_default();
    if domain.is_empty() {
        return not_found("No domain given".to_string());
    }
    let units: Vec<_> = state.find_by_domain(&domain).into_iter().cloned().collect();
    if units.is_empty() {
        return not_found(format!("No business unit found for domain: {domain}"));
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({ "businessUnits": units })),
    )
        .into_response()
}

/// GET /business-units/{id}
pub async fn get_business_unit(
    State(state): SharedState,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = record_and_authorize(&mut state, &headers) {
        return rejection;
    }

    match state.get_business_unit(&id) {
        Some(unit) => (StatusCode::OK, Json(unit.clone())).into_response(),
        None => not_found(format!("No business unit with id: {id}")),
    }
}

/// GET /business-units/{id}/reviews?perPage={n}&page={p}
pub async fn list_reviews(
    State(state): SharedState,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(query): Query<ReviewsPageQuery>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = record_and_authorize(&mut state, &headers) {
        return rejection;
    }

    let per_page = query.per_page.unwrap_or(20);
    let page = query.page.unwrap_or(1);

    if state.rate_limited_pages.contains(&page) {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            [("retry-after", "1")],
            Json(serde_json::json!({ "message": "Too many requests" })),
        )
            .into_response();
    }

    match state.reviews_page(&id, per_page, page) {
        Some(reviews) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "reviews": reviews,
                "links": []
            })),
        )
            .into_response(),
        None => not_found(format!("No business unit with id: {id}")),
    }
}

/// GET /business-units/{id}/statistics
pub async fn get_statistics(
    State(state): SharedState,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = record_and_authorize(&mut state, &headers) {
        return rejection;
    }

    match state.get_statistics(&id) {
        Some(stats) => (StatusCode::OK, Json(stats.clone())).into_response(),
        None => not_found(format!("No statistics for business unit: {id}")),
    }
}

/// Count the request and reject it if the API key does not match.
fn record_and_authorize(state: &mut MockState, headers: &HeaderMap) -> Result<(), Response> {
    state.request_count += 1;

    let presented = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
    if state.accepts_api_key(presented) {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "message": "Invalid API key" })),
        )
            .into_response())
    }
}

fn not_found(message: String) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "Not found",
            "message": message
        })),
    )
        .into_response()
}
