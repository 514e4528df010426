//! Response payload helpers.
//!
//! Responses are handed back exactly as decoded. These helpers only read.

/// A decoded JSON response body.
pub type Payload = serde_json::Value;

/// The `reviews` array of a reviews page.
///
/// A missing or non-array `reviews` field reads as empty.
pub fn reviews_in(payload: &Payload) -> &[Payload] {
    payload
        .get("reviews")
        .and_then(Payload::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Take ownership of the `reviews` array of a reviews page.
///
/// Same reading rules as [`reviews_in`].
pub fn into_reviews(payload: Payload) -> Vec<Payload> {
    match payload {
        Payload::Object(mut fields) => match fields.remove("reviews") {
            Some(Payload::Array(reviews)) => reviews,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// The id of the first business unit in a find-business response.
pub fn first_business_unit_id(payload: &Payload) -> Option<&str> {
    payload
        .get("businessUnits")?
        .as_array()?
        .first()?
        .get("id")?
        .as_str()
}
