use storefront_core::error::{Error, Result};
use storefront_core::types::{Rating, ReviewPayload};

/// Build the request body, or name every missing field.
///
/// Whitespace-only text counts as missing. Values are sent as typed.
pub fn validate(display_name: &str, rating: Option<Rating>, review_text: &str) -> Result<ReviewPayload> {
    let mut missing = Vec::new();
    if display_name.trim().is_empty() {
        missing.push("displayName");
    }
    if rating.is_none() {
        missing.push("rating");
    }
    if review_text.trim().is_empty() {
        missing.push("reviewText");
    }
    match rating {
        Some(rating) if missing.is_empty() => Ok(ReviewPayload {
            display_name: display_name.to_string(),
            rating,
            review_text: review_text.to_string(),
        }),
        _ => Err(Error::MissingFields(missing)),
    }
}
