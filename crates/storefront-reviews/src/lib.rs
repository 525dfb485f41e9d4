//! storefront-reviews
//!
//! The review form: star rating, required-field check, submission to the
//! storage endpoint, and the card that appears once the server acknowledges.
pub mod card;
pub mod form;
#[cfg(feature = "http")]
pub mod http;
pub mod panel;
pub mod rating;

pub use panel::{ReviewPanel, SubmitOutcome};
pub use rating::StarRating;

/// Shown when a required field is missing.
pub const MISSING_FIELDS_ALERT: &str = "Please fill in all fields and select a rating.";
/// Shown after the server acknowledges a review.
pub const THANK_YOU_ALERT: &str = "Thank you for your review!";
/// Shown on any transport or server failure.
pub const SUBMIT_FAILED_ALERT: &str = "Error submitting review. Please try again.";
/// Shown when the form is submitted again before the first request returns.
pub const IN_FLIGHT_ALERT: &str = "Your review is still being submitted.";
