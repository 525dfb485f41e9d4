use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid catalog: {0}")]
    Catalog(String),

    #[error("Missing review fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("A review submission is already in flight")]
    SubmissionInFlight,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
