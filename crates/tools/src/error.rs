use thiserror::Error;

/// Errors from screening listings against a buyer profile.
///
/// Per-listing problems (a malformed price) never show up here; they become
/// a gray classification on that listing only.
#[derive(Debug, Error)]
pub enum ScreeningError {
    #[error("listing source failed: {0}")]
    Source(String),

    #[error("preference store failed: {0}")]
    Store(String),

    #[error("no buyer profile for user {0}")]
    ProfileNotFound(String),

    #[error("invalid month {0:?}, expected YYYY-MM")]
    InvalidMonth(String),

    #[error("failed to decode listings: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
