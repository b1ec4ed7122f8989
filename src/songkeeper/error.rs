use thiserror::Error;

/// SongKeeper API error types
#[derive(Error, Debug)]
pub enum SkError {
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("SongKeeper API configuration missing: {0}")]
    Config(String),

    #[error("Invalid SongKeeper base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("API response parse error: {0}")]
    ParseError(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },
}

impl SkError {
    /// Whether the failure came from the remote service rather than from
    /// local configuration. Only these are eligible for stale fallback.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            SkError::Request(_) | SkError::ParseError(_) | SkError::ApiError { .. }
        )
    }
}

pub type SkResult<T> = Result<T, SkError>;
