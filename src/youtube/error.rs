use thiserror::Error;

/// YouTube Data API error types
#[derive(Error, Debug)]
pub enum YtError {
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Missing YouTube API configuration: {0}")]
    Config(String),

    #[error("API response parse error: {0}")]
    ParseError(String),

    #[error("YouTube API error: {status} - {message}")]
    ApiError { status: u16, message: String },
}

pub type YtResult<T> = Result<T, YtError>;
