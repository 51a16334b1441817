use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single call to the environments service.
///
/// None of these are fatal to the console; callers log them and move on.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("environment id {id:?} cannot be addressed as a path segment")]
    InvalidId { id: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("malformed environment list from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Short label for the error class, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidBaseUrl { .. } => "config",
            ApiError::InvalidId { .. } => "id",
            ApiError::Transport { .. } => "transport",
            ApiError::Status { .. } => "status",
            ApiError::Decode { .. } => "decode",
        }
    }
}
