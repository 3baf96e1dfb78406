use http::StatusCode;
use thiserror::Error;

/// Result type alias for AF API calls
pub type Result<T, E = ClientError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{resource} not found: {url}")]
    NotFound { resource: &'static str, url: String },

    #[error("{resource} request failed with status {status}: {body}")]
    UnexpectedStatus {
        resource: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode {resource} response: {reason}")]
    Decode {
        resource: &'static str,
        reason: String,
    },

    #[error("Base URL cannot be extended with a path: {0}")]
    InvalidBaseUrl(String),

    #[error("PFD schema error: {0}")]
    Schema(#[from] pfd::SchemaError),

    #[error("Form rejected: {0}")]
    Validation(#[from] pfd::ValidationError),
}
