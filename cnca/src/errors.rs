use crate::config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] af_client::ClientError),

    #[error(transparent)]
    Schema(#[from] pfd::SchemaError),

    #[error("Form rejected: {0}")]
    Validation(#[from] pfd::ValidationError),

    #[error("Invalid {what} input: {reason}")]
    InvalidInput { what: &'static str, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Failed to set up metrics: {0}")]
    Metrics(String),
}
