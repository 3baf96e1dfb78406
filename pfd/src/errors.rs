use thiserror::Error;

/// Result type alias for schema operations
pub type Result<T, E = SchemaError> = std::result::Result<T, E>;

/// Errors raised while decoding or reshaping PFD documents
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Malformed PFD transaction: {0}")]
    MalformedTransaction(String),

    #[error("Malformed PFD application: {0}")]
    MalformedApplication(String),

    #[error("Duplicate external application ID: {0}")]
    DuplicateApplication(String),

    #[error("Duplicate PFD ID {pfd_id} in application {app_id}")]
    DuplicatePfd { app_id: String, pfd_id: String },

    #[error("Invalid field path: {0}")]
    InvalidFieldPath(String),

    #[error("Failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Constraint violations of the PFD form, checked before a submit
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Application at position {0} has an empty externalAppID")]
    EmptyExternalAppId(usize),

    #[error("Application {0} has no PFDs")]
    NoPfds(String),

    #[error("Application {app_id} has {count} PFDs, at most {max} are allowed")]
    TooManyPfds {
        app_id: String,
        count: usize,
        max: usize,
    },

    #[error("PFD at position {position} of application {app_id} has an empty pfdID")]
    EmptyPfdId { app_id: String, position: usize },

    #[error("{field} of application {app_id} must be a number")]
    NotANumber { app_id: String, field: &'static str },
}
