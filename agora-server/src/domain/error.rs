use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("validation failed for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Auth(String),

    /// Uncategorized driver failure. `code` carries the SQLSTATE when
    /// the store reported one.
    #[error("store error: {message}")]
    Store {
        code: Option<String>,
        message: String,
    },

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}
