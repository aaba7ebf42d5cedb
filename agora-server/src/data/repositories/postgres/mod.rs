pub(crate) mod post_repository;
pub(crate) mod product_repository;
pub(crate) mod user_repository;

use crate::domain::error::DomainError;

/// SQLSTATE for a unique-constraint violation.
pub(super) const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE for a foreign-key violation.
pub(super) const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Maps a driver failure into the store side of the error taxonomy,
/// preserving the SQLSTATE when the database reported one.
pub(super) fn map_store_error(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => DomainError::Store {
            code: db_err.code().map(|code| code.into_owned()),
            message: db_err.message().to_string(),
        },
        _ => DomainError::Store {
            code: None,
            message: err.to_string(),
        },
    }
}

pub(super) fn db_error_code(err: &sqlx::Error) -> Option<String> {
    if let sqlx::Error::Database(db_err) = err {
        db_err.code().map(|code| code.into_owned())
    } else {
        None
    }
}
