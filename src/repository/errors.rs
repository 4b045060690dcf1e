use diesel::r2d2::{Error as R2D2Error, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Blog posts are addressed by slug; SQLite reports the clash by column.
const SLUG_COLUMN: &str = "blog_posts.slug";

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,

            DieselError::DatabaseError(kind, info) => database_error(kind, info.message()),

            DieselError::InvalidCString(_) => {
                RepositoryError::ValidationError("text must not contain NUL bytes".to_string())
            }

            DieselError::SerializationError(e) => {
                RepositoryError::ValidationError(format!("cannot store value: {e}"))
            }

            DieselError::DeserializationError(e) => {
                RepositoryError::DatabaseError(format!("stored row is unreadable: {e}"))
            }

            DieselError::QueryBuilderError(e) => {
                RepositoryError::ValidationError(format!("cannot build query: {e}"))
            }

            _ => RepositoryError::Unexpected(format!("Unexpected diesel error: {err}")),
        }
    }
}

/// Constraint failures of the content tables: the unique slug and the
/// `NOT NULL` columns.
fn database_error(kind: DatabaseErrorKind, message: &str) -> RepositoryError {
    match kind {
        DatabaseErrorKind::UniqueViolation if message.contains(SLUG_COLUMN) => {
            RepositoryError::ConstraintViolation(
                "a blog post with this slug already exists".to_string(),
            )
        }
        DatabaseErrorKind::UniqueViolation => {
            RepositoryError::ConstraintViolation(format!("duplicate value: {message}"))
        }
        DatabaseErrorKind::NotNullViolation => {
            RepositoryError::ConstraintViolation(format!("missing value: {message}"))
        }
        DatabaseErrorKind::ClosedConnection => RepositoryError::ConnectionError(message.to_string()),
        _ => RepositoryError::DatabaseError(message.to_string()),
    }
}

impl From<R2D2Error> for RepositoryError {
    fn from(err: R2D2Error) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sqlite_error(kind: DatabaseErrorKind, message: &str) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(message.to_string()))
    }

    #[test]
    fn slug_clash_reads_as_a_duplicate_slug() {
        let err = RepositoryError::from(sqlite_error(
            DatabaseErrorKind::UniqueViolation,
            "UNIQUE constraint failed: blog_posts.slug",
        ));
        assert_eq!(
            err.to_string(),
            "Constraint violation: a blog post with this slug already exists"
        );
    }

    #[test]
    fn other_failures_keep_the_sqlite_message() {
        let err = RepositoryError::from(sqlite_error(
            DatabaseErrorKind::NotNullViolation,
            "NOT NULL constraint failed: leads.name",
        ));
        assert!(matches!(
            err,
            RepositoryError::ConstraintViolation(ref m) if m == "missing value: NOT NULL constraint failed: leads.name"
        ));

        let err = RepositoryError::from(sqlite_error(
            DatabaseErrorKind::Unknown,
            "database is locked",
        ));
        assert!(matches!(err, RepositoryError::DatabaseError(ref m) if m == "database is locked"));

        assert!(matches!(
            RepositoryError::from(DieselError::NotFound),
            RepositoryError::NotFound
        ));
    }
}
