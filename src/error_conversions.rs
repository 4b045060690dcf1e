//! Error conversion glue between layers.
//!
//! The domain layer must not depend on repository or service error types, so
//! the conversions live here.

use crate::domain::types::TypeConstraintError;
use crate::listing::errors::FetchError;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<RepositoryError> for FetchError {
    fn from(val: RepositoryError) -> Self {
        match val {
            RepositoryError::ValidationError(message) => FetchError::InvalidQuery(message),
            other => FetchError::Store(other.to_string()),
        }
    }
}

