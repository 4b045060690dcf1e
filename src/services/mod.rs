//! Console operations, independent of the HTTP layer.
//!
//! Every function is generic over the repository traits so it can be driven
//! by [`crate::repository::DieselRepository`] or by a mock in tests.

use thiserror::Error;

use crate::listing::errors::ListingError;
use crate::models::auth::AuthenticatedUser;
use crate::repository::errors::RepositoryError;

pub mod listing;
pub mod rows;

/// Role granting access to the admin console.
pub const SITE_ADMIN_ROLE: &str = "site_admin";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("record not found")]
    NotFound,

    #[error("invalid form: {0}")]
    Form(String),

    #[error("deleting a record requires explicit confirmation")]
    ConfirmationRequired,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Listing(#[from] ListingError),

    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ConstraintViolation(message) => ServiceError::Conflict(message),
            RepositoryError::ValidationError(message) => ServiceError::Form(message),
            other => ServiceError::Repository(other),
        }
    }
}

/// Fails with [`ServiceError::Unauthorized`] unless `user` is a console
/// administrator.
pub fn ensure_site_admin(user: &AuthenticatedUser) -> ServiceResult<()> {
    if user.has_role(SITE_ADMIN_ROLE) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::auth::AuthenticatedUser;
    use crate::services::SITE_ADMIN_ROLE;

    pub fn admin_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".into(),
            email: "admin@example.com".into(),
            name: "Admin".into(),
            roles: vec![SITE_ADMIN_ROLE.into()],
            exp: 4_102_444_800,
        }
    }

    pub fn viewer_user() -> AuthenticatedUser {
        AuthenticatedUser {
            roles: vec!["viewer".into()],
            ..admin_user()
        }
    }
}
