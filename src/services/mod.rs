use thiserror::Error;

use crate::board::gateway::GatewayError;
use crate::domain::auth::AuthenticatedUser;
use crate::repository::errors::RepositoryError;

pub mod board;
pub mod catalog;
pub mod gateway;
pub mod proposals;
pub mod work_entries;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("form error: {0}")]
    Form(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error("internal error")]
    Internal,
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ConstraintViolation(message) => ServiceError::Conflict(message),
            RepositoryError::ValidationError(message) => ServiceError::TypeConstraint(message),
            RepositoryError::DatabaseError(_)
            | RepositoryError::ConnectionError(_)
            | RepositoryError::Unexpected(_) => ServiceError::Internal,
        }
    }
}

impl From<ServiceError> for GatewayError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unauthorized => GatewayError::Forbidden,
            ServiceError::NotFound => GatewayError::NotFound,
            ServiceError::Conflict(message)
            | ServiceError::Form(message)
            | ServiceError::TypeConstraint(message) => GatewayError::Invalid(message),
            ServiceError::Internal => GatewayError::Unavailable("internal error".to_string()),
        }
    }
}

impl From<GatewayError> for ServiceError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Forbidden => ServiceError::Unauthorized,
            GatewayError::NotFound => ServiceError::NotFound,
            GatewayError::Invalid(message) => ServiceError::Form(message),
            GatewayError::Unavailable(_) => ServiceError::Internal,
        }
    }
}

/// Fails with [`ServiceError::Unauthorized`] unless the user holds `role`.
pub fn ensure_role(user: &AuthenticatedUser, role: &str) -> ServiceResult<()> {
    if user.has_role(role) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}
