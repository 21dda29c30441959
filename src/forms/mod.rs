//! Form definitions backing the board routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod work_entry;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid date")]
    InvalidDate,

    #[error("invalid client id")]
    InvalidClientId,

    #[error("failed to store uploaded file: {0}")]
    Upload(String),
}
