use sea_orm::DbErr;
use thiserror::Error;

/// Failure of a service call.
///
/// Policy denials surface as [`ServiceError::Forbidden`]; everything the
/// store rejects is carried through as [`ServiceError::Database`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl ServiceError {
    pub fn not_found(what: &str) -> Self {
        ServiceError::NotFound(format!("{what} not found"))
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        ServiceError::Forbidden(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        ServiceError::InvalidInput(msg.into())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Rejects empty or whitespace-only text.
pub(crate) fn require_text(field: &str, value: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::invalid(format!("{field} cannot be empty")));
    }
    Ok(())
}
