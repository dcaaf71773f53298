//! Shared error taxonomy for LanceHub.
//!
//! Every component-level failure is classified into a [`ServiceError`]
//! before it crosses a component boundary; no raw storage, filesystem,
//! or crypto fault is ever surfaced unclassified. A transport layer
//! maps the corresponding [`OperationStatus`] tag to its own status
//! codes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias for operations that classify into the shared taxonomy.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// The five failure kinds a LanceHub operation can report.
///
/// - `Validation`: malformed or missing caller input, recoverable by
///   resubmitting.
/// - `Conflict`: a uniqueness violation on email, username, or phone,
///   recoverable by choosing a different value. Carries the field name.
/// - `Auth`: missing or invalid credential/token, recoverable by
///   re-authenticating.
/// - `NotFound`: referenced entity absent.
/// - `Internal`: storage/filesystem/crypto failure not attributable to
///   caller input. Logged at the failure site; the message here is a
///   generic marker, never internal detail.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict on field '{field}'")]
    Conflict { field: String },

    #[error("{0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal(String),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(field: impl Into<String>) -> Self {
        Self::Conflict { field: field.into() }
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// The result tag a transport layer maps to its status codes.
    pub fn status(&self) -> OperationStatus {
        match self {
            ServiceError::Validation(_) => OperationStatus::ValidationError,
            ServiceError::Conflict { .. } => OperationStatus::ConflictError,
            ServiceError::Auth(_) => OperationStatus::AuthError,
            ServiceError::NotFound(_) => OperationStatus::NotFoundError,
            ServiceError::Internal(_) => OperationStatus::InternalError,
        }
    }
}

/// Result tag carried by every operation response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationStatus {
    Ok,
    ValidationError,
    ConflictError,
    AuthError,
    NotFoundError,
    InternalError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_carries_field_name() {
        let err = ServiceError::conflict("username");
        assert_eq!(err.to_string(), "Conflict on field 'username'");
        assert_eq!(err.status(), OperationStatus::ConflictError);
    }

    #[test]
    fn internal_error_display_never_leaks_detail() {
        let err = ServiceError::internal("rocksdb: io error /data/lost");
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn status_tags_serialize_kebab_case() {
        let tag = serde_json::to_string(&OperationStatus::ValidationError).unwrap();
        assert_eq!(tag, "\"validation-error\"");
    }
}
