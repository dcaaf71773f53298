use lancehub_commons::ServiceError;
use lancehub_store::StorageError;
use thiserror::Error;

/// Errors from the system stores.
#[derive(Error, Debug)]
pub enum SystemError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Uniqueness violation, carrying the conflicting field name.
    #[error("Already exists: {field}")]
    Conflict { field: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for system store operations.
pub type SystemResult<T> = std::result::Result<T, SystemError>;

impl From<StorageError> for SystemError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UniqueConstraintViolation(field) => SystemError::Conflict { field },
            StorageError::SerializationError(msg) => SystemError::Serialization(msg),
            other => SystemError::Storage(other.to_string()),
        }
    }
}

impl From<SystemError> for ServiceError {
    fn from(err: SystemError) -> Self {
        match err {
            SystemError::NotFound(msg) => ServiceError::NotFound(msg),
            SystemError::Conflict { field } => ServiceError::Conflict { field },
            SystemError::Storage(msg) | SystemError::Serialization(msg) => {
                log::error!("system store failure: {}", msg);
                ServiceError::Internal(msg)
            }
        }
    }
}
