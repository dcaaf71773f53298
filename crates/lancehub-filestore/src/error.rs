use lancehub_commons::ServiceError;
use lancehub_system::SystemError;
use thiserror::Error;

/// Errors from profile image storage.
#[derive(Error, Debug)]
pub enum FilestoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    System(#[from] SystemError),
}

pub type FilestoreResult<T> = std::result::Result<T, FilestoreError>;

impl From<FilestoreError> for ServiceError {
    fn from(err: FilestoreError) -> Self {
        match err {
            FilestoreError::Validation(msg) => ServiceError::Validation(msg),
            FilestoreError::Io(io) => {
                log::error!("filestore I/O failure: {}", io);
                ServiceError::Internal(io.to_string())
            }
            FilestoreError::System(inner) => inner.into(),
        }
    }
}
