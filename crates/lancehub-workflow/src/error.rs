use lancehub_commons::ServiceError;
use lancehub_store::StorageError;
use lancehub_system::SystemError;
use thiserror::Error;

/// Errors from the approval workflow.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    System(#[from] SystemError),
}

pub type WorkflowResult<T> = std::result::Result<T, WorkflowError>;

impl From<StorageError> for WorkflowError {
    fn from(err: StorageError) -> Self {
        WorkflowError::System(err.into())
    }
}

impl From<WorkflowError> for ServiceError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::Validation(msg) => ServiceError::Validation(msg),
            WorkflowError::System(inner) => inner.into(),
        }
    }
}
