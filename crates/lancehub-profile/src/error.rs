use lancehub_commons::ServiceError;
use lancehub_system::SystemError;
use thiserror::Error;

/// Errors from profile reads and updates.
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    System(#[from] SystemError),
}

pub type ProfileResult<T> = std::result::Result<T, ProfileError>;

impl From<ProfileError> for ServiceError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::Validation(msg) => ServiceError::Validation(msg),
            ProfileError::System(inner) => inner.into(),
        }
    }
}
