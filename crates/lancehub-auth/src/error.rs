use lancehub_commons::ServiceError;
use lancehub_system::SystemError;
use thiserror::Error;

/// Errors from credential and session handling.
///
/// `InvalidCredentials` deliberately covers both unknown-email and
/// wrong-password so login failures stay undifferentiated.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("No token provided")]
    MissingToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Untrusted issuer: {0}")]
    UntrustedIssuer(String),

    #[error("Missing claim: {0}")]
    MissingClaim(String),

    #[error("Hashing error: {0}")]
    HashingError(String),

    #[error(transparent)]
    System(#[from] SystemError),
}

/// Result type for auth operations.
pub type AuthResult<T> = std::result::Result<T, AuthError>;

impl From<AuthError> for ServiceError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(msg) => ServiceError::Validation(msg),
            AuthError::InvalidCredentials => ServiceError::auth("Invalid email or password"),
            AuthError::MissingToken => ServiceError::auth("No token provided"),
            AuthError::TokenExpired
            | AuthError::InvalidSignature
            | AuthError::MalformedToken(_)
            | AuthError::UntrustedIssuer(_)
            | AuthError::MissingClaim(_) => ServiceError::auth("Invalid token"),
            AuthError::HashingError(msg) => {
                log::error!("crypto failure: {}", msg);
                ServiceError::Internal(msg)
            }
            AuthError::System(inner) => inner.into(),
        }
    }
}
