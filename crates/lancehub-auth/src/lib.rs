//! Credential and session layer for LanceHub.
//!
//! Passwords are bcrypt-hashed on the blocking pool; sessions are
//! stateless HS256 tokens carrying the account id and email. Login
//! failures are undifferentiated: unknown email and wrong password
//! produce the same error.

pub mod error;
pub mod jwt;
pub mod password;
pub mod service;
pub mod session;

pub use error::{AuthError, AuthResult};
pub use jwt::{SessionClaims, DEFAULT_SESSION_TTL_DAYS, LANCEHUB_ISSUER};
pub use service::{CredentialService, Session};
pub use session::SessionVerifier;
