//! Session verification for protected operations.

use crate::error::{AuthError, AuthResult};
use crate::jwt::{self, LANCEHUB_ISSUER};
use lancehub_commons::AccountId;

/// Verifies bearer session tokens and resolves the calling account.
///
/// Stateless: possession of a validly signed, unexpired token is the
/// session. There is no revocation list.
pub struct SessionVerifier {
    jwt_secret: String,
    trusted_issuers: Vec<String>,
}

impl SessionVerifier {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            trusted_issuers: vec![LANCEHUB_ISSUER.to_string()],
        }
    }

    /// Resolves a token to the account id it was issued for.
    ///
    /// Accepts a raw token or one carrying a `Bearer ` prefix. A
    /// missing or empty token fails with `MissingToken`; any
    /// signature, expiry, or issuer problem fails with the matching
    /// token error.
    pub fn verify(&self, token: Option<&str>) -> AuthResult<AccountId> {
        let token = token.map(str::trim).filter(|t| !t.is_empty());
        let token = token.ok_or(AuthError::MissingToken)?;
        let token = token.strip_prefix("Bearer ").unwrap_or(token);

        let claims = jwt::validate_session_token(token, &self.jwt_secret, &self.trusted_issuers)?;
        Ok(AccountId::new(claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::create_session_token;

    const SECRET: &str = "test-secret";

    fn token_for(id: &str) -> String {
        let (token, _) =
            create_session_token(&AccountId::new(id), "a@b.c", None, SECRET).unwrap();
        token
    }

    #[test]
    fn resolves_account_from_token() {
        let verifier = SessionVerifier::new(SECRET);
        let token = token_for("a_77");
        assert_eq!(verifier.verify(Some(&token)).unwrap(), AccountId::new("a_77"));
    }

    #[test]
    fn accepts_bearer_prefix() {
        let verifier = SessionVerifier::new(SECRET);
        let token = format!("Bearer {}", token_for("a_77"));
        assert_eq!(verifier.verify(Some(&token)).unwrap(), AccountId::new("a_77"));
    }

    #[test]
    fn missing_token_is_its_own_error() {
        let verifier = SessionVerifier::new(SECRET);
        assert!(matches!(verifier.verify(None), Err(AuthError::MissingToken)));
        assert!(matches!(verifier.verify(Some("")), Err(AuthError::MissingToken)));
        assert!(matches!(verifier.verify(Some("   ")), Err(AuthError::MissingToken)));
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let verifier = SessionVerifier::new("another-secret");
        let token = token_for("a_77");
        assert!(matches!(
            verifier.verify(Some(&token)),
            Err(AuthError::InvalidSignature)
        ));
    }
}
