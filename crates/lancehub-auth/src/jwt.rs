// Session token issuance and validation.

use crate::error::{AuthError, AuthResult};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use lancehub_commons::AccountId;
use serde::{Deserialize, Serialize};

/// Default session lifetime in days.
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 7;

/// Issuer written into every LanceHub session token.
pub const LANCEHUB_ISSUER: &str = "lancehub";

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (account id)
    pub sub: String,
    /// Account email (custom claim)
    pub email: String,
    /// Issuer
    pub iss: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

impl SessionClaims {
    pub fn new(account_id: &AccountId, email: &str, ttl_days: Option<i64>) -> Self {
        let now = chrono::Utc::now();
        let ttl = ttl_days.unwrap_or(DEFAULT_SESSION_TTL_DAYS);
        let exp = now + chrono::Duration::days(ttl);

        Self {
            sub: account_id.to_string(),
            email: email.to_string(),
            iss: LANCEHUB_ISSUER.to_string(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        }
    }
}

/// Sign a set of session claims into a token string.
pub fn generate_session_token(claims: &SessionClaims, secret: &str) -> AuthResult<String> {
    let header = Header::new(Algorithm::HS256);
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &encoding_key)
        .map_err(|e| AuthError::HashingError(format!("JWT encoding error: {}", e)))
}

/// Build and sign a session token in one step.
pub fn create_session_token(
    account_id: &AccountId,
    email: &str,
    ttl_days: Option<i64>,
    secret: &str,
) -> AuthResult<(String, SessionClaims)> {
    let claims = SessionClaims::new(account_id, email, ttl_days);
    let token = generate_session_token(&claims, secret)?;
    Ok((token, claims))
}

/// Validate a session token and extract its claims.
///
/// Verifies the signature, the expiration, that the issuer is trusted,
/// and that the subject claim is present.
pub fn validate_session_token(
    token: &str,
    secret: &str,
    trusted_issuers: &[String],
) -> AuthResult<SessionClaims> {
    let _header = decode_header(token)
        .map_err(|e| AuthError::MalformedToken(format!("Invalid JWT header: {}", e)))?;

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.validate_nbf = false;

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data =
        decode::<SessionClaims>(token, &decoding_key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            _ => AuthError::MalformedToken(format!("JWT decode error: {}", e)),
        })?;

    let claims = token_data.claims;

    verify_issuer(&claims.iss, trusted_issuers)?;

    if claims.sub.is_empty() {
        return Err(AuthError::MissingClaim("sub".to_string()));
    }

    Ok(claims)
}

/// Reject any issuer not in the trusted list. An empty list rejects
/// everything.
fn verify_issuer(issuer: &str, trusted_issuers: &[String]) -> AuthResult<()> {
    if trusted_issuers.is_empty() {
        return Err(AuthError::UntrustedIssuer(format!(
            "No trusted issuers configured. Rejecting issuer: {}",
            issuer
        )));
    }

    if trusted_issuers.iter().any(|i| i == issuer) {
        Ok(())
    } else {
        Err(AuthError::UntrustedIssuer(issuer.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trusted() -> Vec<String> {
        vec![LANCEHUB_ISSUER.to_string()]
    }

    fn token_with_offset(secret: &str, exp_offset_secs: i64) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = SessionClaims {
            sub: "a_123".to_string(),
            email: "test@example.com".to_string(),
            iss: LANCEHUB_ISSUER.to_string(),
            exp: (now + exp_offset_secs) as usize,
            iat: now as usize,
        };
        generate_session_token(&claims, secret).unwrap()
    }

    #[test]
    fn valid_token_round_trips_claims() {
        let secret = "test-secret-key";
        let account_id = AccountId::new("a_42");
        let (token, _) =
            create_session_token(&account_id, "alice@example.com", None, secret).unwrap();

        let claims = validate_session_token(&token, secret, &trusted()).unwrap();
        assert_eq!(claims.sub, "a_42");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.iss, LANCEHUB_ISSUER);
    }

    #[test]
    fn default_ttl_is_seven_days() {
        let claims = SessionClaims::new(&AccountId::new("a_1"), "a@b.c", None);
        let ttl_secs = claims.exp - claims.iat;
        assert_eq!(ttl_secs, 7 * 24 * 3600);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = token_with_offset("real-secret", 3600);
        let result = validate_session_token(&token, "wrong-secret", &trusted());
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let secret = "test-secret-key";
        let token = token_with_offset(secret, -3600);
        let result = validate_session_token(&token, secret, &trusted());
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn untrusted_issuer_is_rejected() {
        let secret = "test-secret-key";
        let now = chrono::Utc::now().timestamp();
        let claims = SessionClaims {
            sub: "a_123".to_string(),
            email: "x@y.z".to_string(),
            iss: "someone-else".to_string(),
            exp: (now + 3600) as usize,
            iat: now as usize,
        };
        let token = generate_session_token(&claims, secret).unwrap();
        let result = validate_session_token(&token, secret, &trusted());
        assert!(matches!(result, Err(AuthError::UntrustedIssuer(_))));
    }

    #[test]
    fn empty_trusted_list_rejects_everything() {
        let result = verify_issuer(LANCEHUB_ISSUER, &[]);
        assert!(matches!(result, Err(AuthError::UntrustedIssuer(_))));
    }

    #[test]
    fn empty_string_is_not_a_token() {
        let result = validate_session_token("", "any-secret", &trusted());
        assert!(result.is_err());
    }

    #[test]
    fn truncated_token_is_rejected() {
        // Two segments only, no signature.
        let result = validate_session_token("eyJhbGciOiJIUzI1NiJ9.e30", "any-secret", &trusted());
        assert!(result.is_err());
    }
}
