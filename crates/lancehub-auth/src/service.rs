//! Credential service: signup and login.

use crate::error::{AuthError, AuthResult};
use crate::jwt;
use crate::password;
use lancehub_commons::ids::SnowflakeGenerator;
use lancehub_commons::{now_millis, Account, AccountId, AccountView};
use lancehub_system::AccountsProvider;
use std::sync::Arc;
use tracing::Instrument;

/// A successfully established session: the account view plus the
/// signed session token.
#[derive(Debug, Clone)]
pub struct Session {
    pub account: AccountView,
    pub token: String,
}

/// Signup and login over the accounts store.
///
/// Email uniqueness is enforced by the store's unique index, so a
/// concurrent duplicate signup fails there rather than racing a
/// read-then-write check here.
pub struct CredentialService {
    accounts: Arc<AccountsProvider>,
    ids: Arc<SnowflakeGenerator>,
    jwt_secret: String,
    token_ttl_days: i64,
    bcrypt_cost: u32,
}

impl CredentialService {
    pub fn new(
        accounts: Arc<AccountsProvider>,
        ids: Arc<SnowflakeGenerator>,
        jwt_secret: impl Into<String>,
        token_ttl_days: i64,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            accounts,
            ids,
            jwt_secret: jwt_secret.into(),
            token_ttl_days,
            bcrypt_cost,
        }
    }

    /// Creates an account from email + password and opens a session.
    ///
    /// # Errors
    /// - `Validation` when email or password is empty
    /// - `System(Conflict { field: "email" })` when the email is
    ///   already registered, including under a differing case
    pub async fn signup(&self, email: &str, plain_password: &str) -> AuthResult<Session> {
        let span = tracing::info_span!("auth.signup", email = email);
        async move {
            let email = email.trim();
            if email.is_empty() || plain_password.is_empty() {
                return Err(AuthError::Validation(
                    "Email and Password is required".to_string(),
                ));
            }

            let password_hash =
                password::hash_password(plain_password, Some(self.bcrypt_cost)).await?;

            let id = AccountId::generate(&self.ids);
            let account = Account::new(id.clone(), email, password_hash, now_millis());
            self.accounts.create_account(&account)?;

            let (token, _) = jwt::create_session_token(
                &id,
                email,
                Some(self.token_ttl_days),
                &self.jwt_secret,
            )?;

            tracing::debug!(account_id = %id, "Signup succeeded");
            Ok(Session { account: AccountView::from(account), token })
        }
        .instrument(span)
        .await
    }

    /// Verifies email + password and opens a session.
    ///
    /// Unknown email and wrong password both return
    /// `InvalidCredentials`; a caller cannot probe which emails exist.
    pub async fn login(&self, email: &str, plain_password: &str) -> AuthResult<Session> {
        let span = tracing::info_span!("auth.login", email = email);
        async move {
            let email = email.trim();
            if email.is_empty() || plain_password.is_empty() {
                return Err(AuthError::InvalidCredentials);
            }

            let account = match self.accounts.find_by_email(email)? {
                Some(account) => account,
                None => {
                    tracing::warn!("Login failed: unknown email");
                    return Err(AuthError::InvalidCredentials);
                }
            };

            let password_ok =
                password::verify_password(plain_password, &account.password_hash).await?;
            if !password_ok {
                tracing::warn!(account_id = %account.id, "Login failed: bad password");
                return Err(AuthError::InvalidCredentials);
            }

            let (token, _) = jwt::create_session_token(
                &account.id,
                &account.email,
                Some(self.token_ttl_days),
                &self.jwt_secret,
            )?;

            tracing::debug!(account_id = %account.id, "Login succeeded");
            Ok(Session { account: AccountView::from(account), token })
        }
        .instrument(span)
        .await
    }
}
