//! Checks email+password credentials against stored hashes and resolves
//! pre-verified OAuth identities to accounts.

use std::sync::Arc;

use tracing::info;

use ladle_core::account::{Account, CreateAccount};
use ladle_core::error::{AppError, ErrorKind};
use ladle_core::result::AppResult;
use ladle_core::traits::AccountStore;

use crate::password::{PasswordHasher, PasswordValidator};

/// The one message returned for every credential failure. Distinguishing
/// "email not found" from "wrong password" would allow account enumeration.
const BAD_CREDENTIALS: &str = "Invalid email or password";

/// Verifies credentials and creates accounts.
#[derive(Clone)]
pub struct CredentialVerifier {
    /// Account persistence.
    store: Arc<dyn AccountStore>,
    /// Password hasher.
    hasher: PasswordHasher,
    /// Password policy.
    validator: PasswordValidator,
}

impl std::fmt::Debug for CredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVerifier").finish()
    }
}

impl CredentialVerifier {
    /// Creates a new credential verifier.
    pub fn new(
        store: Arc<dyn AccountStore>,
        hasher: PasswordHasher,
        validator: PasswordValidator,
    ) -> Self {
        Self {
            store,
            hasher,
            validator,
        }
    }

    /// Registers a new password-backed account.
    ///
    /// Fails with a validation error on missing fields or a too-short
    /// password, and with a duplicate error if the email is already taken.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> AppResult<Account> {
        if email.trim().is_empty() {
            return Err(AppError::validation("Email is required"));
        }
        if display_name.trim().is_empty() {
            return Err(AppError::validation("Display name is required"));
        }
        if password.is_empty() {
            return Err(AppError::validation("Password is required"));
        }
        self.validator.validate(password)?;

        // Pre-check for a friendly error; the unique constraint still
        // backstops the lookup-then-insert race.
        if self.store.find_by_email(email).await?.is_some() {
            return Err(AppError::duplicate("Email already in use"));
        }

        let password_hash = self.hasher.hash_password(password)?;

        let account = self
            .store
            .create(&CreateAccount {
                email: email.to_string(),
                password_hash: Some(password_hash),
                display_name: Some(display_name.to_string()),
                external_id: None,
            })
            .await?;

        info!(account_id = %account.id, "Account registered");
        Ok(account)
    }

    /// Verifies an email+password pair and returns the matching account.
    pub async fn verify_password(&self, email: &str, password: &str) -> AppResult<Account> {
        let account = self
            .store
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::authentication(BAD_CREDENTIALS))?;

        // OAuth-only accounts have no password to check against.
        let hash = account
            .password_hash
            .as_deref()
            .ok_or_else(|| AppError::authentication(BAD_CREDENTIALS))?;

        if !self.hasher.verify_password(password, hash)? {
            return Err(AppError::authentication(BAD_CREDENTIALS));
        }

        Ok(account)
    }

    /// Resolves a pre-verified OAuth identity to an account, creating one
    /// on first login.
    ///
    /// Idempotent per external id: if a concurrent first-login wins the
    /// insert, the unique-constraint violation is resolved by re-fetching.
    pub async fn resolve_oauth_identity(
        &self,
        external_id: &str,
        email: &str,
        display_name: &str,
    ) -> AppResult<Account> {
        if let Some(account) = self.store.find_by_external_id(external_id).await? {
            return Ok(account);
        }

        let created = self
            .store
            .create(&CreateAccount {
                email: email.to_string(),
                password_hash: None,
                display_name: Some(display_name.to_string()),
                external_id: Some(external_id.to_string()),
            })
            .await;

        match created {
            Ok(account) => {
                info!(account_id = %account.id, "Account created from OAuth identity");
                Ok(account)
            }
            Err(e) if e.kind == ErrorKind::Duplicate => self
                .store
                .find_by_external_id(external_id)
                .await?
                .ok_or(e),
            Err(e) => Err(e),
        }
    }
}
