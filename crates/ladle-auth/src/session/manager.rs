//! Session lifecycle manager — login, refresh-rotation, logout, and access
//! verification.
//!
//! A refresh token moves through `ISSUED → ACTIVE (in store) → ROTATED-OUT`
//! and ends `EXPIRED` or `REVOKED`. `ROTATED-OUT` is permanent: an exchanged
//! token can never be exchanged again, even while cryptographically valid.
//! Presenting one is treated as evidence of theft and revokes every session
//! the account has.

use std::sync::Arc;

use tracing::{info, warn};

use ladle_core::account::Account;
use ladle_core::error::AppError;
use ladle_core::result::AppResult;
use ladle_core::traits::{AccountStore, RotationOutcome};

use crate::credential::CredentialVerifier;
use crate::token::{TokenIssuer, TokenPair, TokenVerifier};

use super::principal::AuthenticatedPrincipal;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Generated token pair.
    pub tokens: TokenPair,
    /// The authenticated account.
    pub account: Account,
}

/// Orchestrates credential verification, token issuance, and the refresh
/// token store into the complete session lifecycle.
#[derive(Clone)]
pub struct SessionAuthenticator {
    /// Token issuance.
    issuer: Arc<TokenIssuer>,
    /// Token verification.
    verifier: Arc<TokenVerifier>,
    /// Credential verification.
    credentials: Arc<CredentialVerifier>,
    /// Account persistence.
    store: Arc<dyn AccountStore>,
}

impl std::fmt::Debug for SessionAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionAuthenticator").finish()
    }
}

impl SessionAuthenticator {
    /// Creates a new session authenticator with all required dependencies.
    pub fn new(
        issuer: Arc<TokenIssuer>,
        verifier: Arc<TokenVerifier>,
        credentials: Arc<CredentialVerifier>,
        store: Arc<dyn AccountStore>,
    ) -> Self {
        Self {
            issuer,
            verifier,
            credentials,
            store,
        }
    }

    /// Performs the password login flow:
    ///
    /// 1. Verify credentials
    /// 2. Issue a token pair
    /// 3. Append the refresh token to the account's collection
    ///
    /// Each login appends a token, so an account holds one valid refresh
    /// token per device/session.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        let account = self.credentials.verify_password(email, password).await?;
        let tokens = self.issue_and_persist(&account).await?;

        info!(account_id = %account.id, "Login successful");
        Ok(LoginOutcome { tokens, account })
    }

    /// Performs the OAuth login flow for a pre-verified identity.
    ///
    /// The upstream handshake (consent, code exchange, profile fetch) has
    /// already happened at the boundary; from here the identity is a fact.
    pub async fn login_oauth(
        &self,
        external_id: &str,
        email: &str,
        display_name: &str,
    ) -> AppResult<LoginOutcome> {
        let account = self
            .credentials
            .resolve_oauth_identity(external_id, email, display_name)
            .await?;
        let tokens = self.issue_and_persist(&account).await?;

        info!(account_id = %account.id, "OAuth login successful");
        Ok(LoginOutcome { tokens, account })
    }

    /// Exchanges a refresh token for a new token pair, rotating it out.
    ///
    /// 1. Verify signature and expiry
    /// 2. Look up the account
    /// 3. Issue a new pair
    /// 4. Atomically swap the old token for the new one
    ///
    /// Step 4 is a compare-and-swap: of any number of concurrent calls
    /// presenting the same token, at most one succeeds. The rest observe it
    /// as already rotated out, which revokes every token the account holds.
    pub async fn refresh(&self, presented: Option<&str>) -> AppResult<TokenPair> {
        let presented = presented
            .ok_or_else(|| AppError::missing_token("No refresh token presented"))?;

        let claims = self.verifier.verify_refresh_token(presented)?;

        let account = self
            .store
            .find_by_id(claims.account_id())
            .await?
            .ok_or_else(|| AppError::authentication("Unknown account"))?;

        let tokens = self.issuer.issue_pair(account.id)?;

        match self
            .store
            .rotate_refresh_token(account.id, presented, &tokens.refresh_token)
            .await?
        {
            RotationOutcome::Rotated => {
                info!(account_id = %account.id, "Refresh token rotated");
                Ok(tokens)
            }
            RotationOutcome::NotPresent => Err(self.contain_reuse(account.id).await?),
        }
    }

    /// Logs out by removing the presented refresh token server-side.
    ///
    /// Idempotent: a missing, malformed, or expired token still succeeds —
    /// the caller's cookies get cleared either way and there is nothing to
    /// remove. A validly-signed but already-rotated token gets the same
    /// containment treatment as a replayed refresh.
    pub async fn logout(&self, presented: Option<&str>) -> AppResult<()> {
        let Some(presented) = presented else {
            return Ok(());
        };

        let Ok(claims) = self.verifier.verify_refresh_token(presented) else {
            return Ok(());
        };

        let Some(account) = self.store.find_by_id(claims.account_id()).await? else {
            return Ok(());
        };

        if self.store.remove_refresh_token(account.id, presented).await? {
            info!(account_id = %account.id, "Logged out, refresh token revoked");
        } else {
            let _ = self.contain_reuse(account.id).await?;
        }

        Ok(())
    }

    /// Verifies an access token and produces the caller's principal.
    ///
    /// Purely cryptographic: no store lookup, no state mutation. Access
    /// tokens trade instant revocation for statelessness.
    pub fn verify_access(&self, presented: Option<&str>) -> AppResult<AuthenticatedPrincipal> {
        let presented = presented
            .ok_or_else(|| AppError::missing_token("No access token presented"))?;

        let claims = self.verifier.verify_access_token(presented)?;

        Ok(AuthenticatedPrincipal {
            account_id: claims.account_id(),
        })
    }

    /// Issues a pair and persists the refresh half.
    async fn issue_and_persist(&self, account: &Account) -> AppResult<TokenPair> {
        let tokens = self.issuer.issue_pair(account.id)?;
        self.store
            .add_refresh_token(account.id, &tokens.refresh_token)
            .await?;
        Ok(tokens)
    }

    /// Containment for a rotated-out token being presented again.
    ///
    /// If the account still held valid tokens, this is reuse of a rotated
    /// token — possible theft — and every session is revoked. If the
    /// collection was already empty, containment has already run and the
    /// token is simply no longer valid.
    ///
    /// Returns the error to surface (the revocation itself must not fail
    /// silently, so storage errors propagate).
    async fn contain_reuse(&self, account_id: uuid::Uuid) -> AppResult<AppError> {
        let revoked_any = self.store.revoke_all_refresh_tokens(account_id).await?;

        if revoked_any {
            warn!(
                account_id = %account_id,
                "Rotated-out refresh token presented; all sessions revoked"
            );
            Ok(AppError::token_reuse(
                "Refresh token has already been used; all sessions revoked",
            ))
        } else {
            Ok(AppError::invalid_token("Refresh token is no longer valid"))
        }
    }
}
