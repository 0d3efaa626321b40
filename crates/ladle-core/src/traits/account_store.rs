//! Account storage contract, including the atomic refresh-token rotation
//! primitive.

use async_trait::async_trait;
use uuid::Uuid;

use crate::account::{Account, CreateAccount};
use crate::result::AppResult;

/// Outcome of an atomic refresh-token rotation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationOutcome {
    /// The old token was present; it has been removed and the new token
    /// appended in the same atomic step.
    Rotated,
    /// The old token was not in the account's collection. Either it was
    /// already rotated out (replay) or it was never issued.
    NotPresent,
}

/// Trait for account persistence and refresh-token bookkeeping.
///
/// Two implementations are provided:
/// - PostgreSQL-backed (`ladle-database`), where rotation is a single
///   conditional `UPDATE`
/// - In-memory (`ladle-auth`), using `tokio::sync::Mutex`
///
/// Implementations must guarantee that [`rotate_refresh_token`] is atomic
/// with respect to concurrent calls presenting the same old token: at most
/// one caller observes [`RotationOutcome::Rotated`].
///
/// [`rotate_refresh_token`]: AccountStore::rotate_refresh_token
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Find an account by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>>;

    /// Find an account by email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Find an account by external OAuth identity.
    async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<Account>>;

    /// Create a new account. Fails with `Duplicate` if the email (or the
    /// external identity, when present) is already taken.
    async fn create(&self, data: &CreateAccount) -> AppResult<Account>;

    /// Append a refresh token to the account's collection.
    async fn add_refresh_token(&self, id: Uuid, token: &str) -> AppResult<()>;

    /// Remove a refresh token by exact string match.
    ///
    /// Returns `true` if the token was present. No-op (and `false`) if absent.
    async fn remove_refresh_token(&self, id: Uuid, token: &str) -> AppResult<bool>;

    /// Atomically remove `old` if present and append `new` in its place.
    async fn rotate_refresh_token(
        &self,
        id: Uuid,
        old: &str,
        new: &str,
    ) -> AppResult<RotationOutcome>;

    /// Empty the account's refresh-token collection.
    ///
    /// Returns `true` if any tokens were revoked. Used as the containment
    /// measure when a replayed refresh token is detected.
    async fn revoke_all_refresh_tokens(&self, id: Uuid) -> AppResult<bool>;
}
