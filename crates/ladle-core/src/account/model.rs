//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered identity: credential-backed, OAuth-backed, or both.
///
/// The refresh-token collection is the set of currently-valid refresh
/// tokens across all of the account's devices, in issuance order. A token's
/// presence here is what makes revocation possible; signature validity alone
/// cannot be revoked.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Unique account identifier.
    pub id: Uuid,
    /// Email address (globally unique).
    pub email: String,
    /// Argon2 password hash. Absent for OAuth-only accounts.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Human-readable display name.
    pub display_name: Option<String>,
    /// External OAuth identity subject (unique when present).
    pub external_id: Option<String>,
    /// Currently-valid refresh tokens, in issuance order.
    #[serde(skip_serializing)]
    pub refresh_tokens: Vec<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Check whether the account can authenticate with a password.
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Produce the public view of this account.
    pub fn view(&self) -> AccountView {
        AccountView {
            id: self.id,
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            created_at: self.created_at,
        }
    }
}

/// Data required to create a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccount {
    /// Email address.
    pub email: String,
    /// Pre-hashed password. `None` for OAuth-only accounts.
    pub password_hash: Option<String>,
    /// Display name.
    pub display_name: Option<String>,
    /// External OAuth identity subject.
    pub external_id: Option<String>,
}

/// Public projection of an [`Account`].
///
/// This is the only account shape that crosses the HTTP boundary; credential
/// fields and the refresh-token collection never leave the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountView {
    /// Unique account identifier.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Display name.
    pub display_name: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
