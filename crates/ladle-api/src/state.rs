//! Application state shared across all handlers.

use std::sync::Arc;

use ladle_auth::credential::CredentialVerifier;
use ladle_auth::session::SessionAuthenticator;
use ladle_core::config::AppConfig;
use ladle_core::traits::AccountStore;
use ladle_database::DatabasePool;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool
    pub db: DatabasePool,
    /// Session lifecycle authenticator
    pub authenticator: Arc<SessionAuthenticator>,
    /// Credential verification and account creation
    pub credentials: Arc<CredentialVerifier>,
    /// Account persistence
    pub accounts: Arc<dyn AccountStore>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish()
    }
}
