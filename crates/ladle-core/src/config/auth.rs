//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256). Must be set; an empty
    /// secret is a fatal startup error, never a per-request one.
    #[serde(default)]
    pub token_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_minutes: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_days: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Whether auth cookies are marked `Secure` (HTTPS only).
    #[serde(default)]
    pub secure_cookies: bool,
}

impl AuthConfig {
    /// Validate that the configuration is usable for serving.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.token_secret.is_empty() {
            return Err(AppError::configuration(
                "auth.token_secret is not configured; refusing to start",
            ));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: String::new(),
            access_token_ttl_minutes: default_access_ttl(),
            refresh_token_ttl_days: default_refresh_ttl(),
            password_min_length: default_password_min(),
            secure_cookies: false,
        }
    }
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    7
}

fn default_password_min() -> usize {
    8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_secret_is_rejected() {
        let config = AuthConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn configured_secret_passes() {
        let config = AuthConfig {
            token_secret: "test-secret".to_string(),
            ..AuthConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
