//! Token creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use ladle_core::config::AuthConfig;
use ladle_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Creates signed access and refresh tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
    /// Refresh token TTL in days.
    refresh_ttl_days: i64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .finish()
    }
}

/// Result of a successful token pair generation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Longer-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

impl TokenIssuer {
    /// Creates a new issuer from auth configuration.
    ///
    /// Fails with a configuration error if the signing secret is empty.
    /// Callers treat this as fatal at startup, not as a per-request error.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        config.validate()?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.token_secret.as_bytes()),
            access_ttl_minutes: config.access_token_ttl_minutes as i64,
            refresh_ttl_days: config.refresh_token_ttl_days as i64,
        })
    }

    /// Generates a new access + refresh token pair for the given account.
    pub fn issue_pair(&self, account_id: Uuid) -> Result<TokenPair, AppError> {
        let now = Utc::now();
        let access_exp = now + chrono::Duration::minutes(self.access_ttl_minutes);
        let refresh_exp = now + chrono::Duration::days(self.refresh_ttl_days);

        let access_claims = Claims {
            sub: account_id,
            iat: now.timestamp(),
            exp: access_exp.timestamp(),
            jti: Uuid::new_v4(),
            token_type: TokenType::Access,
        };

        let refresh_claims = Claims {
            sub: account_id,
            iat: now.timestamp(),
            exp: refresh_exp.timestamp(),
            jti: Uuid::new_v4(),
            token_type: TokenType::Refresh,
        };

        let access_token = encode(&Header::default(), &access_claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        let refresh_token = encode(&Header::default(), &refresh_claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode refresh token: {e}")))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at: access_exp,
            refresh_expires_at: refresh_exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ladle_core::error::ErrorKind;

    fn config() -> AuthConfig {
        AuthConfig {
            token_secret: "test-secret".to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn missing_secret_fails_construction() {
        let err = TokenIssuer::new(&AuthConfig::default()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn pairs_issued_back_to_back_are_textually_distinct() {
        let issuer = TokenIssuer::new(&config()).unwrap();
        let account_id = Uuid::new_v4();

        // Same account, same clock tick: the jti nonce keeps them apart.
        let a = issuer.issue_pair(account_id).unwrap();
        let b = issuer.issue_pair(account_id).unwrap();

        assert_ne!(a.access_token, b.access_token);
        assert_ne!(a.refresh_token, b.refresh_token);
        assert_ne!(a.access_token, a.refresh_token);
    }

    #[test]
    fn refresh_expiry_is_after_access_expiry() {
        let issuer = TokenIssuer::new(&config()).unwrap();
        let pair = issuer.issue_pair(Uuid::new_v4()).unwrap();
        assert!(pair.refresh_expires_at > pair.access_expires_at);
    }
}
