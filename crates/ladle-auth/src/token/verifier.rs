//! Stateless token verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use ladle_core::config::AuthConfig;
use ladle_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Validates signed tokens.
///
/// Verification is purely cryptographic (signature + expiry + token type);
/// there is no store lookup here. Access tokens are stateless and
/// non-revocable before expiry by design; refresh-token revocation is a
/// membership check against the account's token collection, performed by
/// the session layer.
#[derive(Clone)]
pub struct TokenVerifier {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    /// Creates a new verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        config.validate()?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Ok(Self {
            decoding_key: DecodingKey::from_secret(config.token_secret.as_bytes()),
            validation,
        })
    }

    /// Decodes and validates an access token string.
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;

        if claims.token_type != TokenType::Access {
            return Err(AppError::invalid_token(
                "Invalid token type: expected access token",
            ));
        }

        Ok(claims)
    }

    /// Decodes and validates a refresh token string.
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;

        if claims.token_type != TokenType::Refresh {
            return Err(AppError::invalid_token(
                "Invalid token type: expected refresh token",
            ));
        }

        Ok(claims)
    }

    /// Internal decode without type checking.
    ///
    /// Expiry is a distinct error kind so clients can attempt a silent
    /// refresh; every other failure is an invalid token.
    fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::expired_token("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::invalid_token("Invalid token signature")
                    }
                    _ => AppError::invalid_token(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::issuer::TokenIssuer;
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use ladle_core::error::ErrorKind;
    use uuid::Uuid;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            token_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    fn expired_token(secret: &str, token_type: TokenType) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: now - 7200,
            exp: now - 3600,
            jti: Uuid::new_v4(),
            token_type,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn round_trip_access_token() {
        let issuer = TokenIssuer::new(&config("s1")).unwrap();
        let verifier = TokenVerifier::new(&config("s1")).unwrap();
        let account_id = Uuid::new_v4();

        let pair = issuer.issue_pair(account_id).unwrap();
        let claims = verifier.verify_access_token(&pair.access_token).unwrap();
        assert_eq!(claims.account_id(), account_id);

        // Verification is a pure function of token and time: a second call
        // yields the same subject with no state involved.
        let again = verifier.verify_access_token(&pair.access_token).unwrap();
        assert_eq!(again.account_id(), account_id);
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let issuer = TokenIssuer::new(&config("s1")).unwrap();
        let verifier = TokenVerifier::new(&config("s1")).unwrap();

        let pair = issuer.issue_pair(Uuid::new_v4()).unwrap();
        let err = verifier.verify_access_token(&pair.refresh_token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[test]
    fn expired_is_distinct_from_invalid() {
        let verifier = TokenVerifier::new(&config("s1")).unwrap();

        let err = verifier
            .verify_access_token(&expired_token("s1", TokenType::Access))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExpiredToken);

        // Same shape of token, signed with the wrong secret.
        let err = verifier
            .verify_access_token(&expired_token("s2", TokenType::Access))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[test]
    fn garbage_is_invalid() {
        let verifier = TokenVerifier::new(&config("s1")).unwrap();
        let err = verifier.verify_access_token("not-a-token").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }
}
