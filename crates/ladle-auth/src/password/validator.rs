//! Password policy enforcement for new passwords.

use ladle_core::config::AuthConfig;
use ladle_core::error::AppError;

/// Validates password strength against the configured policy.
///
/// The policy is a minimum length only: any otherwise-valid password of at
/// least `password_min_length` characters is accepted.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Validates a password against the configured policy.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PasswordValidator {
        PasswordValidator::new(&AuthConfig::default())
    }

    #[test]
    fn exact_minimum_length_passes() {
        assert!(validator().validate("12345678").is_ok());
    }

    #[test]
    fn below_minimum_length_fails() {
        let err = validator().validate("1234567").unwrap_err();
        assert_eq!(err.kind, ladle_core::error::ErrorKind::Validation);
    }

    #[test]
    fn length_is_counted_in_characters_not_bytes() {
        // 8 multi-byte characters
        assert!(validator().validate("pässwörd").is_ok());
    }
}
