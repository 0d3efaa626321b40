//! Argon2id password hashing and verification.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use ladle_core::error::AppError;

/// Hashes and verifies passwords with Argon2id.
///
/// The Argon2 context is built once and reused; only the salt varies
/// per hash.
#[derive(Clone, Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish()
    }
}

impl PasswordHasher {
    /// Creates a hasher with the default Argon2id parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hashes a plaintext password with a freshly generated random salt.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored hash string.
    ///
    /// A mismatch is `Ok(false)`; only a malformed hash or an internal
    /// failure is an error.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_never_the_plaintext() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("password1").unwrap();
        assert_ne!(hash, "password1");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn verify_accepts_only_the_original_plaintext() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("password1").unwrap();
        assert!(hasher.verify_password("password1", &hash).unwrap());
        assert!(!hasher.verify_password("password2", &hash).unwrap());
        assert!(!hasher.verify_password("", &hash).unwrap());
    }

    #[test]
    fn salts_are_random_per_hash() {
        let hasher = PasswordHasher::new();
        let a = hasher.hash_password("password1").unwrap();
        let b = hasher.hash_password("password1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_stored_hash_is_an_error_not_a_mismatch() {
        let hasher = PasswordHasher::new();
        assert!(hasher.verify_password("password1", "not-a-phc-string").is_err());
    }
}
