//! Credential verification: password registration/login and OAuth identity
//! resolution.

pub mod verifier;

pub use verifier::CredentialVerifier;
