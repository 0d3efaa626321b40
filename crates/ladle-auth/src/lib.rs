//! # ladle-auth
//!
//! Session authentication core for the Ladle platform.
//!
//! ## Modules
//!
//! - `password` — Argon2id password hashing and policy enforcement
//! - `token` — signed access/refresh token issuance and verification
//! - `credential` — password and OAuth credential verification
//! - `session` — login, refresh-rotation, logout, and access verification
//! - `store` — in-memory account store

pub mod credential;
pub mod password;
pub mod session;
pub mod store;
pub mod token;

pub use credential::CredentialVerifier;
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{AuthenticatedPrincipal, SessionAuthenticator};
pub use store::MemoryAccountStore;
pub use token::{Claims, TokenIssuer, TokenPair, TokenVerifier};
