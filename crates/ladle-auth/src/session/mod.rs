//! Session lifecycle: login, refresh-rotation, logout, access verification.

pub mod manager;
pub mod principal;

pub use manager::{LoginOutcome, SessionAuthenticator};
pub use principal::AuthenticatedPrincipal;
