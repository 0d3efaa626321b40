//! # ladle-core
//!
//! Core crate for the Ladle backend. Contains the configuration schemas,
//! the account model, the account storage contract, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other Ladle crates.

pub mod account;
pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
