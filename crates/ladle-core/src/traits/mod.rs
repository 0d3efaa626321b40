//! Core traits defined in `ladle-core` and implemented by other crates.

pub mod account_store;

pub use account_store::{AccountStore, RotationOutcome};
