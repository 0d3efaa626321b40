//! Account entity and its public projection.

pub mod model;

pub use model::{Account, AccountView, CreateAccount};
