//! Repository implementations over the PostgreSQL pool.

pub mod account;

pub use account::AccountRepository;
