//! # ladle-database
//!
//! PostgreSQL connection management, migrations, and the sqlx-backed
//! account repository.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::account::AccountRepository;
