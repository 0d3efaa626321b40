//! In-memory account store.

pub mod memory;

pub use memory::MemoryAccountStore;
