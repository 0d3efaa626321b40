//! # ladle-api
//!
//! HTTP API layer for the Ladle platform, built on Axum.
//!
//! ## Modules
//!
//! - `router` — route definitions and middleware stack
//! - `state` — shared application state
//! - `handlers` — request handlers
//! - `extractors` — authenticated-principal extraction
//! - `cookies` — token cookie transport
//! - `dto` — request/response shapes
//! - `error` — HTTP mapping for domain errors

pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
