//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers mutate cycles and the subject profile; query handlers
//! read cycles and project them through the catalog.

pub mod handlers;
mod projection;

pub use projection::{CatalogProjector, DEFAULT_MAX_CONCURRENCY};
