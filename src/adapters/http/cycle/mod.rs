//! HTTP adapter for the cycle module.
//!
//! Exposes cycle commands and queries as REST endpoints under `/cycles`.
//! Every route requires an authenticated caller.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{CycleApiError, CycleAppState};
pub use routes::cycle_router;
