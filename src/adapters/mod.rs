//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-process stores for tests and local runs
//! - `postgres` - Production stores
//! - `auth` - Session validators (JWT, mock)
//! - `http` - axum routes, handlers and middleware

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
