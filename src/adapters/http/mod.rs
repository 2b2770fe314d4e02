//! HTTP adapters - REST API implementations.

pub mod cycle;
pub mod middleware;

use axum::Router;

pub use cycle::{cycle_router, CycleAppState};
pub use middleware::{auth_middleware, AuthState};

/// Builds the authenticated API router.
///
/// Cross-cutting layers (tracing, CORS, timeouts, request ids) are added by
/// the binary.
pub fn api_router(state: CycleAppState, validator: AuthState) -> Router {
    cycle_router()
        .with_state(state)
        .layer(axum::middleware::from_fn_with_state(validator, auth_middleware))
}
