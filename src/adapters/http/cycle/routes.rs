//! Route configuration for cycle endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use super::handlers::{
    create_cycle, delete_cycle, finalize_cycle, get_cycle, get_cycle_progress,
    get_latest_open_cycle, list_received_cycles, list_sent_cycles, revise_goals, save_cycle,
    transition_cycle, update_cycle, CycleAppState,
};

/// Creates the cycle router with all endpoints.
///
/// Routes:
/// - `POST /cycles` - Open a cycle for the caller
/// - `GET /cycles/:id` - Projected cycle with subject details
/// - `POST /cycles/:id` - Overwrite a cycle
/// - `DELETE /cycles/:id` - Remove a cycle
/// - `POST /cycles/:id/status` - Advance the lifecycle
/// - `POST /cycles/save/:id` - Overwrite content only
/// - `POST /cycles/update/:id` - Finalize into the subject profile
/// - `GET /cycles/progress/:id` - Legacy skill rows with the lead goal
/// - `PUT /cycles/goal` - Revise goals on the caller's open cycle
/// - `GET /cycles/email/user` - Cycles the caller opened
/// - `GET /cycles/email/latest` - The caller's latest cycle in progress
/// - `GET /cycles/email/:status/:page` - The caller's reviewer inbox
pub fn cycle_router() -> Router<CycleAppState> {
    Router::new()
        .route("/cycles", post(create_cycle))
        .route("/cycles/goal", put(revise_goals))
        .route("/cycles/email/user", get(list_sent_cycles))
        .route("/cycles/email/latest", get(get_latest_open_cycle))
        .route("/cycles/email/:status/:page", get(list_received_cycles))
        .route("/cycles/save/:id", post(save_cycle))
        .route("/cycles/update/:id", post(finalize_cycle))
        .route("/cycles/progress/:id", get(get_cycle_progress))
        .route("/cycles/:id/status", post(transition_cycle))
        .route(
            "/cycles/:id",
            get(get_cycle).post(update_cycle).delete(delete_cycle),
        )
}
