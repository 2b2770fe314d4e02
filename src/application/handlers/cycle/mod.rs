//! Cycle command and query handlers.

// Command handlers
mod create_cycle;
mod delete_cycle;
mod finalize_cycle;
mod revise_goals;
mod transition_cycle;
mod update_cycle;

// Query handlers
mod get_cycle;
mod get_latest_open_cycle;
mod list_cycles;

#[cfg(test)]
mod test_support;

pub use create_cycle::{CreateCycleCommand, CreateCycleHandler, CreateCycleResult};
pub use delete_cycle::{DeleteCycleCommand, DeleteCycleHandler};
pub use finalize_cycle::{FinalizeCycleCommand, FinalizeCycleHandler, FinalizeOutcome};
pub use revise_goals::{GoalRevision, ReviseGoalsCommand, ReviseGoalsHandler};
pub use transition_cycle::{TransitionCycleCommand, TransitionCycleHandler};
pub use update_cycle::{SaveCycleCommand, SaveCycleHandler, UpdateCycleCommand, UpdateCycleHandler};

// Query handlers
pub use get_cycle::{
    GetCycleHandler, GetCycleProgressHandler, GetCycleProgressQuery, GetCycleQuery, GetCycleResult,
};
pub use get_latest_open_cycle::GetLatestOpenCycleHandler;
pub use list_cycles::{ListReceivedCyclesHandler, ListReceivedCyclesQuery, ListSentCyclesHandler};
