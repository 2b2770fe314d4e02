//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the assessment domain.

mod auth;
mod command;
mod cycle_status;
mod email;
mod errors;
mod ids;
mod review_state;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use command::RequestContext;
pub use cycle_status::{CycleStatus, StatusFilter};
pub use email::EmailAddress;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CycleId, SkillId};
pub use review_state::ReviewState;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
