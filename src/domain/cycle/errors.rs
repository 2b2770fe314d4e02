//! Cycle-specific error types.

use crate::domain::foundation::{
    CycleId, CycleStatus, DomainError, EmailAddress, ErrorCode, SkillId, ValidationError,
};

use super::score::{InvariantError, Score};

/// Cycle-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleError {
    /// Cycle was not found.
    NotFound(CycleId),
    /// The subject has no cycle in progress.
    NoOpenCycle(EmailAddress),
    /// Neither skill list has an entry.
    EmptySkillSet,
    /// An entry breaks the personal/goal rule.
    GoalScoreMismatch {
        skill_id: SkillId,
        personal: Score,
        goal: Score,
    },
    /// Status change not allowed from the current status.
    InvalidTransition { from: CycleStatus, to: CycleStatus },
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Store failure, wrapped.
    Infrastructure(String),
    /// Store unreachable or timed out.
    Unavailable(String),
}

impl CycleError {
    pub fn not_found(id: CycleId) -> Self {
        CycleError::NotFound(id)
    }
    pub fn goal_score_mismatch(skill_id: SkillId, err: InvariantError) -> Self {
        let InvariantError::GoalScoreMismatch { personal, goal } = err;
        CycleError::GoalScoreMismatch {
            skill_id,
            personal,
            goal,
        }
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CycleError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        CycleError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            CycleError::NotFound(_) | CycleError::NoOpenCycle(_) => ErrorCode::CycleNotFound,
            CycleError::EmptySkillSet => ErrorCode::EmptySkillSet,
            CycleError::GoalScoreMismatch { .. } => ErrorCode::GoalScoreMismatch,
            CycleError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            CycleError::ValidationFailed { .. } => ErrorCode::InvalidInput,
            CycleError::Infrastructure(_) => ErrorCode::DatabaseError,
            CycleError::Unavailable(_) => ErrorCode::StoreUnavailable,
        }
    }
    pub fn message(&self) -> String {
        match self {
            CycleError::NotFound(id) => format!("Cycle not found: {}", id),
            CycleError::NoOpenCycle(email) => format!("No cycle in progress for {}", email),
            CycleError::EmptySkillSet => {
                "A cycle needs at least one skill in either list".to_string()
            }
            CycleError::GoalScoreMismatch {
                skill_id,
                personal,
                goal,
            } => format!(
                "Goal score {} does not match personal score {} for skill {}",
                goal, personal, skill_id
            ),
            CycleError::InvalidTransition { from, to } => {
                format!("Cannot move cycle from {} to {}", from, to)
            }
            CycleError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CycleError::Infrastructure(msg) => format!("Error: {}", msg),
            CycleError::Unavailable(msg) => format!("Store unavailable: {}", msg),
        }
    }
}

impl std::fmt::Display for CycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CycleError {}

impl From<ValidationError> for CycleError {
    fn from(err: ValidationError) -> Self {
        CycleError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for CycleError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::CycleNotFound => match err.details.get("id").map(|s| CycleId::parse(s)) {
                Some(Ok(id)) => CycleError::NotFound(id),
                _ => CycleError::Infrastructure(err.to_string()),
            },
            ErrorCode::InvalidInput | ErrorCode::InvalidId => CycleError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "id".to_string()),
                message: err.message,
            },
            ErrorCode::EmptySkillSet => CycleError::EmptySkillSet,
            ErrorCode::StoreUnavailable => CycleError::Unavailable(err.message),
            _ => CycleError::Infrastructure(err.to_string()),
        }
    }
}

impl From<CycleError> for DomainError {
    fn from(err: CycleError) -> Self {
        let domain = DomainError::new(err.code(), err.message());
        match err {
            CycleError::NotFound(id) => domain.with_detail("id", id.to_string()),
            CycleError::GoalScoreMismatch { skill_id, .. } => {
                domain.with_detail("skill_id", skill_id.to_string())
            }
            CycleError::ValidationFailed { field, .. } => domain.with_detail("field", field),
            _ => domain,
        }
    }
}
