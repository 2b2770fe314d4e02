//! Score model - the consistency rule between personal and goal scores.

use thiserror::Error;

/// Skill level on the catalog's integer scale.
pub type Score = u32;

/// A skill entry whose scores break the personal/goal rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("goal score {goal} does not match personal score {personal}")]
    GoalScoreMismatch { personal: Score, goal: Score },
}

/// Checks that a goal is at most one level above the personal score and
/// never below it: `personal <= goal <= personal + 1`.
pub fn validate_entry(personal: Score, goal: Score) -> Result<(), InvariantError> {
    if goal < personal || goal > personal.saturating_add(1) {
        return Err(InvariantError::GoalScoreMismatch { personal, goal });
    }
    Ok(())
}
