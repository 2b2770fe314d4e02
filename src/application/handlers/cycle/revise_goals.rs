//! ReviseGoalsHandler - the subject proposes new hard-skill goals.
//!
//! Targets the caller's latest cycle in progress. Every personal score is
//! re-based on the level stored in the caller's profile for that skill name
//! (missing means 0) before the score rule is checked. On success the
//! hard-skill list is replaced and the cycle reopens as `Pending` with the
//! `Review` marker.

use std::sync::Arc;

use crate::domain::cycle::{Cycle, CycleError, Score, SkillAssessment};
use crate::domain::foundation::{RequestContext, SkillId};
use crate::ports::{CycleRepository, SubjectProfile};

/// One revised goal as submitted by the subject.
#[derive(Debug, Clone)]
pub struct GoalRevision {
    pub skill_id: SkillId,
    /// Name under which the profile records the current level.
    pub skill_name: String,
    pub goal_score: Score,
    pub comment: String,
}

#[derive(Debug, Clone)]
pub struct ReviseGoalsCommand {
    pub revisions: Vec<GoalRevision>,
}

pub struct ReviseGoalsHandler {
    repository: Arc<dyn CycleRepository>,
    profile: Arc<dyn SubjectProfile>,
}

impl ReviseGoalsHandler {
    pub fn new(repository: Arc<dyn CycleRepository>, profile: Arc<dyn SubjectProfile>) -> Self {
        Self {
            repository,
            profile,
        }
    }

    pub async fn handle(
        &self,
        cmd: ReviseGoalsCommand,
        ctx: RequestContext,
    ) -> Result<Cycle, CycleError> {
        let subject = &ctx.caller;

        // 1. Locate the open cycle
        let mut cycle = self
            .repository
            .find_latest_open_by_subject(subject)
            .await?
            .ok_or_else(|| CycleError::NoOpenCycle(subject.clone()))?;

        // 2. Re-base personal scores on the stored profile
        let mut revised = Vec::with_capacity(cmd.revisions.len());
        for revision in cmd.revisions {
            let current = self
                .profile
                .read_current_level(subject, &revision.skill_name)
                .await?
                .unwrap_or(0);
            revised.push(
                SkillAssessment::new(revision.skill_id, current, revision.goal_score)
                    .with_comment(revision.comment),
            );
        }

        // 3. Validate and replace
        cycle.revise_hard_skills(revised)?;

        // 4. Persist
        self.repository.update(&cycle).await?;

        tracing::info!(
            cycle_id = %cycle.id(),
            subject = %subject,
            entries = cycle.hard_skills().len(),
            correlation_id = %ctx.correlation_id(),
            "hard-skill goals revised"
        );

        Ok(cycle)
    }
}
