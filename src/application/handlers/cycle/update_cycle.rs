//! UpdateCycleHandler and SaveCycleHandler - whole-document overwrites.
//!
//! `UpdateCycle` replaces content, status and marker for administrative
//! correction. `SaveCycle` replaces content only, for a reviewer saving
//! in-flight edits. Neither re-checks the score rule.

use std::sync::Arc;

use crate::application::CatalogProjector;
use crate::domain::cycle::{CycleContent, CycleDisplay, CycleError};
use crate::domain::foundation::{CycleId, CycleStatus, RequestContext, ReviewState};
use crate::ports::CycleRepository;

/// Command to overwrite a cycle, lifecycle included.
#[derive(Debug, Clone)]
pub struct UpdateCycleCommand {
    pub cycle_id: CycleId,
    pub content: CycleContent,
    pub status: CycleStatus,
    pub state: ReviewState,
}

/// Command to overwrite a cycle's content, keeping its lifecycle.
#[derive(Debug, Clone)]
pub struct SaveCycleCommand {
    pub cycle_id: CycleId,
    pub content: CycleContent,
}

pub struct UpdateCycleHandler {
    repository: Arc<dyn CycleRepository>,
    projector: Arc<CatalogProjector>,
}

impl UpdateCycleHandler {
    pub fn new(repository: Arc<dyn CycleRepository>, projector: Arc<CatalogProjector>) -> Self {
        Self {
            repository,
            projector,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateCycleCommand,
        ctx: RequestContext,
    ) -> Result<CycleDisplay, CycleError> {
        let mut cycle = self
            .repository
            .find_by_id(&cmd.cycle_id)
            .await?
            .ok_or_else(|| CycleError::not_found(cmd.cycle_id))?;

        cycle.replace_whole(cmd.content, cmd.status, cmd.state);
        self.repository.update(&cycle).await?;

        tracing::info!(
            cycle_id = %cycle.id(),
            status = %cycle.status(),
            correlation_id = %ctx.correlation_id(),
            "cycle overwritten"
        );

        Ok(self.projector.project(&cycle).await?)
    }
}

pub struct SaveCycleHandler {
    repository: Arc<dyn CycleRepository>,
    projector: Arc<CatalogProjector>,
}

impl SaveCycleHandler {
    pub fn new(repository: Arc<dyn CycleRepository>, projector: Arc<CatalogProjector>) -> Self {
        Self {
            repository,
            projector,
        }
    }

    pub async fn handle(
        &self,
        cmd: SaveCycleCommand,
        ctx: RequestContext,
    ) -> Result<CycleDisplay, CycleError> {
        let mut cycle = self
            .repository
            .find_by_id(&cmd.cycle_id)
            .await?
            .ok_or_else(|| CycleError::not_found(cmd.cycle_id))?;

        cycle.save_edits(cmd.content);
        self.repository.update(&cycle).await?;

        tracing::info!(
            cycle_id = %cycle.id(),
            correlation_id = %ctx.correlation_id(),
            "cycle edits saved"
        );

        Ok(self.projector.project(&cycle).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::domain::cycle::{Cycle, SkillAssessment, SkillEntry};
    use crate::domain::foundation::{SkillId, Timestamp};

    fn content_from(cycle: &Cycle, hard: Vec<SkillEntry>) -> CycleContent {
        CycleContent {
            reviewer_email: cycle.reviewer_email().clone(),
            subject_email: cycle.subject_email().clone(),
            window: cycle.window(),
            quantitative_skills: vec![],
            hard_skills: hard,
            comment: "corrected".to_string(),
        }
    }

    #[tokio::test]
    async fn update_overwrites_everything_and_clears_finalization() {
        let fx = Fixture::new();
        let skill = fx.catalog.insert("Rust").await;
        let cycle = fx.open_cycle(vec![SkillAssessment::new(skill, 1, 2)]).await;
        fx.cycles
            .mark_finalized(&cycle.id(), Timestamp::now())
            .await
            .unwrap();

        let entry = SkillEntry {
            skill_id: skill,
            personal_score: 4,
            goal_score: 1,
            lead_goal_score: 1,
            final_score: 4,
            comment: String::new(),
        };
        let handler = UpdateCycleHandler::new(fx.repo(), fx.projector());
        let display = handler
            .handle(
                UpdateCycleCommand {
                    cycle_id: cycle.id(),
                    content: content_from(&cycle, vec![entry]),
                    status: CycleStatus::Done,
                    state: ReviewState::None,
                },
                ctx(REVIEWER),
            )
            .await
            .unwrap();

        assert_eq!(display.status, CycleStatus::Done);
        assert_eq!(display.comment, "corrected");
        assert_eq!(display.hard_skills[0].personal_score, 4);
        assert!(display.finalized_at.is_none());
    }

    #[tokio::test]
    async fn update_missing_cycle_is_not_found() {
        let fx = Fixture::new();
        let cycle = fx.pending_cycle(vec![SkillAssessment::new(SkillId::new(), 1, 1)]).await;
        let missing = CycleId::new();

        let handler = UpdateCycleHandler::new(fx.repo(), fx.projector());
        let err = handler
            .handle(
                UpdateCycleCommand {
                    cycle_id: missing,
                    content: content_from(&cycle, vec![]),
                    status: CycleStatus::Pending,
                    state: ReviewState::None,
                },
                ctx(REVIEWER),
            )
            .await
            .unwrap_err();

        assert_eq!(err, CycleError::NotFound(missing));
    }

    #[tokio::test]
    async fn save_keeps_lifecycle() {
        let fx = Fixture::new();
        let cycle = fx.open_cycle(vec![SkillAssessment::new(SkillId::new(), 1, 1)]).await;

        let handler = SaveCycleHandler::new(fx.repo(), fx.projector());
        let display = handler
            .handle(
                SaveCycleCommand {
                    cycle_id: cycle.id(),
                    content: content_from(&cycle, vec![]),
                },
                ctx(REVIEWER),
            )
            .await
            .unwrap();

        assert_eq!(display.status, CycleStatus::InProgress);
        assert_eq!(display.comment, "corrected");
    }
}
