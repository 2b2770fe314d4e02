//! CreateCycleHandler - Command handler for opening an assessment cycle.
//!
//! The authenticated caller is the subject; the command names the reviewer.
//! The stored cycle is returned projected against the catalog.

use std::sync::Arc;

use crate::application::CatalogProjector;
use crate::domain::cycle::{
    AssessmentWindow, Cycle, CycleDisplay, CycleDraft, CycleError, SkillAssessment,
};
use crate::domain::foundation::{EmailAddress, RequestContext};
use crate::ports::CycleRepository;

/// Command to create a cycle.
#[derive(Debug, Clone)]
pub struct CreateCycleCommand {
    pub reviewer_email: EmailAddress,
    pub window: AssessmentWindow,
    pub quantitative_skills: Vec<SkillAssessment>,
    pub hard_skills: Vec<SkillAssessment>,
    pub comment: String,
}

/// Result of successful cycle creation.
#[derive(Debug, Clone)]
pub struct CreateCycleResult {
    pub cycle: Cycle,
    pub display: CycleDisplay,
}

/// Handler for creating cycles.
pub struct CreateCycleHandler {
    repository: Arc<dyn CycleRepository>,
    projector: Arc<CatalogProjector>,
}

impl CreateCycleHandler {
    pub fn new(repository: Arc<dyn CycleRepository>, projector: Arc<CatalogProjector>) -> Self {
        Self {
            repository,
            projector,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCycleCommand,
        ctx: RequestContext,
    ) -> Result<CreateCycleResult, CycleError> {
        // 1. Build and validate (no store access before this succeeds)
        let cycle = Cycle::create(CycleDraft {
            reviewer_email: cmd.reviewer_email,
            subject_email: ctx.caller.clone(),
            window: cmd.window,
            quantitative_skills: cmd.quantitative_skills,
            hard_skills: cmd.hard_skills,
            comment: cmd.comment,
        })?;

        // 2. Persist
        self.repository.save(&cycle).await?;

        tracing::info!(
            cycle_id = %cycle.id(),
            subject = %cycle.subject_email(),
            reviewer = %cycle.reviewer_email(),
            correlation_id = %ctx.correlation_id(),
            "cycle created"
        );

        // 3. Project for the response
        let display = self.projector.project(&cycle).await?;

        Ok(CreateCycleResult { cycle, display })
    }
}
