//! TransitionCycleHandler - moves a cycle one status forward.

use std::sync::Arc;

use crate::application::CatalogProjector;
use crate::domain::cycle::{CycleDisplay, CycleError};
use crate::domain::foundation::{CycleId, CycleStatus, RequestContext};
use crate::ports::CycleRepository;

#[derive(Debug, Clone)]
pub struct TransitionCycleCommand {
    pub cycle_id: CycleId,
    pub target: CycleStatus,
}

pub struct TransitionCycleHandler {
    repository: Arc<dyn CycleRepository>,
    projector: Arc<CatalogProjector>,
}

impl TransitionCycleHandler {
    pub fn new(repository: Arc<dyn CycleRepository>, projector: Arc<CatalogProjector>) -> Self {
        Self {
            repository,
            projector,
        }
    }

    pub async fn handle(
        &self,
        cmd: TransitionCycleCommand,
        ctx: RequestContext,
    ) -> Result<CycleDisplay, CycleError> {
        let mut cycle = self
            .repository
            .find_by_id(&cmd.cycle_id)
            .await?
            .ok_or_else(|| CycleError::not_found(cmd.cycle_id))?;

        let from = cycle.status();
        cycle.transition_to(cmd.target)?;
        self.repository.update(&cycle).await?;

        tracing::info!(
            cycle_id = %cycle.id(),
            from = %from,
            to = %cycle.status(),
            correlation_id = %ctx.correlation_id(),
            "cycle status changed"
        );

        Ok(self.projector.project(&cycle).await?)
    }
}
