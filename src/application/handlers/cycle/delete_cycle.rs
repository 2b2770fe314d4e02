//! DeleteCycleHandler - hard-deletes a cycle document.

use std::sync::Arc;

use crate::domain::cycle::CycleError;
use crate::domain::foundation::{CycleId, RequestContext};
use crate::ports::CycleRepository;

#[derive(Debug, Clone)]
pub struct DeleteCycleCommand {
    pub cycle_id: CycleId,
}

pub struct DeleteCycleHandler {
    repository: Arc<dyn CycleRepository>,
}

impl DeleteCycleHandler {
    pub fn new(repository: Arc<dyn CycleRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: DeleteCycleCommand,
        ctx: RequestContext,
    ) -> Result<(), CycleError> {
        self.repository.delete(&cmd.cycle_id).await?;

        tracing::info!(
            cycle_id = %cmd.cycle_id,
            correlation_id = %ctx.correlation_id(),
            "cycle deleted"
        );
        Ok(())
    }
}
