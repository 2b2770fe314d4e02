//! GetLatestOpenCycleHandler - the caller's most recent cycle in progress.

use std::sync::Arc;

use crate::application::CatalogProjector;
use crate::domain::cycle::{CycleDisplay, CycleError};
use crate::domain::foundation::RequestContext;
use crate::ports::CycleRepository;

pub struct GetLatestOpenCycleHandler {
    repository: Arc<dyn CycleRepository>,
    projector: Arc<CatalogProjector>,
}

impl GetLatestOpenCycleHandler {
    pub fn new(repository: Arc<dyn CycleRepository>, projector: Arc<CatalogProjector>) -> Self {
        Self {
            repository,
            projector,
        }
    }

    pub async fn handle(&self, ctx: RequestContext) -> Result<CycleDisplay, CycleError> {
        let cycle = self
            .repository
            .find_latest_open_by_subject(&ctx.caller)
            .await?
            .ok_or_else(|| CycleError::NoOpenCycle(ctx.caller.clone()))?;

        Ok(self.projector.project(&cycle).await?)
    }
}
