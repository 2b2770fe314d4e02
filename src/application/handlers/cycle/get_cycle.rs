//! GetCycleHandler and GetCycleProgressHandler - single-cycle queries.

use std::sync::Arc;

use crate::application::CatalogProjector;
use crate::domain::cycle::{CycleDisplay, CycleError, Participant, ProgressRow};
use crate::domain::foundation::CycleId;
use crate::ports::CycleRepository;

/// Query to get a cycle by ID.
#[derive(Debug, Clone)]
pub struct GetCycleQuery {
    pub cycle_id: CycleId,
}

/// A projected cycle with the subject's directory details, if known.
#[derive(Debug, Clone)]
pub struct GetCycleResult {
    pub cycle: CycleDisplay,
    pub subject: Option<Participant>,
}

pub struct GetCycleHandler {
    repository: Arc<dyn CycleRepository>,
    projector: Arc<CatalogProjector>,
}

impl GetCycleHandler {
    pub fn new(repository: Arc<dyn CycleRepository>, projector: Arc<CatalogProjector>) -> Self {
        Self {
            repository,
            projector,
        }
    }

    pub async fn handle(&self, query: GetCycleQuery) -> Result<GetCycleResult, CycleError> {
        let cycle = self
            .repository
            .find_by_id(&query.cycle_id)
            .await?
            .ok_or_else(|| CycleError::not_found(query.cycle_id))?;

        let display = self.projector.project(&cycle).await?;
        let subject = self.projector.participant(cycle.subject_email()).await?;

        Ok(GetCycleResult {
            cycle: display,
            subject,
        })
    }
}

/// Query for a cycle's per-skill progress rows.
#[derive(Debug, Clone)]
pub struct GetCycleProgressQuery {
    pub cycle_id: CycleId,
}

pub struct GetCycleProgressHandler {
    repository: Arc<dyn CycleRepository>,
    projector: Arc<CatalogProjector>,
}

impl GetCycleProgressHandler {
    pub fn new(repository: Arc<dyn CycleRepository>, projector: Arc<CatalogProjector>) -> Self {
        Self {
            repository,
            projector,
        }
    }

    pub async fn handle(&self, query: GetCycleProgressQuery) -> Result<Vec<ProgressRow>, CycleError> {
        let cycle = self
            .repository
            .find_by_id(&query.cycle_id)
            .await?
            .ok_or_else(|| CycleError::not_found(query.cycle_id))?;

        Ok(self.projector.project(&cycle).await?.progress())
    }
}
