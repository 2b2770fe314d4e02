//! FinalizeCycleHandler - writes a cycle's final scores into the subject
//! profile.
//!
//! Runs as a two-step saga over the distinct skills of both lists:
//!
//! 1. update every existing profile entry for each skill to its final score
//! 2. add an entry for each skill the profile does not record yet
//!
//! then records `finalized_at` on the cycle. The steps are not atomic, but
//! re-running is safe: step one re-applies identical scores and step two
//! never duplicates an entry. Once `finalized_at` is set the handler returns
//! without touching the profile. Status is never changed.

use std::sync::Arc;

use crate::domain::cycle::CycleError;
use crate::domain::foundation::{CycleId, RequestContext, Timestamp};
use crate::ports::{CycleRepository, SubjectProfile};

#[derive(Debug, Clone)]
pub struct FinalizeCycleCommand {
    pub cycle_id: CycleId,
}

/// What finalization did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalizeOutcome {
    Finalized {
        /// Skills whose existing profile entry was updated.
        updated: usize,
        /// Skills newly added to the profile.
        added: usize,
    },
    /// The cycle had been finalized before; nothing was written.
    AlreadyFinalized,
}

pub struct FinalizeCycleHandler {
    repository: Arc<dyn CycleRepository>,
    profile: Arc<dyn SubjectProfile>,
}

impl FinalizeCycleHandler {
    pub fn new(repository: Arc<dyn CycleRepository>, profile: Arc<dyn SubjectProfile>) -> Self {
        Self {
            repository,
            profile,
        }
    }

    pub async fn handle(
        &self,
        cmd: FinalizeCycleCommand,
        ctx: RequestContext,
    ) -> Result<FinalizeOutcome, CycleError> {
        // 1. Load
        let cycle = self
            .repository
            .find_by_id(&cmd.cycle_id)
            .await?
            .ok_or_else(|| CycleError::not_found(cmd.cycle_id))?;

        if cycle.is_finalized() {
            tracing::debug!(cycle_id = %cycle.id(), "cycle already finalized, skipping write-back");
            return Ok(FinalizeOutcome::AlreadyFinalized);
        }

        // Overwrites skip the score rule, so check it before any profile write
        cycle.validate_entries()?;

        let subject = cycle.subject_email();
        let scores = cycle.final_scores();

        // 2. Update skills the profile already records
        let mut updated = 0;
        for (skill_id, score) in &scores {
            if self
                .profile
                .update_matching_skill(subject, *skill_id, *score)
                .await?
            {
                updated += 1;
            }
        }

        // 3. Add the ones it does not
        let mut added = 0;
        for (skill_id, score) in &scores {
            if self
                .profile
                .add_skill_if_absent(subject, *skill_id, *score)
                .await?
            {
                added += 1;
            }
        }

        // 4. Record completion
        self.repository
            .mark_finalized(&cycle.id(), Timestamp::now())
            .await?;

        tracing::info!(
            cycle_id = %cycle.id(),
            subject = %subject,
            updated,
            added,
            correlation_id = %ctx.correlation_id(),
            "final scores written to profile"
        );

        Ok(FinalizeOutcome::Finalized { updated, added })
    }
}
