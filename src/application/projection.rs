//! Catalog projection - joins cycle skill references with catalog records.
//!
//! Each skill list is resolved with one catalog lookup over its distinct ids.
//! Entries whose definition is missing from the catalog are dropped and
//! logged. Batch projection fans out one task per cycle with a concurrency
//! bound and writes results into indexed slots, so output order always
//! matches input order.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::domain::cycle::{
    CatalogSkill, Cycle, CycleDisplay, CycleWithParticipant, Participant, Party,
    SkillEntryDisplay, SkillEntrySet,
};
use crate::domain::foundation::{CycleId, DomainError, EmailAddress, SkillId};
use crate::ports::{ParticipantDirectory, SkillCatalog};

/// Default number of cycles projected concurrently.
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

pub struct CatalogProjector {
    catalog: Arc<dyn SkillCatalog>,
    directory: Arc<dyn ParticipantDirectory>,
    max_concurrency: usize,
}

impl CatalogProjector {
    pub fn new(catalog: Arc<dyn SkillCatalog>, directory: Arc<dyn ParticipantDirectory>) -> Self {
        Self {
            catalog,
            directory,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Sets the fan-out bound for batch projection. Zero is treated as one.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Resolves both skill lists of one cycle.
    pub async fn project(&self, cycle: &Cycle) -> Result<CycleDisplay, DomainError> {
        let quantitative = self
            .project_set(cycle.id(), cycle.quantitative_skills())
            .await?;
        let hard = self.project_set(cycle.id(), cycle.hard_skills()).await?;
        Ok(CycleDisplay::assemble(cycle, quantitative, hard))
    }

    /// Projects many cycles concurrently, preserving input order.
    pub async fn project_all(&self, cycles: &[Cycle]) -> Result<Vec<CycleDisplay>, DomainError> {
        let mut slots: Vec<Option<CycleDisplay>> = (0..cycles.len()).map(|_| None).collect();

        let mut projected = stream::iter(cycles.iter().cloned().enumerate())
            .map(|(index, cycle)| async move { (index, self.project(&cycle).await) })
            .buffer_unordered(self.max_concurrency);

        while let Some((index, result)) = projected.next().await {
            slots[index] = Some(result?);
        }

        Ok(slots.into_iter().flatten().collect())
    }

    /// Projects many cycles and joins each with one party's directory details.
    ///
    /// Rows whose participant cannot be resolved are dropped.
    pub async fn project_with_participants(
        &self,
        cycles: &[Cycle],
        party: Party,
    ) -> Result<Vec<CycleWithParticipant>, DomainError> {
        let displays = self.project_all(cycles).await?;
        if displays.is_empty() {
            return Ok(Vec::new());
        }

        let mut seen = HashSet::new();
        let emails: Vec<EmailAddress> = displays
            .iter()
            .map(|d| party.email_of(d))
            .filter(|email| seen.insert((*email).clone()))
            .cloned()
            .collect();

        let participants = self.participants_by_email(&emails).await?;

        Ok(displays
            .into_iter()
            .filter_map(|row| {
                let cycle_id = row.id;
                let email = party.email_of(&row).clone();
                match participants.get(&email) {
                    Some(participant) => Some(CycleWithParticipant::new(row, participant)),
                    None => {
                        tracing::debug!(%cycle_id, %email, "participant not in directory, dropping row");
                        None
                    }
                }
            })
            .collect())
    }

    /// Looks up one participant, if the directory knows them.
    pub async fn participant(&self, email: &EmailAddress) -> Result<Option<Participant>, DomainError> {
        Ok(self
            .participants_by_email(std::slice::from_ref(email))
            .await?
            .remove(email))
    }

    async fn participants_by_email(
        &self,
        emails: &[EmailAddress],
    ) -> Result<HashMap<EmailAddress, Participant>, DomainError> {
        Ok(self
            .directory
            .find_by_emails(emails)
            .await?
            .into_iter()
            .map(|p| (p.email.clone(), p))
            .collect())
    }

    async fn project_set(
        &self,
        cycle_id: CycleId,
        set: &SkillEntrySet,
    ) -> Result<Vec<SkillEntryDisplay>, DomainError> {
        if set.is_empty() {
            return Ok(Vec::new());
        }

        let ids = set.unique_skill_ids();
        let catalog: HashMap<SkillId, CatalogSkill> = self
            .catalog
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|skill| (skill.id, skill))
            .collect();

        let mut displays = Vec::with_capacity(set.len());
        for entry in set.entries() {
            match catalog.get(&entry.skill_id) {
                Some(skill) => displays.push(SkillEntryDisplay::new(entry, skill)),
                None => tracing::warn!(
                    cycle_id = %cycle_id,
                    skill_id = %entry.skill_id,
                    schema = ?set.schema(),
                    "skill missing from catalog, dropping entry"
                ),
            }
        }
        Ok(displays)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryParticipantDirectory, InMemorySkillCatalog};
    use crate::domain::cycle::{AssessmentWindow, CycleDraft, SkillAssessment};
    use crate::domain::foundation::Timestamp;

    fn email(raw: &str) -> EmailAddress {
        EmailAddress::parse("email", raw).unwrap()
    }

    fn cycle_for(subject: &str, legacy: Vec<SkillAssessment>, hard: Vec<SkillAssessment>) -> Cycle {
        let start = Timestamp::now();
        Cycle::create(CycleDraft {
            reviewer_email: email("lead@x.com"),
            subject_email: email(subject),
            window: AssessmentWindow::new(start, start.add_days(30)).unwrap(),
            quantitative_skills: legacy,
            hard_skills: hard,
            comment: String::new(),
        })
        .unwrap()
    }

    fn participant(raw: &str, given: &str) -> Participant {
        Participant {
            email: email(raw),
            given_name: given.to_string(),
            family_name: "Doe".to_string(),
            job_role: "Engineer".to_string(),
            level: "Mid".to_string(),
        }
    }

    fn projector(
        catalog: &InMemorySkillCatalog,
        directory: &InMemoryParticipantDirectory,
    ) -> CatalogProjector {
        CatalogProjector::new(Arc::new(catalog.clone()), Arc::new(directory.clone()))
            .with_max_concurrency(3)
    }

    fn assert_send<T: Send>(_: &T) {}

    #[test]
    fn batch_projection_futures_are_send() {
        let projector = projector(
            &InMemorySkillCatalog::new(),
            &InMemoryParticipantDirectory::new(),
        );
        let cycles = vec![cycle_for(
            "a@x.com",
            vec![],
            vec![SkillAssessment::new(SkillId::new(), 1, 1)],
        )];

        assert_send(&projector.project_all(&cycles));
        assert_send(&projector.project_with_participants(&cycles, Party::Subject));
    }

    #[tokio::test]
    async fn keeps_entry_order_and_duplicates() {
        let catalog = InMemorySkillCatalog::new();
        let rust = catalog.insert("Rust").await;
        let sql = catalog.insert("SQL").await;
        let cycle = cycle_for(
            "a@x.com",
            vec![
                SkillAssessment::new(sql, 1, 2),
                SkillAssessment::new(rust, 2, 3),
                SkillAssessment::new(sql, 3, 3),
            ],
            vec![],
        );

        let display = projector(&catalog, &InMemoryParticipantDirectory::new())
            .project(&cycle)
            .await
            .unwrap();

        let names: Vec<&str> = display
            .quantitative_skills
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["SQL", "Rust", "SQL"]);
        assert_eq!(display.quantitative_skills[2].personal_score, 3);
        // One lookup for the legacy list; the empty hard list is skipped.
        assert_eq!(catalog.lookups(), 1);
    }

    #[tokio::test]
    async fn drops_entries_missing_from_catalog() {
        let catalog = InMemorySkillCatalog::new();
        let rust = catalog.insert("Rust").await;
        let cycle = cycle_for(
            "a@x.com",
            vec![],
            vec![
                SkillAssessment::new(SkillId::new(), 1, 1),
                SkillAssessment::new(rust, 1, 2),
            ],
        );

        let display = projector(&catalog, &InMemoryParticipantDirectory::new())
            .project(&cycle)
            .await
            .unwrap();

        assert_eq!(display.hard_skills.len(), 1);
        assert_eq!(display.hard_skills[0].id, rust);
    }

    #[tokio::test]
    async fn project_all_preserves_input_order() {
        let catalog = InMemorySkillCatalog::new();
        let rust = catalog.insert("Rust").await;
        let cycles: Vec<Cycle> = (0..20)
            .map(|_| cycle_for("a@x.com", vec![SkillAssessment::new(rust, 1, 1)], vec![]))
            .collect();

        let displays = projector(&catalog, &InMemoryParticipantDirectory::new())
            .project_all(&cycles)
            .await
            .unwrap();

        assert_eq!(displays.len(), cycles.len());
        for (cycle, display) in cycles.iter().zip(&displays) {
            assert_eq!(cycle.id(), display.id);
            assert_eq!(display.quantitative_skills.len(), 1);
        }
    }

    #[tokio::test]
    async fn participant_join_drops_unresolved_rows() {
        let catalog = InMemorySkillCatalog::new();
        let rust = catalog.insert("Rust").await;
        let directory = InMemoryParticipantDirectory::new();
        directory.insert(participant("a@x.com", "Ada")).await;

        let cycles = vec![
            cycle_for("a@x.com", vec![SkillAssessment::new(rust, 1, 1)], vec![]),
            cycle_for("ghost@x.com", vec![SkillAssessment::new(rust, 1, 1)], vec![]),
            cycle_for("a@x.com", vec![SkillAssessment::new(rust, 2, 2)], vec![]),
        ];

        let rows = projector(&catalog, &directory)
            .project_with_participants(&cycles, Party::Subject)
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.given_name == "Ada"));
        assert_eq!(rows[0].cycle.id, cycles[0].id());
        assert_eq!(rows[1].cycle.id, cycles[2].id());
    }

    #[tokio::test]
    async fn reviewer_join_uses_reviewer_details() {
        let catalog = InMemorySkillCatalog::new();
        let rust = catalog.insert("Rust").await;
        let directory = InMemoryParticipantDirectory::new();
        directory.insert(participant("lead@x.com", "Lin")).await;

        let cycles = vec![cycle_for("a@x.com", vec![SkillAssessment::new(rust, 1, 1)], vec![])];
        let rows = projector(&catalog, &directory)
            .project_with_participants(&cycles, Party::Reviewer)
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].given_name, "Lin");
    }
}
