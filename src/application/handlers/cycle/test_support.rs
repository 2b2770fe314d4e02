//! Shared fixtures for cycle handler tests.

use std::sync::Arc;

use crate::adapters::memory::{
    InMemoryCycleRepository, InMemoryParticipantDirectory, InMemorySkillCatalog,
    InMemorySubjectProfile,
};
use crate::application::CatalogProjector;
use crate::domain::cycle::{AssessmentWindow, Cycle, CycleDraft, Participant, SkillAssessment};
use crate::domain::foundation::{CycleStatus, EmailAddress, RequestContext, Timestamp};
use crate::ports::CycleRepository;

pub const SUBJECT: &str = "a@x.com";
pub const REVIEWER: &str = "lead@x.com";

pub fn email(raw: &str) -> EmailAddress {
    EmailAddress::parse("email", raw).unwrap()
}

pub fn ctx(raw: &str) -> RequestContext {
    RequestContext::new(email(raw)).with_correlation_id("test-correlation")
}

pub fn window() -> AssessmentWindow {
    let start = Timestamp::now();
    AssessmentWindow::new(start, start.add_days(90)).unwrap()
}

pub fn participant(raw: &str, given_name: &str) -> Participant {
    Participant {
        email: email(raw),
        given_name: given_name.to_string(),
        family_name: "Doe".to_string(),
        job_role: "Engineer".to_string(),
        level: "Mid".to_string(),
    }
}

pub struct Fixture {
    pub cycles: InMemoryCycleRepository,
    pub catalog: InMemorySkillCatalog,
    pub profile: InMemorySubjectProfile,
    pub directory: InMemoryParticipantDirectory,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            cycles: InMemoryCycleRepository::new(),
            catalog: InMemorySkillCatalog::new(),
            profile: InMemorySubjectProfile::new(),
            directory: InMemoryParticipantDirectory::new(),
        }
    }

    pub fn repo(&self) -> Arc<dyn CycleRepository> {
        Arc::new(self.cycles.clone())
    }

    pub fn projector(&self) -> Arc<CatalogProjector> {
        Arc::new(CatalogProjector::new(
            Arc::new(self.catalog.clone()),
            Arc::new(self.directory.clone()),
        ))
    }

    /// Stores a pending cycle for `SUBJECT` with the given hard skills.
    pub async fn pending_cycle(&self, hard: Vec<SkillAssessment>) -> Cycle {
        let cycle = Cycle::create(CycleDraft {
            reviewer_email: email(REVIEWER),
            subject_email: email(SUBJECT),
            window: window(),
            quantitative_skills: vec![],
            hard_skills: hard,
            comment: String::new(),
        })
        .unwrap();
        self.cycles.save(&cycle).await.unwrap();
        cycle
    }

    /// Stores a cycle for `SUBJECT` already moved to `InProgress`.
    pub async fn open_cycle(&self, hard: Vec<SkillAssessment>) -> Cycle {
        let mut cycle = self.pending_cycle(hard).await;
        cycle.transition_to(CycleStatus::Approved).unwrap();
        cycle.transition_to(CycleStatus::InProgress).unwrap();
        self.cycles.update(&cycle).await.unwrap();
        cycle
    }
}
