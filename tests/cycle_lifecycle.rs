//! Integration tests for the cycle lifecycle.
//!
//! Drives the application handlers end to end over the in-memory adapters:
//! 1. A cycle is opened, advanced and finalized into the subject profile
//! 2. Reviewer listings page and filter in a stable order
//! 3. Deleted cycles disappear from every read path

use std::sync::Arc;

use skill_cycles::adapters::memory::{
    InMemoryCycleRepository, InMemoryParticipantDirectory, InMemorySkillCatalog,
    InMemorySubjectProfile,
};
use skill_cycles::application::handlers::cycle::{
    CreateCycleCommand, CreateCycleHandler, DeleteCycleCommand, DeleteCycleHandler,
    FinalizeCycleCommand, FinalizeCycleHandler, FinalizeOutcome, GetCycleHandler, GetCycleQuery,
    ListReceivedCyclesHandler, ListReceivedCyclesQuery, TransitionCycleCommand,
    TransitionCycleHandler,
};
use skill_cycles::application::CatalogProjector;
use skill_cycles::domain::cycle::{AssessmentWindow, CycleError, Participant, SkillAssessment};
use skill_cycles::domain::foundation::{
    CycleId, CycleStatus, EmailAddress, RequestContext, SkillId, StatusFilter, Timestamp,
};
use skill_cycles::ports::{Page, SubjectProfile};

// =============================================================================
// Test Infrastructure
// =============================================================================

const SUBJECT: &str = "a@x.com";
const REVIEWER: &str = "lead@x.com";

fn email(raw: &str) -> EmailAddress {
    EmailAddress::parse("email", raw).unwrap()
}

fn ctx(raw: &str) -> RequestContext {
    RequestContext::new(email(raw))
}

struct World {
    cycles: InMemoryCycleRepository,
    catalog: InMemorySkillCatalog,
    profile: InMemorySubjectProfile,
    projector: Arc<CatalogProjector>,
}

impl World {
    async fn new() -> Self {
        let catalog = InMemorySkillCatalog::new();
        let directory = InMemoryParticipantDirectory::new();
        directory
            .insert(Participant {
                email: email(SUBJECT),
                given_name: "Ada".to_string(),
                family_name: "Doe".to_string(),
                job_role: "Engineer".to_string(),
                level: "Mid".to_string(),
            })
            .await;

        let projector = Arc::new(CatalogProjector::new(
            Arc::new(catalog.clone()),
            Arc::new(directory),
        ));

        Self {
            cycles: InMemoryCycleRepository::new(),
            catalog,
            profile: InMemorySubjectProfile::new(),
            projector,
        }
    }

    async fn open(&self, start: Timestamp, hard: Vec<SkillAssessment>) -> CycleId {
        let handler = CreateCycleHandler::new(Arc::new(self.cycles.clone()), self.projector.clone());
        let result = handler
            .handle(
                CreateCycleCommand {
                    reviewer_email: email(REVIEWER),
                    window: AssessmentWindow::new(start, start.add_days(90)).unwrap(),
                    quantitative_skills: vec![],
                    hard_skills: hard,
                    comment: String::new(),
                },
                ctx(SUBJECT),
            )
            .await
            .unwrap();
        result.cycle.id()
    }

    async fn advance(&self, cycle_id: CycleId, target: CycleStatus) {
        TransitionCycleHandler::new(Arc::new(self.cycles.clone()), self.projector.clone())
            .handle(TransitionCycleCommand { cycle_id, target }, ctx(REVIEWER))
            .await
            .unwrap();
    }

    fn finalizer(&self) -> FinalizeCycleHandler {
        FinalizeCycleHandler::new(Arc::new(self.cycles.clone()), Arc::new(self.profile.clone()))
    }

    fn inbox(&self) -> ListReceivedCyclesHandler {
        ListReceivedCyclesHandler::new(Arc::new(self.cycles.clone()), self.projector.clone())
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn finalized_cycle_records_personal_scores_in_profile() {
    let world = World::new().await;
    let rust = world.catalog.insert("Rust").await;
    let id = world
        .open(Timestamp::now(), vec![SkillAssessment::new(rust, 2, 3)])
        .await;

    world.advance(id, CycleStatus::Approved).await;
    world.advance(id, CycleStatus::InProgress).await;
    world.advance(id, CycleStatus::Done).await;

    let outcome = world
        .finalizer()
        .handle(FinalizeCycleCommand { cycle_id: id }, ctx(REVIEWER))
        .await
        .unwrap();
    assert_eq!(outcome, FinalizeOutcome::Finalized { updated: 0, added: 1 });

    let skills = world.profile.skills(&email(SUBJECT)).await.unwrap();
    assert_eq!(skills.len(), 1);
    assert_eq!(skills[0].skill_id, rust);
    assert_eq!(skills[0].score, 2);
}

#[tokio::test]
async fn second_finalize_leaves_profile_alone() {
    let world = World::new().await;
    let rust = world.catalog.insert("Rust").await;
    let id = world
        .open(Timestamp::now(), vec![SkillAssessment::new(rust, 2, 2)])
        .await;

    world
        .finalizer()
        .handle(FinalizeCycleCommand { cycle_id: id }, ctx(REVIEWER))
        .await
        .unwrap();
    world
        .profile
        .update_matching_skill(&email(SUBJECT), rust, 4)
        .await
        .unwrap();

    let again = world
        .finalizer()
        .handle(FinalizeCycleCommand { cycle_id: id }, ctx(REVIEWER))
        .await
        .unwrap();

    assert_eq!(again, FinalizeOutcome::AlreadyFinalized);
    let skills = world.profile.skills(&email(SUBJECT)).await.unwrap();
    assert_eq!(skills[0].score, 4);
}

#[tokio::test]
async fn deleted_cycle_is_not_found() {
    let world = World::new().await;
    let id = world
        .open(
            Timestamp::now(),
            vec![SkillAssessment::new(SkillId::new(), 1, 1)],
        )
        .await;

    DeleteCycleHandler::new(Arc::new(world.cycles.clone()))
        .handle(DeleteCycleCommand { cycle_id: id }, ctx(SUBJECT))
        .await
        .unwrap();

    let err = GetCycleHandler::new(Arc::new(world.cycles.clone()), world.projector.clone())
        .handle(GetCycleQuery { cycle_id: id })
        .await
        .unwrap_err();
    assert_eq!(err, CycleError::NotFound(id));
}

// =============================================================================
// Listings
// =============================================================================

#[tokio::test]
async fn reviewer_inbox_pages_by_ten() {
    let world = World::new().await;
    let base = Timestamp::now();
    for day in 0..25 {
        world
            .open(
                base.add_days(day),
                vec![SkillAssessment::new(SkillId::new(), 1, 1)],
            )
            .await;
    }

    let mut sizes = Vec::new();
    for number in 1..=4 {
        let rows = world
            .inbox()
            .handle(
                ListReceivedCyclesQuery {
                    filter: StatusFilter::All,
                    page: Page::new(number).unwrap(),
                },
                ctx(REVIEWER),
            )
            .await
            .unwrap();
        sizes.push(rows.len());
    }

    assert_eq!(sizes, vec![10, 10, 5, 0]);
}

#[tokio::test]
async fn reviewer_inbox_is_newest_first_and_filtered() {
    let world = World::new().await;
    let base = Timestamp::now();
    let older = world
        .open(base, vec![SkillAssessment::new(SkillId::new(), 1, 1)])
        .await;
    let newer = world
        .open(
            base.add_days(30),
            vec![SkillAssessment::new(SkillId::new(), 1, 1)],
        )
        .await;
    world.advance(older, CycleStatus::Approved).await;

    let all = world
        .inbox()
        .handle(
            ListReceivedCyclesQuery {
                filter: StatusFilter::All,
                page: Page::first(),
            },
            ctx(REVIEWER),
        )
        .await
        .unwrap();
    let ids: Vec<CycleId> = all.iter().map(|row| row.cycle.id).collect();
    assert_eq!(ids, vec![newer, older]);
    assert_eq!(all[0].given_name, "Ada");

    let approved = world
        .inbox()
        .handle(
            ListReceivedCyclesQuery {
                filter: StatusFilter::Only(CycleStatus::Approved),
                page: Page::first(),
            },
            ctx(REVIEWER),
        )
        .await
        .unwrap();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].cycle.id, older);
}

#[tokio::test]
async fn subject_sees_nothing_in_reviewer_inbox() {
    let world = World::new().await;
    world
        .open(
            Timestamp::now(),
            vec![SkillAssessment::new(SkillId::new(), 1, 1)],
        )
        .await;

    let rows = world
        .inbox()
        .handle(
            ListReceivedCyclesQuery {
                filter: StatusFilter::All,
                page: Page::first(),
            },
            ctx(SUBJECT),
        )
        .await
        .unwrap();

    assert!(rows.is_empty());
}
