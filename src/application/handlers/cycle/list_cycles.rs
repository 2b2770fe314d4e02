//! Listing queries for the two sides of a cycle.
//!
//! - received: the caller is the reviewer; rows carry the subject's details
//! - sent: the caller is the subject; rows carry the reviewer's details

use std::sync::Arc;

use crate::application::CatalogProjector;
use crate::domain::cycle::{CycleError, CycleWithParticipant, Party};
use crate::domain::foundation::{RequestContext, StatusFilter};
use crate::ports::{CycleRepository, Page};

/// Query for one page of the caller's reviewer inbox.
#[derive(Debug, Clone)]
pub struct ListReceivedCyclesQuery {
    pub filter: StatusFilter,
    pub page: Page,
}

pub struct ListReceivedCyclesHandler {
    repository: Arc<dyn CycleRepository>,
    projector: Arc<CatalogProjector>,
}

impl ListReceivedCyclesHandler {
    pub fn new(repository: Arc<dyn CycleRepository>, projector: Arc<CatalogProjector>) -> Self {
        Self {
            repository,
            projector,
        }
    }

    pub async fn handle(
        &self,
        query: ListReceivedCyclesQuery,
        ctx: RequestContext,
    ) -> Result<Vec<CycleWithParticipant>, CycleError> {
        let cycles = self
            .repository
            .list_by_reviewer(&ctx.caller, query.filter, query.page)
            .await?;

        Ok(self
            .projector
            .project_with_participants(&cycles, Party::Subject)
            .await?)
    }
}

pub struct ListSentCyclesHandler {
    repository: Arc<dyn CycleRepository>,
    projector: Arc<CatalogProjector>,
}

impl ListSentCyclesHandler {
    pub fn new(repository: Arc<dyn CycleRepository>, projector: Arc<CatalogProjector>) -> Self {
        Self {
            repository,
            projector,
        }
    }

    pub async fn handle(&self, ctx: RequestContext) -> Result<Vec<CycleWithParticipant>, CycleError> {
        let cycles = self.repository.list_by_subject(&ctx.caller).await?;

        Ok(self
            .projector
            .project_with_participants(&cycles, Party::Reviewer)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::domain::cycle::SkillAssessment;
    use crate::domain::foundation::{CycleStatus, ErrorCode};

    async fn seeded(count: usize) -> Fixture {
        let fx = Fixture::new();
        fx.directory.insert(participant(SUBJECT, "Ada")).await;
        fx.directory.insert(participant(REVIEWER, "Lin")).await;
        let rust = fx.catalog.insert("Rust").await;
        for _ in 0..count {
            fx.pending_cycle(vec![SkillAssessment::new(rust, 1, 2)]).await;
        }
        fx
    }

    fn received(page: i64) -> ListReceivedCyclesQuery {
        ListReceivedCyclesQuery {
            filter: StatusFilter::All,
            page: Page::new(page).unwrap(),
        }
    }

    #[tokio::test]
    async fn pages_reviewer_inbox_by_ten() {
        let fx = seeded(25).await;
        let handler = ListReceivedCyclesHandler::new(fx.repo(), fx.projector());

        let mut sizes = Vec::new();
        for page in [1, 3, 4] {
            sizes.push(handler.handle(received(page), ctx(REVIEWER)).await.unwrap().len());
        }

        assert_eq!(sizes, vec![10, 5, 0]);
    }

    #[tokio::test]
    async fn received_rows_carry_subject_details() {
        let fx = seeded(1).await;
        let rows = ListReceivedCyclesHandler::new(fx.repo(), fx.projector())
            .handle(received(1), ctx(REVIEWER))
            .await
            .unwrap();

        assert_eq!(rows[0].given_name, "Ada");
        assert_eq!(rows[0].cycle.hard_skills[0].name, "Rust");
    }

    #[tokio::test]
    async fn status_filter_applies() {
        let fx = seeded(3).await;
        let handler = ListReceivedCyclesHandler::new(fx.repo(), fx.projector());

        let rows = handler
            .handle(
                ListReceivedCyclesQuery {
                    filter: StatusFilter::Only(CycleStatus::Done),
                    page: Page::first(),
                },
                ctx(REVIEWER),
            )
            .await
            .unwrap();

        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn sent_rows_carry_reviewer_details() {
        let fx = seeded(2).await;
        let rows = ListSentCyclesHandler::new(fx.repo(), fx.projector())
            .handle(ctx(SUBJECT))
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.given_name == "Lin"));
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_unavailable() {
        let fx = seeded(0).await;
        fx.cycles.fail_with(ErrorCode::StoreUnavailable).await;

        let err = ListSentCyclesHandler::new(fx.repo(), fx.projector())
            .handle(ctx(SUBJECT))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::StoreUnavailable);
    }

    #[tokio::test]
    async fn other_reviewers_see_nothing() {
        let fx = seeded(2).await;
        let rows = ListReceivedCyclesHandler::new(fx.repo(), fx.projector())
            .handle(received(1), ctx("someone@x.com"))
            .await
            .unwrap();
        assert!(rows.is_empty());
    }
}
