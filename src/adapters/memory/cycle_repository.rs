//! In-memory cycle repository.
//!
//! Keeps cycles in a map behind an async lock. Useful for testing and local
//! runs; supports injecting a store failure to exercise error paths.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::cycle::Cycle;
use crate::domain::foundation::{
    CycleId, DomainError, EmailAddress, ErrorCode, StatusFilter, Timestamp,
};
use crate::ports::{CycleRepository, Page};

#[derive(Debug, Clone, Default)]
pub struct InMemoryCycleRepository {
    cycles: Arc<RwLock<HashMap<CycleId, Cycle>>>,
    failure: Arc<RwLock<Option<ErrorCode>>>,
}

impl InMemoryCycleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail with the given code.
    pub async fn fail_with(&self, code: ErrorCode) {
        *self.failure.write().await = Some(code);
    }

    /// Number of stored cycles.
    pub async fn len(&self) -> usize {
        self.cycles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cycles.read().await.is_empty()
    }

    async fn check_failure(&self) -> Result<(), DomainError> {
        match *self.failure.read().await {
            Some(code) => Err(DomainError::new(code, "Simulated store failure")),
            None => Ok(()),
        }
    }

    fn newest_first(mut cycles: Vec<Cycle>) -> Vec<Cycle> {
        cycles.sort_by(|a, b| {
            b.window()
                .start_date()
                .cmp(&a.window().start_date())
                .then_with(|| a.id().cmp(&b.id()))
        });
        cycles
    }

    fn not_found(id: &CycleId) -> DomainError {
        DomainError::new(ErrorCode::CycleNotFound, format!("Cycle not found: {}", id))
            .with_detail("id", id.to_string())
    }
}

#[async_trait]
impl CycleRepository for InMemoryCycleRepository {
    async fn save(&self, cycle: &Cycle) -> Result<(), DomainError> {
        self.check_failure().await?;
        self.cycles.write().await.insert(cycle.id(), cycle.clone());
        Ok(())
    }

    async fn update(&self, cycle: &Cycle) -> Result<(), DomainError> {
        self.check_failure().await?;
        let mut cycles = self.cycles.write().await;
        match cycles.get_mut(&cycle.id()) {
            Some(stored) => {
                *stored = cycle.clone();
                Ok(())
            }
            None => Err(Self::not_found(&cycle.id())),
        }
    }

    async fn find_by_id(&self, id: &CycleId) -> Result<Option<Cycle>, DomainError> {
        self.check_failure().await?;
        Ok(self.cycles.read().await.get(id).cloned())
    }

    async fn delete(&self, id: &CycleId) -> Result<(), DomainError> {
        self.check_failure().await?;
        self.cycles
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(id))
    }

    async fn list_by_reviewer(
        &self,
        reviewer: &EmailAddress,
        filter: StatusFilter,
        page: Page,
    ) -> Result<Vec<Cycle>, DomainError> {
        self.check_failure().await?;
        let matching: Vec<Cycle> = self
            .cycles
            .read()
            .await
            .values()
            .filter(|c| c.reviewer_email() == reviewer && filter.matches(c.status()))
            .cloned()
            .collect();

        Ok(Self::newest_first(matching)
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect())
    }

    async fn list_by_subject(&self, subject: &EmailAddress) -> Result<Vec<Cycle>, DomainError> {
        self.check_failure().await?;
        let matching: Vec<Cycle> = self
            .cycles
            .read()
            .await
            .values()
            .filter(|c| c.subject_email() == subject)
            .cloned()
            .collect();
        Ok(Self::newest_first(matching))
    }

    async fn find_latest_open_by_subject(
        &self,
        subject: &EmailAddress,
    ) -> Result<Option<Cycle>, DomainError> {
        self.check_failure().await?;
        let open: Vec<Cycle> = self
            .cycles
            .read()
            .await
            .values()
            .filter(|c| c.subject_email() == subject && c.status().is_open())
            .cloned()
            .collect();
        Ok(Self::newest_first(open).into_iter().next())
    }

    async fn mark_finalized(&self, id: &CycleId, at: Timestamp) -> Result<(), DomainError> {
        self.check_failure().await?;
        let mut cycles = self.cycles.write().await;
        let cycle = cycles.get_mut(id).ok_or_else(|| Self::not_found(id))?;
        cycle.mark_finalized(at);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cycle::{AssessmentWindow, CycleDraft, SkillAssessment};
    use crate::domain::foundation::{CycleStatus, SkillId};

    fn email(raw: &str) -> EmailAddress {
        EmailAddress::parse("email", raw).unwrap()
    }

    fn cycle_starting(reviewer: &str, subject: &str, days_ago: i64) -> Cycle {
        let start = Timestamp::now().add_days(-days_ago);
        Cycle::create(CycleDraft {
            reviewer_email: email(reviewer),
            subject_email: email(subject),
            window: AssessmentWindow::new(start, start.add_days(90)).unwrap(),
            quantitative_skills: vec![SkillAssessment::new(SkillId::new(), 1, 2)],
            hard_skills: vec![],
            comment: String::new(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn pages_through_reviewer_inbox() {
        let repo = InMemoryCycleRepository::new();
        for i in 0..25 {
            repo.save(&cycle_starting("lead@x.com", "a@x.com", i))
                .await
                .unwrap();
        }
        repo.save(&cycle_starting("other@x.com", "a@x.com", 0))
            .await
            .unwrap();

        let lead = email("lead@x.com");
        let sizes = [1, 2, 3, 4].map(|n| Page::new(n).unwrap());
        let mut counts = Vec::new();
        for page in sizes {
            counts.push(
                repo.list_by_reviewer(&lead, StatusFilter::All, page)
                    .await
                    .unwrap()
                    .len(),
            );
        }
        assert_eq!(counts, vec![10, 10, 5, 0]);
    }

    #[tokio::test]
    async fn listing_is_newest_first() {
        let repo = InMemoryCycleRepository::new();
        let old = cycle_starting("lead@x.com", "a@x.com", 30);
        let new = cycle_starting("lead@x.com", "a@x.com", 1);
        repo.save(&old).await.unwrap();
        repo.save(&new).await.unwrap();

        let listed = repo.list_by_subject(&email("a@x.com")).await.unwrap();
        assert_eq!(listed[0].id(), new.id());
        assert_eq!(listed[1].id(), old.id());
    }

    #[tokio::test]
    async fn status_filter_narrows_listing() {
        let repo = InMemoryCycleRepository::new();
        let mut approved = cycle_starting("lead@x.com", "a@x.com", 1);
        approved.transition_to(CycleStatus::Approved).unwrap();
        repo.save(&approved).await.unwrap();
        repo.save(&cycle_starting("lead@x.com", "a@x.com", 2))
            .await
            .unwrap();

        let listed = repo
            .list_by_reviewer(
                &email("lead@x.com"),
                StatusFilter::Only(CycleStatus::Approved),
                Page::first(),
            )
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id(), approved.id());
    }

    #[tokio::test]
    async fn latest_open_picks_newest_in_progress() {
        let repo = InMemoryCycleRepository::new();
        let mut older = cycle_starting("lead@x.com", "a@x.com", 20);
        let mut newer = cycle_starting("lead@x.com", "a@x.com", 5);
        let pending = cycle_starting("lead@x.com", "a@x.com", 1);
        for c in [&mut older, &mut newer] {
            c.transition_to(CycleStatus::Approved).unwrap();
            c.transition_to(CycleStatus::InProgress).unwrap();
        }
        for c in [&older, &newer, &pending] {
            repo.save(c).await.unwrap();
        }

        let found = repo
            .find_latest_open_by_subject(&email("a@x.com"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id(), newer.id());
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let repo = InMemoryCycleRepository::new();
        let err = repo.delete(&CycleId::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CycleNotFound);
    }

    #[tokio::test]
    async fn injected_failure_surfaces() {
        let repo = InMemoryCycleRepository::new();
        repo.fail_with(ErrorCode::StoreUnavailable).await;
        let err = repo.find_by_id(&CycleId::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StoreUnavailable);
    }
}
