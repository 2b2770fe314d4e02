//! Cycle repository port.
//!
//! Defines the contract for persisting and retrieving Cycle aggregates.
//! Implementations handle the actual store operations and must bound every
//! call with the configured operation timeout.

use crate::domain::cycle::Cycle;
use crate::domain::foundation::{
    CycleId, DomainError, EmailAddress, StatusFilter, Timestamp, ValidationError,
};
use async_trait::async_trait;

/// Number of cycles returned per listing page.
pub const PAGE_SIZE: u32 = 10;

/// A 1-based page of a cycle listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(u32);

impl Page {
    /// Creates a page number, rejecting values below 1.
    pub fn new(number: i64) -> Result<Self, ValidationError> {
        if number < 1 || number > i64::from(u32::MAX) {
            return Err(ValidationError::out_of_range(
                "page",
                1,
                i64::from(u32::MAX),
                number,
            ));
        }
        Ok(Self(number as u32))
    }

    pub fn first() -> Self {
        Self(1)
    }

    pub fn number(&self) -> u32 {
        self.0
    }

    /// Rows to skip before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.0 - 1) * u64::from(PAGE_SIZE)
    }

    pub fn limit(&self) -> u32 {
        PAGE_SIZE
    }
}

/// Repository port for Cycle aggregate persistence.
///
/// Failures:
/// - `CycleNotFound` when an addressed cycle is absent
/// - `DatabaseError` for wrapped store failures
/// - `StoreUnavailable` for connectivity failures and timeouts
#[async_trait]
pub trait CycleRepository: Send + Sync {
    /// Save a new cycle.
    async fn save(&self, cycle: &Cycle) -> Result<(), DomainError>;

    /// Overwrite an existing cycle.
    ///
    /// # Errors
    ///
    /// - `CycleNotFound` if cycle doesn't exist
    async fn update(&self, cycle: &Cycle) -> Result<(), DomainError>;

    /// Find a cycle by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &CycleId) -> Result<Option<Cycle>, DomainError>;

    /// Hard-delete a cycle.
    ///
    /// # Errors
    ///
    /// - `CycleNotFound` if nothing was removed
    async fn delete(&self, id: &CycleId) -> Result<(), DomainError>;

    /// Cycles a reviewer received, newest `start_date` first.
    async fn list_by_reviewer(
        &self,
        reviewer: &EmailAddress,
        filter: StatusFilter,
        page: Page,
    ) -> Result<Vec<Cycle>, DomainError>;

    /// Cycles a subject opened, newest `start_date` first.
    async fn list_by_subject(&self, subject: &EmailAddress) -> Result<Vec<Cycle>, DomainError>;

    /// The subject's in-progress cycle with the latest `start_date`.
    async fn find_latest_open_by_subject(
        &self,
        subject: &EmailAddress,
    ) -> Result<Option<Cycle>, DomainError>;

    /// Record completion of the profile write-back.
    ///
    /// # Errors
    ///
    /// - `CycleNotFound` if cycle doesn't exist
    async fn mark_finalized(&self, id: &CycleId, at: Timestamp) -> Result<(), DomainError>;
}
