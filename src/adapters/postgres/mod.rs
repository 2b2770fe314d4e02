//! PostgreSQL adapters - Database implementations for the store ports.
//!
//! - `PostgresCycleRepository` - cycles with skill lists as JSONB
//! - `PostgresSkillCatalog` - read-only lookups into `skills`
//! - `PostgresSubjectProfile` - `user_technical_skills` / `user_hard_skills`
//! - `PostgresParticipantDirectory` - read-only lookups into `users`
//!
//! Every statement runs under the configured operation timeout. An expired
//! timeout or a lost connection surfaces as `StoreUnavailable`; anything else
//! the driver reports becomes `DatabaseError`. Nothing is retried.

mod cycle_repository;
mod participant_directory;
mod skill_catalog;
mod subject_profile;

pub use cycle_repository::PostgresCycleRepository;
pub use participant_directory::PostgresParticipantDirectory;
pub use skill_catalog::PostgresSkillCatalog;
pub use subject_profile::PostgresSubjectProfile;

use std::future::Future;
use std::time::Duration;

use crate::domain::foundation::DomainError;

/// Runs one store operation under `limit`.
pub(crate) async fn bounded<T, F>(
    limit: Duration,
    operation: &'static str,
    fut: F,
) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(store_error(operation, err)),
        Err(_) => {
            tracing::error!(operation, timeout_ms = limit.as_millis() as u64, "store operation timed out");
            Err(DomainError::unavailable(format!(
                "{} timed out after {}ms",
                operation,
                limit.as_millis()
            )))
        }
    }
}

/// Classifies a driver error.
pub(crate) fn store_error(operation: &'static str, err: sqlx::Error) -> DomainError {
    match err {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            tracing::error!(operation, error = %err, "store unreachable");
            DomainError::unavailable(format!("Failed to {}: {}", operation, err))
        }
        other => {
            tracing::error!(operation, error = %other, "store operation failed");
            DomainError::database(format!("Failed to {}: {}", operation, other))
        }
    }
}

/// A stored value the domain cannot represent.
pub(crate) fn corrupt_row(column: &str, reason: impl std::fmt::Display) -> DomainError {
    DomainError::database(format!("Invalid stored value in '{}': {}", column, reason))
}
