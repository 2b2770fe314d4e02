//! PostgreSQL implementation of CycleRepository.
//!
//! One row per cycle in `cycles`; both skill lists are stored as JSONB arrays
//! so a whole cycle is read and written in a single statement.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::cycle::{AssessmentWindow, Cycle, SkillEntry};
use crate::domain::foundation::{
    CycleId, CycleStatus, DomainError, EmailAddress, ErrorCode, ReviewState, StatusFilter,
    Timestamp,
};
use crate::ports::{CycleRepository, Page};

use super::{bounded, corrupt_row};

const CYCLE_COLUMNS: &str = r#"
    id, reviewer_email, subject_email, start_date, end_date, status, state,
    comment, quantitative_skills, hard_skills, finalized_at, created_at, updated_at
"#;

/// PostgreSQL implementation of CycleRepository.
#[derive(Clone)]
pub struct PostgresCycleRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PostgresCycleRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    async fn fetch_many(
        &self,
        operation: &'static str,
        query: sqlx::query::QueryAs<'_, sqlx::Postgres, CycleRow, sqlx::postgres::PgArguments>,
    ) -> Result<Vec<Cycle>, DomainError> {
        let rows = bounded(self.timeout, operation, query.fetch_all(&self.pool)).await?;
        rows.into_iter().map(CycleRow::into_cycle).collect()
    }
}

#[async_trait]
impl CycleRepository for PostgresCycleRepository {
    async fn save(&self, cycle: &Cycle) -> Result<(), DomainError> {
        let sql = format!(
            "INSERT INTO cycles ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
            CYCLE_COLUMNS
        );
        let query = sqlx::query(&sql)
            .bind(*cycle.id().as_uuid())
            .bind(cycle.reviewer_email().as_str())
            .bind(cycle.subject_email().as_str())
            .bind(*cycle.window().start_date().as_datetime())
            .bind(*cycle.window().end_date().as_datetime())
            .bind(cycle.status().as_str())
            .bind(cycle.state().as_str())
            .bind(cycle.comment())
            .bind(Json(cycle.quantitative_skills().entries()))
            .bind(Json(cycle.hard_skills().entries()))
            .bind(cycle.finalized_at().map(|t| *t.as_datetime()))
            .bind(*cycle.created_at().as_datetime())
            .bind(*cycle.updated_at().as_datetime());

        bounded(self.timeout, "insert cycle", query.execute(&self.pool)).await?;
        Ok(())
    }

    async fn update(&self, cycle: &Cycle) -> Result<(), DomainError> {
        let query = sqlx::query(
            r#"
            UPDATE cycles SET
                reviewer_email = $2,
                subject_email = $3,
                start_date = $4,
                end_date = $5,
                status = $6,
                state = $7,
                comment = $8,
                quantitative_skills = $9,
                hard_skills = $10,
                finalized_at = $11,
                updated_at = $12
            WHERE id = $1
            "#,
        )
        .bind(*cycle.id().as_uuid())
        .bind(cycle.reviewer_email().as_str())
        .bind(cycle.subject_email().as_str())
        .bind(*cycle.window().start_date().as_datetime())
        .bind(*cycle.window().end_date().as_datetime())
        .bind(cycle.status().as_str())
        .bind(cycle.state().as_str())
        .bind(cycle.comment())
        .bind(Json(cycle.quantitative_skills().entries()))
        .bind(Json(cycle.hard_skills().entries()))
        .bind(cycle.finalized_at().map(|t| *t.as_datetime()))
        .bind(*cycle.updated_at().as_datetime());

        let result = bounded(self.timeout, "update cycle", query.execute(&self.pool)).await?;
        if result.rows_affected() == 0 {
            return Err(not_found(&cycle.id()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &CycleId) -> Result<Option<Cycle>, DomainError> {
        let sql = format!("SELECT {} FROM cycles WHERE id = $1", CYCLE_COLUMNS);
        let query = sqlx::query_as::<_, CycleRow>(&sql).bind(id.as_uuid());

        bounded(self.timeout, "fetch cycle", query.fetch_optional(&self.pool))
            .await?
            .map(CycleRow::into_cycle)
            .transpose()
    }

    async fn delete(&self, id: &CycleId) -> Result<(), DomainError> {
        let query = sqlx::query("DELETE FROM cycles WHERE id = $1").bind(id.as_uuid());

        let result = bounded(self.timeout, "delete cycle", query.execute(&self.pool)).await?;
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn list_by_reviewer(
        &self,
        reviewer: &EmailAddress,
        filter: StatusFilter,
        page: Page,
    ) -> Result<Vec<Cycle>, DomainError> {
        let sql = format!(
            r#"
            SELECT {} FROM cycles
            WHERE reviewer_email = $1 AND ($2::TEXT IS NULL OR status = $2)
            ORDER BY start_date DESC, id
            LIMIT $3 OFFSET $4
            "#,
            CYCLE_COLUMNS
        );
        let query = sqlx::query_as::<_, CycleRow>(&sql)
            .bind(reviewer.as_str())
            .bind(filter.status().map(|s| s.as_str()))
            .bind(i64::from(page.limit()))
            .bind(page.offset() as i64);

        self.fetch_many("list cycles by reviewer", query).await
    }

    async fn list_by_subject(&self, subject: &EmailAddress) -> Result<Vec<Cycle>, DomainError> {
        let sql = format!(
            "SELECT {} FROM cycles WHERE subject_email = $1 ORDER BY start_date DESC, id",
            CYCLE_COLUMNS
        );
        let query = sqlx::query_as::<_, CycleRow>(&sql).bind(subject.as_str());

        self.fetch_many("list cycles by subject", query).await
    }

    async fn find_latest_open_by_subject(
        &self,
        subject: &EmailAddress,
    ) -> Result<Option<Cycle>, DomainError> {
        let sql = format!(
            r#"
            SELECT {} FROM cycles
            WHERE subject_email = $1 AND status = $2
            ORDER BY start_date DESC, id
            LIMIT 1
            "#,
            CYCLE_COLUMNS
        );
        let query = sqlx::query_as::<_, CycleRow>(&sql)
            .bind(subject.as_str())
            .bind(CycleStatus::InProgress.as_str());

        bounded(self.timeout, "fetch latest open cycle", query.fetch_optional(&self.pool))
            .await?
            .map(CycleRow::into_cycle)
            .transpose()
    }

    async fn mark_finalized(&self, id: &CycleId, at: Timestamp) -> Result<(), DomainError> {
        let query = sqlx::query(
            "UPDATE cycles SET finalized_at = $2, updated_at = $2 WHERE id = $1",
        )
        .bind(id.as_uuid())
        .bind(at.as_datetime());

        let result = bounded(self.timeout, "mark cycle finalized", query.execute(&self.pool)).await?;
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

fn not_found(id: &CycleId) -> DomainError {
    DomainError::new(ErrorCode::CycleNotFound, format!("Cycle not found: {}", id))
        .with_detail("id", id.to_string())
}

#[derive(sqlx::FromRow)]
struct CycleRow {
    id: Uuid,
    reviewer_email: String,
    subject_email: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    status: String,
    state: String,
    comment: String,
    quantitative_skills: Json<Vec<SkillEntry>>,
    hard_skills: Json<Vec<SkillEntry>>,
    finalized_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CycleRow {
    fn into_cycle(self) -> Result<Cycle, DomainError> {
        let reviewer_email = EmailAddress::parse("reviewer_email", &self.reviewer_email)
            .map_err(|e| corrupt_row("reviewer_email", e))?;
        let subject_email = EmailAddress::parse("subject_email", &self.subject_email)
            .map_err(|e| corrupt_row("subject_email", e))?;
        let status: CycleStatus = self.status.parse().map_err(|e| corrupt_row("status", e))?;

        // Stored windows are trusted; the ordering rule applies on create only.
        let window = AssessmentWindow::unchecked(
            Timestamp::from_datetime(self.start_date),
            Timestamp::from_datetime(self.end_date),
        );

        Ok(Cycle::reconstitute(
            CycleId::from_uuid(self.id),
            reviewer_email,
            subject_email,
            window,
            status,
            ReviewState::from_stored(&self.state),
            self.comment,
            self.quantitative_skills.0,
            self.hard_skills.0,
            self.finalized_at.map(Timestamp::from_datetime),
            Timestamp::from_datetime(self.created_at),
            Timestamp::from_datetime(self.updated_at),
        ))
    }
}
