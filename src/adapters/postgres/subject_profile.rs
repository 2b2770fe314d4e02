//! PostgreSQL subject profile.
//!
//! Final scores live in `user_technical_skills` keyed by `(user_email,
//! skill_id)`; current hard-skill levels are read from `user_hard_skills`.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::cycle::Score;
use crate::domain::foundation::{DomainError, EmailAddress, SkillId};
use crate::ports::{ProfileSkill, SubjectProfile};

use super::{bounded, corrupt_row};

#[derive(Clone)]
pub struct PostgresSubjectProfile {
    pool: PgPool,
    timeout: Duration,
}

impl PostgresSubjectProfile {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

fn to_column(score: Score) -> Result<i32, DomainError> {
    i32::try_from(score).map_err(|_| DomainError::validation("score", "score exceeds storable range"))
}

fn from_column(column: &str, raw: i32) -> Result<Score, DomainError> {
    Score::try_from(raw).map_err(|e| corrupt_row(column, e))
}

#[async_trait]
impl SubjectProfile for PostgresSubjectProfile {
    async fn update_matching_skill(
        &self,
        subject: &EmailAddress,
        skill_id: SkillId,
        score: Score,
    ) -> Result<bool, DomainError> {
        let query = sqlx::query(
            "UPDATE user_technical_skills SET score = $3 WHERE user_email = $1 AND skill_id = $2",
        )
        .bind(subject.as_str())
        .bind(*skill_id.as_uuid())
        .bind(to_column(score)?);

        let result = bounded(self.timeout, "update profile skill", query.execute(&self.pool)).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn add_skill_if_absent(
        &self,
        subject: &EmailAddress,
        skill_id: SkillId,
        score: Score,
    ) -> Result<bool, DomainError> {
        let query = sqlx::query(
            r#"
            INSERT INTO user_technical_skills (user_email, skill_id, score)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_email, skill_id) DO NOTHING
            "#,
        )
        .bind(subject.as_str())
        .bind(*skill_id.as_uuid())
        .bind(to_column(score)?);

        let result = bounded(self.timeout, "add profile skill", query.execute(&self.pool)).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn read_current_level(
        &self,
        subject: &EmailAddress,
        skill_name: &str,
    ) -> Result<Option<Score>, DomainError> {
        let query = sqlx::query_scalar::<_, i32>(
            "SELECT level FROM user_hard_skills WHERE user_email = $1 AND skill_name = $2 LIMIT 1",
        )
        .bind(subject.as_str())
        .bind(skill_name);

        bounded(self.timeout, "read hard skill level", query.fetch_optional(&self.pool))
            .await?
            .map(|level| from_column("level", level))
            .transpose()
    }

    async fn skills(&self, subject: &EmailAddress) -> Result<Vec<ProfileSkill>, DomainError> {
        let query = sqlx::query_as::<_, (Uuid, i32)>(
            r#"
            SELECT skill_id, score FROM user_technical_skills
            WHERE user_email = $1
            ORDER BY skill_id
            "#,
        )
        .bind(subject.as_str());

        bounded(self.timeout, "list profile skills", query.fetch_all(&self.pool))
            .await?
            .into_iter()
            .map(|(skill_id, score)| {
                Ok(ProfileSkill {
                    skill_id: SkillId::from_uuid(skill_id),
                    score: from_column("score", score)?,
                })
            })
            .collect()
    }
}
