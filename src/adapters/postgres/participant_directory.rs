//! PostgreSQL participant directory - read-only lookups into `users`.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::cycle::Participant;
use crate::domain::foundation::{DomainError, EmailAddress};
use crate::ports::ParticipantDirectory;

use super::{bounded, corrupt_row};

#[derive(Clone)]
pub struct PostgresParticipantDirectory {
    pool: PgPool,
    timeout: Duration,
}

impl PostgresParticipantDirectory {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    email: String,
    given_name: String,
    family_name: String,
    job_role: Option<String>,
    level: Option<String>,
}

impl UserRow {
    fn into_participant(self) -> Result<Participant, DomainError> {
        Ok(Participant {
            email: EmailAddress::parse("email", &self.email).map_err(|e| corrupt_row("email", e))?,
            given_name: self.given_name,
            family_name: self.family_name,
            job_role: self.job_role.unwrap_or_default(),
            level: self.level.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl ParticipantDirectory for PostgresParticipantDirectory {
    async fn find_by_emails(&self, emails: &[EmailAddress]) -> Result<Vec<Participant>, DomainError> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }
        let keys: Vec<String> = emails.iter().map(|e| e.as_str().to_string()).collect();

        let query = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT email, given_name, family_name, job_role, level
            FROM users
            WHERE email = ANY($1)
            "#,
        )
        .bind(keys);

        bounded(self.timeout, "look up participants", query.fetch_all(&self.pool))
            .await?
            .into_iter()
            .map(UserRow::into_participant)
            .collect()
    }
}
