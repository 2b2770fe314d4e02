//! PostgreSQL skill catalog - read-only lookups into `skills`.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::cycle::CatalogSkill;
use crate::domain::foundation::{DomainError, SkillId};
use crate::ports::SkillCatalog;

use super::bounded;

#[derive(Clone)]
pub struct PostgresSkillCatalog {
    pool: PgPool,
    timeout: Duration,
}

impl PostgresSkillCatalog {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[derive(sqlx::FromRow)]
struct SkillRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    logo: Option<String>,
}

impl From<SkillRow> for CatalogSkill {
    fn from(row: SkillRow) -> Self {
        CatalogSkill {
            id: SkillId::from_uuid(row.id),
            name: row.name,
            description: row.description.unwrap_or_default(),
            logo: row.logo.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl SkillCatalog for PostgresSkillCatalog {
    async fn find_by_ids(&self, ids: &[SkillId]) -> Result<Vec<CatalogSkill>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let query = sqlx::query_as::<_, SkillRow>(
            "SELECT id, name, description, logo FROM skills WHERE id = ANY($1)",
        )
        .bind(uuids);

        let rows = bounded(self.timeout, "look up skills", query.fetch_all(&self.pool)).await?;
        Ok(rows.into_iter().map(CatalogSkill::from).collect())
    }
}
