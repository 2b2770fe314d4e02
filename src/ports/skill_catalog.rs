//! Skill catalog port.
//!
//! The catalog owns skill definitions; cycles only reference them by id.

use async_trait::async_trait;

use crate::domain::cycle::CatalogSkill;
use crate::domain::foundation::{DomainError, SkillId};

/// Read access to skill definitions.
#[async_trait]
pub trait SkillCatalog: Send + Sync {
    /// Fetch the definitions for the given ids.
    ///
    /// May return fewer records than requested, in any order; callers
    /// associate results by id.
    async fn find_by_ids(&self, ids: &[SkillId]) -> Result<Vec<CatalogSkill>, DomainError>;
}
