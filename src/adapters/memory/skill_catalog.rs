//! In-memory skill catalog.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::cycle::CatalogSkill;
use crate::domain::foundation::{DomainError, SkillId};
use crate::ports::SkillCatalog;

#[derive(Debug, Clone, Default)]
pub struct InMemorySkillCatalog {
    skills: Arc<RwLock<HashMap<SkillId, CatalogSkill>>>,
    lookups: Arc<AtomicUsize>,
}

impl InMemorySkillCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition and returns its id.
    pub async fn insert(&self, name: impl Into<String>) -> SkillId {
        let id = SkillId::new();
        self.put(CatalogSkill {
            id,
            name: name.into(),
            description: String::new(),
            logo: String::new(),
        })
        .await;
        id
    }

    pub async fn put(&self, skill: CatalogSkill) {
        self.skills.write().await.insert(skill.id, skill);
    }

    /// How many `find_by_ids` calls were served.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SkillCatalog for InMemorySkillCatalog {
    async fn find_by_ids(&self, ids: &[SkillId]) -> Result<Vec<CatalogSkill>, DomainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let skills = self.skills.read().await;
        Ok(ids.iter().filter_map(|id| skills.get(id).cloned()).collect())
    }
}
