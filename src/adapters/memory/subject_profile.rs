//! In-memory subject profile store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::cycle::Score;
use crate::domain::foundation::{DomainError, EmailAddress, ErrorCode, SkillId};
use crate::ports::{ProfileSkill, SubjectProfile};

#[derive(Debug, Default)]
struct Profile {
    skills: Vec<ProfileSkill>,
    hard_skill_levels: HashMap<String, Score>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemorySubjectProfile {
    profiles: Arc<RwLock<HashMap<EmailAddress, Profile>>>,
    failure: Arc<RwLock<Option<ErrorCode>>>,
}

impl InMemorySubjectProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a recorded skill.
    pub async fn record_skill(&self, subject: &EmailAddress, skill_id: SkillId, score: Score) {
        self.profiles
            .write()
            .await
            .entry(subject.clone())
            .or_default()
            .skills
            .push(ProfileSkill { skill_id, score });
    }

    /// Seeds the current level of a named hard skill.
    pub async fn set_hard_skill_level(&self, subject: &EmailAddress, name: &str, level: Score) {
        self.profiles
            .write()
            .await
            .entry(subject.clone())
            .or_default()
            .hard_skill_levels
            .insert(name.to_string(), level);
    }

    /// Make every following write fail with the given code.
    pub async fn fail_with(&self, code: ErrorCode) {
        *self.failure.write().await = Some(code);
    }

    async fn check_failure(&self) -> Result<(), DomainError> {
        match *self.failure.read().await {
            Some(code) => Err(DomainError::new(code, "Simulated profile failure")),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SubjectProfile for InMemorySubjectProfile {
    async fn update_matching_skill(
        &self,
        subject: &EmailAddress,
        skill_id: SkillId,
        score: Score,
    ) -> Result<bool, DomainError> {
        self.check_failure().await?;
        let mut profiles = self.profiles.write().await;
        let Some(profile) = profiles.get_mut(subject) else {
            return Ok(false);
        };

        let mut matched = false;
        for skill in profile.skills.iter_mut().filter(|s| s.skill_id == skill_id) {
            skill.score = score;
            matched = true;
        }
        Ok(matched)
    }

    async fn add_skill_if_absent(
        &self,
        subject: &EmailAddress,
        skill_id: SkillId,
        score: Score,
    ) -> Result<bool, DomainError> {
        self.check_failure().await?;
        let mut profiles = self.profiles.write().await;
        let profile = profiles.entry(subject.clone()).or_default();
        if profile.skills.iter().any(|s| s.skill_id == skill_id) {
            return Ok(false);
        }
        profile.skills.push(ProfileSkill { skill_id, score });
        Ok(true)
    }

    async fn read_current_level(
        &self,
        subject: &EmailAddress,
        skill_name: &str,
    ) -> Result<Option<Score>, DomainError> {
        Ok(self
            .profiles
            .read()
            .await
            .get(subject)
            .and_then(|p| p.hard_skill_levels.get(skill_name).copied()))
    }

    async fn skills(&self, subject: &EmailAddress) -> Result<Vec<ProfileSkill>, DomainError> {
        Ok(self
            .profiles
            .read()
            .await
            .get(subject)
            .map(|p| p.skills.clone())
            .unwrap_or_default())
    }
}
