//! Subject profile port.
//!
//! The profile is the subject's durable skill record. It is owned elsewhere;
//! the cycle engine only reads current levels and writes final scores at
//! finalization.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::cycle::Score;
use crate::domain::foundation::{DomainError, EmailAddress, SkillId};

/// One recorded skill in a subject's profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSkill {
    pub skill_id: SkillId,
    pub score: Score,
}

/// Read and write access to a subject's skill profile.
#[async_trait]
pub trait SubjectProfile: Send + Sync {
    /// Set the score of every existing profile entry for `skill_id`.
    ///
    /// Returns `true` if at least one entry matched.
    async fn update_matching_skill(
        &self,
        subject: &EmailAddress,
        skill_id: SkillId,
        score: Score,
    ) -> Result<bool, DomainError>;

    /// Append `{skill_id, score}` unless an entry for `skill_id` exists.
    ///
    /// Returns `true` if an entry was added.
    async fn add_skill_if_absent(
        &self,
        subject: &EmailAddress,
        skill_id: SkillId,
        score: Score,
    ) -> Result<bool, DomainError>;

    /// The subject's stored current level for a named hard skill.
    async fn read_current_level(
        &self,
        subject: &EmailAddress,
        skill_name: &str,
    ) -> Result<Option<Score>, DomainError>;

    /// All recorded skills of the subject.
    async fn skills(&self, subject: &EmailAddress) -> Result<Vec<ProfileSkill>, DomainError>;
}
