//! Skill entries attached to a cycle, and the schema-tagged list holding them.
//!
//! Cycles carry two lists: the legacy quantitative list and the current hard
//! skill list. Both share one entry shape, one validation rule, one
//! projection path and one write-back path; only the schema tag differs.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::SkillId;

use super::score::{validate_entry, Score};
use super::CycleError;

/// Which generation of the cycle document a skill list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaVersion {
    /// `quantitative_skills` of earlier cycle documents.
    Legacy,
    /// `hard_skills` of current cycle documents.
    Current,
}

/// Scores submitted for one skill, before snapshots are taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillAssessment {
    pub skill_id: SkillId,
    pub personal_score: Score,
    pub goal_score: Score,
    #[serde(default)]
    pub comment: String,
}

impl SkillAssessment {
    pub fn new(skill_id: SkillId, personal_score: Score, goal_score: Score) -> Self {
        Self {
            skill_id,
            personal_score,
            goal_score,
            comment: String::new(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// A scored skill reference stored inside a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub skill_id: SkillId,
    pub personal_score: Score,
    pub goal_score: Score,
    /// Goal as first submitted; never changed afterwards.
    pub lead_goal_score: Score,
    /// Score written to the subject profile at finalization.
    pub final_score: Score,
    #[serde(default)]
    pub comment: String,
}

impl SkillEntry {
    /// Takes the creation-time snapshots of an assessment.
    pub fn from_assessment(assessment: SkillAssessment) -> Self {
        Self {
            skill_id: assessment.skill_id,
            personal_score: assessment.personal_score,
            goal_score: assessment.goal_score,
            lead_goal_score: assessment.goal_score,
            final_score: assessment.personal_score,
            comment: assessment.comment,
        }
    }

    /// Checks the entry against the score rule.
    pub fn validate(&self) -> Result<(), CycleError> {
        validate_entry(self.personal_score, self.goal_score)
            .map_err(|e| CycleError::goal_score_mismatch(self.skill_id, e))
    }
}

/// An ordered list of skill entries tagged with its schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillEntrySet {
    schema: SchemaVersion,
    entries: Vec<SkillEntry>,
}

impl SkillEntrySet {
    pub fn new(schema: SchemaVersion, entries: Vec<SkillEntry>) -> Self {
        Self { schema, entries }
    }

    pub fn empty(schema: SchemaVersion) -> Self {
        Self::new(schema, Vec::new())
    }

    /// Builds a validated set from submitted assessments.
    ///
    /// Fails on the first entry breaking the score rule; nothing is built.
    pub fn from_assessments(
        schema: SchemaVersion,
        assessments: Vec<SkillAssessment>,
    ) -> Result<Self, CycleError> {
        let entries: Vec<SkillEntry> = assessments
            .into_iter()
            .map(SkillEntry::from_assessment)
            .collect();
        for entry in &entries {
            entry.validate()?;
        }
        Ok(Self::new(schema, entries))
    }

    pub fn schema(&self) -> SchemaVersion {
        self.schema
    }

    pub fn entries(&self) -> &[SkillEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<SkillEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct skill ids in first-seen order.
    pub fn unique_skill_ids(&self) -> Vec<SkillId> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter(|e| seen.insert(e.skill_id))
            .map(|e| e.skill_id)
            .collect()
    }
}
