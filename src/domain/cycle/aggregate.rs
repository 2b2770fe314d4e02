//! Cycle aggregate - The root entity for skill-assessment cycles.
//!
//! A Cycle pairs a reviewer with a subject over a time window and carries the
//! subject's scored skills. Status moves forward through
//! `Pending -> Approved -> InProgress -> Done`; the only way back is a goal
//! revision, which reopens the cycle as `Pending` with the `Review` marker.

use std::collections::HashMap;

use crate::domain::foundation::{
    CycleId, CycleStatus, EmailAddress, ReviewState, SkillId, StateMachine, Timestamp,
};

use super::score::Score;
use super::skill_set::{SchemaVersion, SkillAssessment, SkillEntry, SkillEntrySet};
use super::window::AssessmentWindow;
use super::CycleError;

/// Everything needed to open a new cycle.
#[derive(Debug, Clone)]
pub struct CycleDraft {
    pub reviewer_email: EmailAddress,
    pub subject_email: EmailAddress,
    pub window: AssessmentWindow,
    pub quantitative_skills: Vec<SkillAssessment>,
    pub hard_skills: Vec<SkillAssessment>,
    pub comment: String,
}

/// Editable content of a cycle, used by whole-document overwrites.
#[derive(Debug, Clone)]
pub struct CycleContent {
    pub reviewer_email: EmailAddress,
    pub subject_email: EmailAddress,
    pub window: AssessmentWindow,
    pub quantitative_skills: Vec<SkillEntry>,
    pub hard_skills: Vec<SkillEntry>,
    pub comment: String,
}

/// The Cycle aggregate root.
#[derive(Debug, Clone)]
pub struct Cycle {
    id: CycleId,
    reviewer_email: EmailAddress,
    subject_email: EmailAddress,
    window: AssessmentWindow,
    status: CycleStatus,
    state: ReviewState,
    comment: String,
    quantitative_skills: SkillEntrySet,
    hard_skills: SkillEntrySet,
    finalized_at: Option<Timestamp>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Cycle {
    /// Opens a new cycle in `Pending`.
    ///
    /// Requires at least one entry across both lists and every entry to
    /// satisfy the score rule. Nothing is built on failure.
    pub fn create(draft: CycleDraft) -> Result<Self, CycleError> {
        if draft.quantitative_skills.is_empty() && draft.hard_skills.is_empty() {
            return Err(CycleError::EmptySkillSet);
        }

        let quantitative_skills =
            SkillEntrySet::from_assessments(SchemaVersion::Legacy, draft.quantitative_skills)?;
        let hard_skills = SkillEntrySet::from_assessments(SchemaVersion::Current, draft.hard_skills)?;

        let now = Timestamp::now();
        Ok(Self {
            id: CycleId::new(),
            reviewer_email: draft.reviewer_email,
            subject_email: draft.subject_email,
            window: draft.window,
            status: CycleStatus::Pending,
            state: ReviewState::None,
            comment: draft.comment,
            quantitative_skills,
            hard_skills,
            finalized_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitutes a cycle from persisted data.
    ///
    /// Used by repository implementations; performs no validation.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: CycleId,
        reviewer_email: EmailAddress,
        subject_email: EmailAddress,
        window: AssessmentWindow,
        status: CycleStatus,
        state: ReviewState,
        comment: String,
        quantitative_skills: Vec<SkillEntry>,
        hard_skills: Vec<SkillEntry>,
        finalized_at: Option<Timestamp>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            reviewer_email,
            subject_email,
            window,
            status,
            state,
            comment,
            quantitative_skills: SkillEntrySet::new(SchemaVersion::Legacy, quantitative_skills),
            hard_skills: SkillEntrySet::new(SchemaVersion::Current, hard_skills),
            finalized_at,
            created_at,
            updated_at,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> CycleId {
        self.id
    }

    pub fn reviewer_email(&self) -> &EmailAddress {
        &self.reviewer_email
    }

    /// Whose skills are being assessed.
    pub fn subject_email(&self) -> &EmailAddress {
        &self.subject_email
    }

    pub fn window(&self) -> AssessmentWindow {
        self.window
    }

    pub fn status(&self) -> CycleStatus {
        self.status
    }

    pub fn state(&self) -> ReviewState {
        self.state
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn quantitative_skills(&self) -> &SkillEntrySet {
        &self.quantitative_skills
    }

    pub fn hard_skills(&self) -> &SkillEntrySet {
        &self.hard_skills
    }

    pub fn finalized_at(&self) -> Option<Timestamp> {
        self.finalized_at
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized_at.is_some()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    // ───────────────────────────────────────────────────────────────
    // Lifecycle
    // ───────────────────────────────────────────────────────────────

    /// Advances the status one step forward.
    ///
    /// Approving clears a pending `Review` marker.
    pub fn transition_to(&mut self, target: CycleStatus) -> Result<(), CycleError> {
        let next = self
            .status
            .transition_to(target)
            .map_err(|_| CycleError::InvalidTransition {
                from: self.status,
                to: target,
            })?;

        self.status = next;
        if next == CycleStatus::Approved {
            self.state = ReviewState::None;
        }
        self.touch();
        Ok(())
    }

    /// Replaces the hard-skill list with revised goals and reopens the
    /// cycle for review.
    ///
    /// The caller re-bases each personal score on the subject's stored
    /// level beforehand. Only a cycle in progress can be revised.
    pub fn revise_hard_skills(&mut self, revised: Vec<SkillAssessment>) -> Result<(), CycleError> {
        if !self.status.is_open() {
            return Err(CycleError::InvalidTransition {
                from: self.status,
                to: CycleStatus::Pending,
            });
        }
        if revised.is_empty() && self.quantitative_skills.is_empty() {
            return Err(CycleError::EmptySkillSet);
        }

        self.hard_skills = SkillEntrySet::from_assessments(SchemaVersion::Current, revised)?;
        self.status = CycleStatus::Pending;
        self.state = ReviewState::Review;
        self.touch();
        Ok(())
    }

    /// Overwrites everything except identity and creation time.
    ///
    /// Administrative correction: entries are not re-validated. Clears the
    /// finalization record so a corrected cycle can be finalized again.
    pub fn replace_whole(&mut self, content: CycleContent, status: CycleStatus, state: ReviewState) {
        self.apply_content(content);
        self.status = status;
        self.state = state;
        self.finalized_at = None;
        self.touch();
    }

    /// Overwrites the editable content and leaves status and marker alone.
    pub fn save_edits(&mut self, content: CycleContent) {
        self.apply_content(content);
        self.touch();
    }

    /// Records that final scores were written back to the subject profile.
    pub fn mark_finalized(&mut self, at: Timestamp) {
        self.finalized_at = Some(at);
        self.updated_at = at;
    }

    // ───────────────────────────────────────────────────────────────
    // Score reconciliation support
    // ───────────────────────────────────────────────────────────────

    /// Checks every entry of both lists against the score rule.
    ///
    /// Covers entries written by administrative overwrites, which skip it.
    pub fn validate_entries(&self) -> Result<(), CycleError> {
        self.quantitative_skills
            .entries()
            .iter()
            .chain(self.hard_skills.entries())
            .try_for_each(SkillEntry::validate)
    }

    /// One `(skill, final score)` pair per distinct skill across both lists.
    ///
    /// Current-schema entries override legacy ones for the same skill and a
    /// later entry overrides an earlier one within a list. Order follows the
    /// first appearance of each skill.
    pub fn final_scores(&self) -> Vec<(SkillId, Score)> {
        let mut order: Vec<SkillId> = Vec::new();
        let mut scores: HashMap<SkillId, Score> = HashMap::new();

        for entry in self
            .quantitative_skills
            .entries()
            .iter()
            .chain(self.hard_skills.entries())
        {
            if scores.insert(entry.skill_id, entry.final_score).is_none() {
                order.push(entry.skill_id);
            }
        }

        order
            .into_iter()
            .filter_map(|id| scores.get(&id).map(|score| (id, *score)))
            .collect()
    }

    // ───────────────────────────────────────────────────────────────
    // Internal Helpers
    // ───────────────────────────────────────────────────────────────

    fn apply_content(&mut self, content: CycleContent) {
        self.reviewer_email = content.reviewer_email;
        self.subject_email = content.subject_email;
        self.window = content.window;
        self.comment = content.comment;
        self.quantitative_skills =
            SkillEntrySet::new(SchemaVersion::Legacy, content.quantitative_skills);
        self.hard_skills = SkillEntrySet::new(SchemaVersion::Current, content.hard_skills);
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
