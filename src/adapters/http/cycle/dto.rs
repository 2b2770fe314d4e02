//! Data Transfer Objects for cycle HTTP endpoints.
//!
//! Request bodies carry raw strings for emails so that malformed addresses
//! surface as field-level validation errors rather than body rejections.

use serde::{Deserialize, Serialize};

use crate::application::handlers::cycle::{FinalizeOutcome, GetCycleResult, GoalRevision};
use crate::domain::cycle::{
    AssessmentWindow, CycleContent, CycleDisplay, Participant, Score, SkillAssessment, SkillEntry,
};
use crate::domain::foundation::{
    CycleStatus, EmailAddress, ReviewState, SkillId, Timestamp, ValidationError,
};

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /cycles`. The subject is the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCycleRequest {
    pub reviewer_email: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    #[serde(default)]
    pub quantitative_skills: Vec<SkillAssessment>,
    #[serde(default)]
    pub hard_skills: Vec<SkillAssessment>,
    #[serde(default)]
    pub comment: String,
}

impl CreateCycleRequest {
    pub fn reviewer(&self) -> Result<EmailAddress, ValidationError> {
        EmailAddress::parse("reviewer_email", &self.reviewer_email)
    }

    pub fn window(&self) -> Result<AssessmentWindow, ValidationError> {
        AssessmentWindow::new(self.start_date, self.end_date)
    }
}

/// Editable cycle content shared by whole-document writes.
#[derive(Debug, Clone, Deserialize)]
pub struct CycleContentRequest {
    pub reviewer_email: String,
    pub subject_email: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    #[serde(default)]
    pub quantitative_skills: Vec<SkillEntry>,
    #[serde(default)]
    pub hard_skills: Vec<SkillEntry>,
    #[serde(default)]
    pub comment: String,
}

impl CycleContentRequest {
    /// Parses the emails. The window is taken as given.
    pub fn into_content(self) -> Result<CycleContent, ValidationError> {
        Ok(CycleContent {
            reviewer_email: EmailAddress::parse("reviewer_email", &self.reviewer_email)?,
            subject_email: EmailAddress::parse("subject_email", &self.subject_email)?,
            window: AssessmentWindow::unchecked(self.start_date, self.end_date),
            quantitative_skills: self.quantitative_skills,
            hard_skills: self.hard_skills,
            comment: self.comment,
        })
    }
}

/// Body of `POST /cycles/{id}`: content plus lifecycle fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCycleRequest {
    #[serde(flatten)]
    pub content: CycleContentRequest,
    pub status: CycleStatus,
    #[serde(default)]
    pub state: ReviewState,
}

/// Body of `POST /cycles/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionCycleRequest {
    pub status: CycleStatus,
}

/// One entry of `PUT /cycles/goal`.
#[derive(Debug, Clone, Deserialize)]
pub struct GoalRevisionRequest {
    pub skill_id: SkillId,
    pub skill_name: String,
    pub goal_score: Score,
    #[serde(default)]
    pub comment: String,
}

impl From<GoalRevisionRequest> for GoalRevision {
    fn from(req: GoalRevisionRequest) -> Self {
        GoalRevision {
            skill_id: req.skill_id,
            skill_name: req.skill_name,
            goal_score: req.goal_score,
            comment: req.comment,
        }
    }
}

/// Body of `PUT /cycles/goal`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviseGoalsRequest {
    pub hard_skills: Vec<GoalRevisionRequest>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

/// A projected cycle with the subject's directory entry, when known.
#[derive(Debug, Clone, Serialize)]
pub struct CycleDetailResponse {
    #[serde(flatten)]
    pub cycle: CycleDisplay,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Participant>,
}

impl From<GetCycleResult> for CycleDetailResponse {
    fn from(result: GetCycleResult) -> Self {
        Self {
            cycle: result.cycle,
            subject: result.subject,
        }
    }
}

/// Result of finalizing a cycle.
#[derive(Debug, Clone, Serialize)]
pub struct FinalizeResponse {
    pub already_finalized: bool,
    pub updated: usize,
    pub added: usize,
}

impl From<FinalizeOutcome> for FinalizeResponse {
    fn from(outcome: FinalizeOutcome) -> Self {
        match outcome {
            FinalizeOutcome::Finalized { updated, added } => Self {
                already_finalized: false,
                updated,
                added,
            },
            FinalizeOutcome::AlreadyFinalized => Self {
                already_finalized: true,
                updated: 0,
                added: 0,
            },
        }
    }
}

/// Plain acknowledgement.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error response for API errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl ToString, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn with_field(mut self, field: &str) -> Self {
        self.details = Some(serde_json::json!({ "field": field }));
        self
    }
}
