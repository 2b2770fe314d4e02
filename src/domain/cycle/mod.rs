//! Cycle module - Skill-assessment cycle aggregate and score rules.
//!
//! A Cycle represents one reviewer's assessment of a subject's skills over a
//! bounded window. Its entries obey the score model and feed the subject's
//! profile once the cycle is finalized.

mod aggregate;
mod display;
mod errors;
mod score;
mod skill_set;
mod window;

pub use aggregate::{Cycle, CycleContent, CycleDraft};
pub use display::{
    CatalogSkill, CycleDisplay, CycleWithParticipant, Participant, Party, ProgressRow,
    SkillEntryDisplay,
};
pub use errors::CycleError;
pub use score::{validate_entry, InvariantError, Score};
pub use skill_set::{SchemaVersion, SkillAssessment, SkillEntry, SkillEntrySet};
pub use window::AssessmentWindow;
