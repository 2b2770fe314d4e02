//! Read models produced by joining cycles with catalog and directory data.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CycleId, CycleStatus, EmailAddress, ReviewState, SkillId, Timestamp};

use super::score::Score;
use super::skill_set::SkillEntry;
use super::Cycle;

/// A skill definition as served by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSkill {
    pub id: SkillId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub logo: String,
}

/// Directory details of a cycle participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub email: EmailAddress,
    pub given_name: String,
    pub family_name: String,
    pub job_role: String,
    pub level: String,
}

/// A skill entry enriched with its catalog definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntryDisplay {
    pub id: SkillId,
    pub name: String,
    pub description: String,
    pub logo: String,
    pub personal_score: Score,
    pub goal_score: Score,
    pub lead_goal_score: Score,
    pub final_score: Score,
    pub comment: String,
}

impl SkillEntryDisplay {
    pub fn new(entry: &SkillEntry, skill: &CatalogSkill) -> Self {
        Self {
            id: entry.skill_id,
            name: skill.name.clone(),
            description: skill.description.clone(),
            logo: skill.logo.clone(),
            personal_score: entry.personal_score,
            goal_score: entry.goal_score,
            lead_goal_score: entry.lead_goal_score,
            final_score: entry.final_score,
            comment: entry.comment.clone(),
        }
    }
}

/// A cycle with both skill lists resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleDisplay {
    pub id: CycleId,
    pub reviewer_email: EmailAddress,
    pub subject_email: EmailAddress,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub status: CycleStatus,
    pub state: ReviewState,
    pub comment: String,
    pub quantitative_skills: Vec<SkillEntryDisplay>,
    pub hard_skills: Vec<SkillEntryDisplay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finalized_at: Option<Timestamp>,
}

impl CycleDisplay {
    /// Assembles the display from already-resolved skill lists.
    pub fn assemble(
        cycle: &Cycle,
        quantitative_skills: Vec<SkillEntryDisplay>,
        hard_skills: Vec<SkillEntryDisplay>,
    ) -> Self {
        let window = cycle.window();
        Self {
            id: cycle.id(),
            reviewer_email: cycle.reviewer_email().clone(),
            subject_email: cycle.subject_email().clone(),
            start_date: window.start_date(),
            end_date: window.end_date(),
            status: cycle.status(),
            state: cycle.state(),
            comment: cycle.comment().to_string(),
            quantitative_skills,
            hard_skills,
            finalized_at: cycle.finalized_at(),
        }
    }

    /// One progress row per resolved legacy entry.
    ///
    /// The goal reported is the lead's snapshot, not the revised goal.
    pub fn progress(&self) -> Vec<ProgressRow> {
        self.quantitative_skills
            .iter()
            .map(|skill| ProgressRow {
                name: skill.name.clone(),
                personal_score: skill.personal_score,
                goal_score: skill.lead_goal_score,
                end_date: self.end_date,
            })
            .collect()
    }
}

/// Which side of a cycle a listing joins directory details for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    Reviewer,
    Subject,
}

impl Party {
    pub fn email_of<'a>(&self, cycle: &'a CycleDisplay) -> &'a EmailAddress {
        match self {
            Party::Reviewer => &cycle.reviewer_email,
            Party::Subject => &cycle.subject_email,
        }
    }
}

/// A projected cycle joined with one participant's directory details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleWithParticipant {
    #[serde(flatten)]
    pub cycle: CycleDisplay,
    pub given_name: String,
    pub family_name: String,
    pub job_role: String,
    pub level: String,
}

impl CycleWithParticipant {
    pub fn new(cycle: CycleDisplay, participant: &Participant) -> Self {
        Self {
            cycle,
            given_name: participant.given_name.clone(),
            family_name: participant.family_name.clone(),
            job_role: participant.job_role.clone(),
            level: participant.level.clone(),
        }
    }
}

/// Progress of one skill over the cycle window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRow {
    pub name: String,
    pub personal_score: Score,
    pub goal_score: Score,
    pub end_date: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cycle::{AssessmentWindow, CycleDraft, SkillAssessment};

    fn email(raw: &str) -> EmailAddress {
        EmailAddress::parse("email", raw).unwrap()
    }

    fn sample_display() -> CycleDisplay {
        let start = Timestamp::now();
        let skill = SkillId::new();
        let cycle = Cycle::create(CycleDraft {
            reviewer_email: email("lead@x.com"),
            subject_email: email("a@x.com"),
            window: AssessmentWindow::new(start, start.add_days(30)).unwrap(),
            quantitative_skills: vec![SkillAssessment::new(skill, 2, 3)],
            hard_skills: vec![],
            comment: String::new(),
        })
        .unwrap();
        let catalog = CatalogSkill {
            id: skill,
            name: "Rust".to_string(),
            description: String::new(),
            logo: String::new(),
        };
        let entries = cycle
            .quantitative_skills()
            .entries()
            .iter()
            .map(|e| SkillEntryDisplay::new(e, &catalog))
            .collect();
        CycleDisplay::assemble(&cycle, entries, vec![])
    }

    #[test]
    fn progress_reports_lead_goal_and_end_date() {
        let display = sample_display();
        let rows = display.progress();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Rust");
        assert_eq!(rows[0].personal_score, 2);
        assert_eq!(rows[0].goal_score, 3);
        assert_eq!(rows[0].end_date, display.end_date);
    }

    #[test]
    fn party_selects_email() {
        let display = sample_display();
        assert_eq!(Party::Reviewer.email_of(&display).as_str(), "lead@x.com");
        assert_eq!(Party::Subject.email_of(&display).as_str(), "a@x.com");
    }

    #[test]
    fn participant_join_flattens_cycle_fields() {
        let participant = Participant {
            email: email("a@x.com"),
            given_name: "Ada".to_string(),
            family_name: "Lovelace".to_string(),
            job_role: "Engineer".to_string(),
            level: "Senior".to_string(),
        };
        let joined = CycleWithParticipant::new(sample_display(), &participant);
        let json = serde_json::to_value(&joined).unwrap();
        assert_eq!(json["given_name"], "Ada");
        assert_eq!(json["status"], "Pending");
        assert_eq!(json["quantitative_skills"][0]["name"], "Rust");
    }
}
