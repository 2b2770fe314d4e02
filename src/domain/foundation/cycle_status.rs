//! CycleStatus enum for tracking the lifecycle of assessment cycles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{StateMachine, ValidationError};

/// Lifecycle status of an assessment cycle.
///
/// Status only moves forward one step at a time. The one sanctioned way back
/// to `Pending` is a goal revision, handled by the cycle aggregate itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CycleStatus {
    #[default]
    Pending,
    Approved,
    #[serde(rename = "In Progress", alias = "InProgress")]
    InProgress,
    Done,
}

impl CycleStatus {
    /// Wire name used in persisted documents and query filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleStatus::Pending => "Pending",
            CycleStatus::Approved => "Approved",
            CycleStatus::InProgress => "In Progress",
            CycleStatus::Done => "Done",
        }
    }

    /// Returns true while the reviewer is still working the cycle.
    pub fn is_open(&self) -> bool {
        matches!(self, CycleStatus::InProgress)
    }
}

impl StateMachine for CycleStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use CycleStatus::*;
        matches!(
            (self, target),
            (Pending, Approved) | (Approved, InProgress) | (InProgress, Done)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use CycleStatus::*;
        match self {
            Pending => vec![Approved],
            Approved => vec![InProgress],
            InProgress => vec![Done],
            Done => vec![],
        }
    }
}

impl fmt::Display for CycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CycleStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Pending" => Ok(CycleStatus::Pending),
            "Approved" => Ok(CycleStatus::Approved),
            "In Progress" | "InProgress" => Ok(CycleStatus::InProgress),
            "Done" => Ok(CycleStatus::Done),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

/// Status predicate used when listing cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(CycleStatus),
}

impl StatusFilter {
    /// Returns true if a cycle with the given status passes the filter.
    pub fn matches(&self, status: CycleStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }

    /// The status to filter on, or `None` when every status is accepted.
    pub fn status(&self) -> Option<CycleStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(*status),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "All" {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}
