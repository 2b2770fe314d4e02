//! Secondary review marker carried alongside the cycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marks a cycle whose hard-skill goals were revised by the subject and
/// await the reviewer's look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReviewState {
    #[default]
    #[serde(rename = "")]
    None,
    Review,
}

impl ReviewState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewState::None => "",
            ReviewState::Review => "Review",
        }
    }

    /// Reads the persisted marker. Anything but `Review` means no marker.
    pub fn from_stored(raw: &str) -> Self {
        if raw == "Review" {
            ReviewState::Review
        } else {
            ReviewState::None
        }
    }

    pub fn is_under_review(&self) -> bool {
        matches!(self, ReviewState::Review)
    }
}

impl fmt::Display for ReviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_marker_serializes_as_empty_string() {
        assert_eq!(serde_json::to_string(&ReviewState::None).unwrap(), "\"\"");
        assert_eq!(
            serde_json::to_string(&ReviewState::Review).unwrap(),
            "\"Review\""
        );
    }

    #[test]
    fn from_stored_is_lenient() {
        assert_eq!(ReviewState::from_stored("Review"), ReviewState::Review);
        assert_eq!(ReviewState::from_stored(""), ReviewState::None);
        assert_eq!(ReviewState::from_stored("garbage"), ReviewState::None);
    }
}
