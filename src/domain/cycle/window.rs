//! Time window an assessment covers.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentWindow {
    start_date: Timestamp,
    end_date: Timestamp,
}

impl AssessmentWindow {
    /// Creates a window, requiring the end to fall strictly after the start.
    pub fn new(start_date: Timestamp, end_date: Timestamp) -> Result<Self, ValidationError> {
        if !end_date.is_after(&start_date) {
            return Err(ValidationError::invalid_format(
                "end_date",
                "must be after start_date",
            ));
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Rebuilds a window as stored, without ordering checks.
    pub fn unchecked(start_date: Timestamp, end_date: Timestamp) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    pub fn start_date(&self) -> Timestamp {
        self.start_date
    }

    pub fn end_date(&self) -> Timestamp {
        self.end_date
    }
}
