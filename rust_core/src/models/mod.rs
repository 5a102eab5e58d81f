// Shared models for the homework status bot
use serde::{Deserialize, Serialize};

use crate::errors::PollError;

// ============================================================================
// Homework Status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// Parse a wire status value. Anything outside the documented set is an
    /// `UnknownStatus` error rather than a silent fallback.
    pub fn parse(raw: &str) -> Result<Self, PollError> {
        match raw {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(PollError::UnknownStatus(other.to_string())),
        }
    }

    /// Fixed reviewer verdict text for this status.
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => {
                "The work has been reviewed: the reviewer liked everything. Hooray!"
            }
            HomeworkStatus::Reviewing => "The work has been taken for review.",
            HomeworkStatus::Rejected => {
                "The work has been reviewed: the reviewer has remarks."
            }
        }
    }
}

// ============================================================================
// Wire records
// ============================================================================

/// One homework entry as it appears on the wire. Both fields are optional
/// because malformed responses must be reportable, not a deserialization
/// failure; extraction into a checked record happens at render time.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawHomework {
    #[serde(default)]
    pub homework_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}
