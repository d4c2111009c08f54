//! ExportStatus enum for tracking the export lifecycle of content items.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Export lifecycle status carried by every content item.
///
/// ```text
/// UNEXPORTED --(batch mark)--> LAST_UPDATED --(batch finalize)--> EXPORTED
/// LAST_UPDATED --(operator revert)--> UNEXPORTED
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExportStatus {
    #[default]
    Unexported,
    LastUpdated,
    Exported,
}

impl ExportStatus {
    /// Every status value, in lifecycle order.
    pub const ALL: [ExportStatus; 3] = [
        ExportStatus::Unexported,
        ExportStatus::LastUpdated,
        ExportStatus::Exported,
    ];

    /// Returns the persisted representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportStatus::Unexported => "UNEXPORTED",
            ExportStatus::LastUpdated => "LAST_UPDATED",
            ExportStatus::Exported => "EXPORTED",
        }
    }

    /// Only unexported items may be deleted by their owner.
    pub fn is_deletable(&self) -> bool {
        matches!(self, ExportStatus::Unexported)
    }
}

impl StateMachine for ExportStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        use ExportStatus::*;
        match self {
            Unexported => vec![LastUpdated],
            LastUpdated => vec![Exported, Unexported],
            // Read-only viewer content from here on.
            Exported => vec![],
        }
    }
}

impl fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNEXPORTED" => Ok(ExportStatus::Unexported),
            "LAST_UPDATED" => Ok(ExportStatus::LastUpdated),
            "EXPORTED" => Ok(ExportStatus::Exported),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown export status '{}'", other),
            )),
        }
    }
}
