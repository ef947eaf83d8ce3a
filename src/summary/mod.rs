//! Final report of a supervisor run.
//!
//! A [`RunSummary`] is what remains of a machine after shutdown: its final
//! mode and counters plus the history that was drained from it. It is a
//! plain value meant for reporting, not a way to resume a machine.

use crate::clock::Timestamp;
use crate::core::{HistoryReport, SystemState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::SummaryError;

/// Version identifier for the summary format
pub const SUMMARY_VERSION: u32 = 1;

/// Everything known about a run once the machine has shut down.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Summary format version
    pub version: u32,

    /// Unique identifier of the run
    pub run_id: Uuid,

    /// Wall-clock time the machine was created
    pub started_at: DateTime<Utc>,

    /// Wall-clock time the machine shut down
    pub finished_at: DateTime<Utc>,

    /// State the machine was in at shutdown
    pub final_state: SystemState,

    pub move_count: u32,

    pub error_count: u32,

    /// Configured delay, in milliseconds
    pub delay: Timestamp,

    /// Heartbeat of the last transition
    pub last_heartbeat: Timestamp,

    /// Every state visited, seed entry included
    pub history: HistoryReport,
}

impl RunSummary {
    /// Number of transitions taken (history entries after the seed).
    pub fn transitions(&self) -> usize {
        self.history.len().saturating_sub(1)
    }

    /// Wall-clock time between creation and shutdown.
    pub fn wall_time(&self) -> chrono::Duration {
        self.finished_at.signed_duration_since(self.started_at)
    }

    pub fn to_json(&self) -> Result<String, SummaryError> {
        serde_json::to_string(self).map_err(|e| SummaryError::SerializationFailed(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, SummaryError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SummaryError::SerializationFailed(e.to_string()))
    }

    /// Decode a summary, rejecting formats newer than this build understands.
    pub fn from_json(json: &str) -> Result<Self, SummaryError> {
        let summary: Self = serde_json::from_str(json)
            .map_err(|e| SummaryError::DeserializationFailed(e.to_string()))?;

        if summary.version > SUMMARY_VERSION {
            return Err(SummaryError::UnsupportedVersion {
                found: summary.version,
                supported: SUMMARY_VERSION,
            });
        }

        Ok(summary)
    }
}
