//! Status and history reporting.
//!
//! The machine produces [`StatusSnapshot`]s, [`HistoryReport`]s and, at
//! shutdown, a [`RunSummary`]. A [`Reporter`] is the write-only sink they are
//! pushed into. Sink failures never stop the machine; it logs them and moves
//! on.

mod error;
mod json;
mod memory;
mod text;

pub use error::ReportError;
pub use json::JsonReporter;
pub use memory::MemoryReporter;
pub use text::TextReporter;

use crate::clock::Timestamp;
use crate::core::{HistoryReport, SystemState};
use crate::summary::RunSummary;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Read-only view of the machine's mode and counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub state: SystemState,
    pub move_count: u32,
    pub error_count: u32,
    pub last_heartbeat: Timestamp,
    pub delay: Timestamp,
}

impl fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Status] State={} MoveCount={} Errors={}",
            self.state.code(),
            self.move_count,
            self.error_count
        )
    }
}

/// Write-only sink for machine reports.
pub trait Reporter {
    fn status(&mut self, status: &StatusSnapshot) -> Result<(), ReportError>;

    fn history(&mut self, history: &HistoryReport) -> Result<(), ReportError>;

    /// Receive the final report of a run.
    ///
    /// The default forwards the drained history to [`Reporter::history`].
    fn summary(&mut self, summary: &RunSummary) -> Result<(), ReportError> {
        self.history(&summary.history)
    }
}

impl<T: Reporter + ?Sized> Reporter for &mut T {
    fn status(&mut self, status: &StatusSnapshot) -> Result<(), ReportError> {
        (**self).status(status)
    }

    fn history(&mut self, history: &HistoryReport) -> Result<(), ReportError> {
        (**self).history(history)
    }

    fn summary(&mut self, summary: &RunSummary) -> Result<(), ReportError> {
        (**self).summary(summary)
    }
}

impl<T: Reporter + ?Sized> Reporter for Box<T> {
    fn status(&mut self, status: &StatusSnapshot) -> Result<(), ReportError> {
        (**self).status(status)
    }

    fn history(&mut self, history: &HistoryReport) -> Result<(), ReportError> {
        (**self).history(history)
    }

    fn summary(&mut self, summary: &RunSummary) -> Result<(), ReportError> {
        (**self).summary(summary)
    }
}

/// Sink that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn status(&mut self, _status: &StatusSnapshot) -> Result<(), ReportError> {
        Ok(())
    }

    fn history(&mut self, _history: &HistoryReport) -> Result<(), ReportError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_displays_state_and_counters() {
        let status = StatusSnapshot {
            state: SystemState::Idle,
            move_count: 2,
            error_count: 1,
            last_heartbeat: 30,
            delay: 1000,
        };
        assert_eq!(status.to_string(), "[Status] State=1 MoveCount=2 Errors=1");
    }

    #[test]
    fn status_prints_state_ordinal() {
        for state in SystemState::ALL {
            let status = StatusSnapshot {
                state,
                move_count: 0,
                error_count: 0,
                last_heartbeat: 0,
                delay: 0,
            };
            let expected = format!("[Status] State={} MoveCount=0 Errors=0", state.code());
            assert_eq!(status.to_string(), expected);
        }
    }
}
