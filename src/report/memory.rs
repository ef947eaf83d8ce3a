//! In-memory reporter.

use super::{ReportError, Reporter, StatusSnapshot};
use crate::core::HistoryReport;
use crate::summary::RunSummary;

/// Keeps every report it receives, in arrival order per kind.
#[derive(Clone, Debug, Default)]
pub struct MemoryReporter {
    statuses: Vec<StatusSnapshot>,
    histories: Vec<HistoryReport>,
    summaries: Vec<RunSummary>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statuses(&self) -> &[StatusSnapshot] {
        &self.statuses
    }

    pub fn histories(&self) -> &[HistoryReport] {
        &self.histories
    }

    pub fn summaries(&self) -> &[RunSummary] {
        &self.summaries
    }
}

impl Reporter for MemoryReporter {
    fn status(&mut self, status: &StatusSnapshot) -> Result<(), ReportError> {
        self.statuses.push(*status);
        Ok(())
    }

    fn history(&mut self, history: &HistoryReport) -> Result<(), ReportError> {
        self.histories.push(history.clone());
        Ok(())
    }

    fn summary(&mut self, summary: &RunSummary) -> Result<(), ReportError> {
        self.summaries.push(summary.clone());
        Ok(())
    }
}
