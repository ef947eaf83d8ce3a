//! Human-readable line reporter.

use super::{ReportError, Reporter, StatusSnapshot};
use crate::core::HistoryReport;
use crate::summary::RunSummary;
use std::io::Write;

/// Writes one line per report in the console format. States are printed as
/// their numeric codes.
///
/// ```text
/// [Status] State=1 MoveCount=1 Errors=0
/// [History] (0,0) (1,3) (2,9) (1,12)
/// ```
pub struct TextReporter<W> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn status(&mut self, status: &StatusSnapshot) -> Result<(), ReportError> {
        writeln!(self.out, "{status}")?;
        Ok(())
    }

    fn history(&mut self, history: &HistoryReport) -> Result<(), ReportError> {
        writeln!(self.out, "{history}")?;
        Ok(())
    }

    fn summary(&mut self, summary: &RunSummary) -> Result<(), ReportError> {
        writeln!(
            self.out,
            "[Summary] run={} final={} moves={} errors={} transitions={}",
            summary.run_id,
            summary.final_state,
            summary.move_count,
            summary.error_count,
            summary.transitions()
        )?;
        self.history(&summary.history)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{HistoryEntry, SystemState};

    #[test]
    fn writes_status_and_history_lines() {
        let mut reporter = TextReporter::new(Vec::new());
        reporter
            .status(&StatusSnapshot {
                state: SystemState::Idle,
                move_count: 0,
                error_count: 0,
                last_heartbeat: 3,
                delay: 1000,
            })
            .unwrap();
        let history: HistoryReport = vec![
            HistoryEntry::new(SystemState::Init, 0),
            HistoryEntry::new(SystemState::Idle, 3),
        ]
        .into_iter()
        .collect();
        reporter.history(&history).unwrap();

        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            text,
            "[Status] State=1 MoveCount=0 Errors=0\n[History] (0,0) (1,3)\n"
        );
    }
}
