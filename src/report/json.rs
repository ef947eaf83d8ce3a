//! JSON-lines reporter.

use super::{ReportError, Reporter, StatusSnapshot};
use crate::core::HistoryReport;
use crate::summary::RunSummary;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
enum Record<'a> {
    Status(&'a StatusSnapshot),
    History(&'a HistoryReport),
    Summary(&'a RunSummary),
}

/// Writes every report as one JSON object per line.
///
/// Each line has the shape `{"kind": "status" | "history" | "summary", "data": ...}`.
pub struct JsonReporter<W> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_record(&mut self, record: &Record<'_>) -> Result<(), ReportError> {
        serde_json::to_writer(&mut self.out, record)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn status(&mut self, status: &StatusSnapshot) -> Result<(), ReportError> {
        self.write_record(&Record::Status(status))
    }

    fn history(&mut self, history: &HistoryReport) -> Result<(), ReportError> {
        self.write_record(&Record::History(history))
    }

    fn summary(&mut self, summary: &RunSummary) -> Result<(), ReportError> {
        self.write_record(&Record::Summary(summary))?;
        self.out.flush()?;
        Ok(())
    }
}
