//! State transition history tracking.
//!
//! The machine owns a single append-only [`StateHistory`]. Readers never see
//! it directly; they receive a [`HistoryReport`], an owned copy taken at one
//! point in time.

use super::state::SystemState;
use crate::clock::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// One visited state and the heartbeat at which it was entered.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The state that was entered
    pub state: SystemState,
    /// Clock reading, in milliseconds, when the state was entered
    pub timestamp: Timestamp,
}

impl HistoryEntry {
    pub const fn new(state: SystemState, timestamp: Timestamp) -> Self {
        Self { state, timestamp }
    }
}

/// Append-only log of every state the machine has entered.
///
/// The log is seeded with the initial state on construction and is never
/// empty until the machine shuts down and drains it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StateHistory {
    entries: Vec<HistoryEntry>,
}

impl StateHistory {
    pub(crate) fn seeded(state: SystemState, timestamp: Timestamp) -> Self {
        Self {
            entries: vec![HistoryEntry::new(state, timestamp)],
        }
    }

    pub(crate) fn record(&mut self, state: SystemState, timestamp: Timestamp) {
        self.entries.push(HistoryEntry::new(state, timestamp));
    }

    /// Empty the log, handing its contents over as a report.
    pub(crate) fn drain(&mut self) -> HistoryReport {
        HistoryReport {
            entries: std::mem::take(&mut self.entries),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recently entered state.
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Copy the log into a detached report.
    pub fn snapshot(&self) -> HistoryReport {
        HistoryReport {
            entries: self.entries.clone(),
        }
    }
}

/// Detached, ordered copy of a machine's history.
///
/// A report can be iterated any number of times, and mutations of the machine
/// that produced it are never visible through it.
///
/// # Example
///
/// ```rust
/// use supervisor_fsm::core::{HistoryEntry, HistoryReport, SystemState};
///
/// let report: HistoryReport = vec![
///     HistoryEntry::new(SystemState::Init, 0),
///     HistoryEntry::new(SystemState::Idle, 15),
///     HistoryEntry::new(SystemState::Error, 40),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(report.len(), 3);
/// assert_eq!(report.count(SystemState::Error), 1);
/// assert_eq!(report.to_string(), "[History] (0,0) (1,15) (5,40)");
///
/// // Iterating twice yields the same sequence.
/// let first: Vec<_> = report.iter().map(|e| e.state).collect();
/// let second: Vec<_> = report.iter().map(|e| e.state).collect();
/// assert_eq!(first, second);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryReport {
    entries: Vec<HistoryEntry>,
}

impl HistoryReport {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    pub fn first(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Get the path of states traversed, in order.
    pub fn path(&self) -> Vec<SystemState> {
        self.entries.iter().map(|entry| entry.state).collect()
    }

    /// Number of times `state` was entered.
    pub fn count(&self, state: SystemState) -> usize {
        self.entries.iter().filter(|entry| entry.state == state).count()
    }

    /// Time elapsed between the first and the last entry.
    ///
    /// Returns `None` for an empty report.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.entries.first()?, self.entries.last()?);
        Some(Duration::from_millis(
            last.timestamp.saturating_sub(first.timestamp),
        ))
    }
}

impl FromIterator<HistoryEntry> for HistoryReport {
    fn from_iter<I: IntoIterator<Item = HistoryEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for HistoryReport {
    type Item = HistoryEntry;
    type IntoIter = std::vec::IntoIter<HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a HistoryReport {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for HistoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[History]")?;
        for entry in &self.entries {
            write!(f, " ({},{})", entry.state.code(), entry.timestamp)?;
        }
        Ok(())
    }
}
