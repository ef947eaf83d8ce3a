//! Core state model.
//!
//! This module contains the plain data of the supervisor:
//! - The closed `SystemState` enumeration
//! - The append-only `StateHistory` owned by the machine
//! - Detached `HistoryReport` snapshots handed to readers

mod history;
mod state;

pub use history::{HistoryEntry, HistoryReport, StateHistory};
pub use state::SystemState;
