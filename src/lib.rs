//! Supervisor FSM: a supervisory finite-state-machine engine
//!
//! The machine cycles a simple robotic process through its operating modes
//! (Init, Idle, Movement, Shooting, Calculation, Error, Stopped), driven by
//! operator commands and a millisecond clock, and records every state it
//! visits.
//!
//! # Core Concepts
//!
//! - **State**: the closed [`SystemState`] enumeration
//! - **Machine**: owns mode, counters and history; [`Machine::step`] runs one handler
//! - **History**: append-only `(state, timestamp)` log, read through detached [`HistoryReport`]s
//! - **Collaborators**: injected [`Clock`], [`CommandSource`] and [`Reporter`]
//!
//! Faults never surface as Rust errors from the engine. An invalid command
//! or a calculation without movements sends the machine to Error, and the
//! fourth Error visit stops it.
//!
//! # Example
//!
//! ```rust
//! use supervisor_fsm::clock::SequenceClock;
//! use supervisor_fsm::command::ScriptedCommands;
//! use supervisor_fsm::core::SystemState;
//! use supervisor_fsm::machine::Machine;
//! use supervisor_fsm::report::NullReporter;
//!
//! // Four unrecognized commands: each one is a fault.
//! let commands: ScriptedCommands = vec![9, 9, 9, 9].into_iter().collect();
//! let machine = Machine::new(SequenceClock::new(1, 1), commands, NullReporter);
//!
//! let summary = machine.run();
//! assert_eq!(summary.final_state, SystemState::Stopped);
//! assert_eq!(summary.error_count, 4);
//! assert_eq!(summary.history.count(SystemState::Error), 4);
//! ```

pub mod clock;
pub mod command;
pub mod config;
pub mod core;
pub mod machine;
pub mod report;
pub mod summary;

// Re-export commonly used types
pub use clock::{Clock, MonotonicClock, Timestamp};
pub use command::{Command, CommandSource};
pub use config::{MachineConfig, MachineConfigBuilder};
pub use crate::core::{HistoryEntry, HistoryReport, StateHistory, SystemState};
pub use machine::{Machine, StepResult};
pub use report::{Reporter, StatusSnapshot};
pub use summary::RunSummary;
