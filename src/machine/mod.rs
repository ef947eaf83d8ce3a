//! The supervisory state machine engine.
//!
//! [`Machine`] owns the current mode, counters and history. Its collaborators
//! are injected: a [`Clock`] for heartbeats, a [`CommandSource`] read by the
//! Idle handler, and a [`Reporter`] that receives status and history output.
//!
//! Every change of mode goes through [`Machine::transition_to`], which stamps
//! the heartbeat and appends to the history. Which transitions are legal is
//! decided only by the per-state handlers in `handlers.rs`.

mod handlers;

use crate::clock::{Clock, Timestamp};
use crate::command::CommandSource;
use crate::config::{ConfigError, MachineConfig};
use crate::core::{HistoryReport, StateHistory, SystemState};
use crate::report::{Reporter, StatusSnapshot};
use crate::summary::{RunSummary, SUMMARY_VERSION};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Outcome of a single [`Machine::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// The handler moved the machine to a new state
    Transitioned { from: SystemState, to: SystemState },

    /// Idle answered a `status` command; no transition was taken
    Reported,

    /// The machine is Stopped; nothing was done
    Halted,
}

impl StepResult {
    /// Target state, if the step transitioned.
    pub fn target(&self) -> Option<SystemState> {
        match self {
            Self::Transitioned { to, .. } => Some(*to),
            Self::Reported | Self::Halted => None,
        }
    }
}

/// Supervisory finite-state machine.
///
/// # Example
///
/// ```rust
/// use supervisor_fsm::clock::SequenceClock;
/// use supervisor_fsm::command::{Command, ScriptedCommands};
/// use supervisor_fsm::core::SystemState;
/// use supervisor_fsm::machine::Machine;
/// use supervisor_fsm::report::MemoryReporter;
///
/// let clock = SequenceClock::new(10, 10);
/// let mut commands = ScriptedCommands::from_commands([Command::Move, Command::Stop]);
/// let mut reporter = MemoryReporter::new();
///
/// let machine = Machine::new(&clock, &mut commands, &mut reporter);
/// let summary = machine.run();
///
/// assert_eq!(summary.final_state, SystemState::Stopped);
/// assert_eq!(
///     summary.history.path(),
///     vec![
///         SystemState::Init,
///         SystemState::Idle,
///         SystemState::Movement,
///         SystemState::Idle,
///         SystemState::Stopped,
///     ]
/// );
/// ```
pub struct Machine<C, K, R> {
    clock: C,
    commands: K,
    reporter: R,
    current_state: SystemState,
    last_heartbeat: Timestamp,
    delay: Timestamp,
    move_threshold: u32,
    error_threshold: u32,
    error_count: u32,
    move_count: u32,
    history: StateHistory,
    run_id: Uuid,
    started_at: DateTime<Utc>,
}

impl<C: Clock, K: CommandSource, R: Reporter> Machine<C, K, R> {
    /// Create a machine in Init with default configuration and no delay set.
    pub fn new(clock: C, commands: K, reporter: R) -> Self {
        Self::from_valid_config(MachineConfig::default(), clock, commands, reporter)
    }

    /// Create a machine in Init with the given delay.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `delay` exceeds
    /// [`MAX_DELAY_MS`](crate::config::MAX_DELAY_MS).
    pub fn with_delay(
        delay: Timestamp,
        clock: C,
        commands: K,
        reporter: R,
    ) -> Result<Self, ConfigError> {
        let config = MachineConfig {
            delay_ms: delay,
            ..MachineConfig::default()
        };
        Self::with_config(config, clock, commands, reporter)
    }

    /// Create a machine in Init from a configuration.
    ///
    /// The history is seeded with `(Init, 0)` and the heartbeat starts at 0.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] listing every rule `config` breaks.
    pub fn with_config(
        config: MachineConfig,
        clock: C,
        commands: K,
        reporter: R,
    ) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        Ok(Self::from_valid_config(config, clock, commands, reporter))
    }

    fn from_valid_config(config: MachineConfig, clock: C, commands: K, reporter: R) -> Self {
        let run_id = Uuid::new_v4();
        debug!(
            %run_id,
            delay = config.delay_ms,
            move_threshold = config.move_threshold,
            error_threshold = config.error_threshold,
            "machine created"
        );

        Self {
            clock,
            commands,
            reporter,
            current_state: SystemState::Init,
            last_heartbeat: 0,
            delay: config.delay_ms,
            move_threshold: config.move_threshold,
            error_threshold: config.error_threshold,
            error_count: 0,
            move_count: 0,
            history: StateHistory::seeded(SystemState::Init, 0),
            run_id,
            started_at: Utc::now(),
        }
    }

    pub fn current_state(&self) -> SystemState {
        self.current_state
    }

    /// Heartbeat of the most recent transition.
    pub fn last_heartbeat(&self) -> Timestamp {
        self.last_heartbeat
    }

    pub fn delay(&self) -> Timestamp {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Timestamp) {
        self.delay = delay;
    }

    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Clear the error counter. This is the only way it ever decreases.
    pub fn reset_error_count(&mut self) {
        info!(previous = self.error_count, "error count reset");
        self.error_count = 0;
    }

    pub fn reset_move_count(&mut self) {
        info!(previous = self.move_count, "move count reset");
        self.move_count = 0;
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Enter `new_state` unconditionally.
    ///
    /// Stamps the heartbeat from the clock and appends the pair to the history.
    pub fn transition_to(&mut self, new_state: SystemState) {
        let from = self.current_state;
        self.current_state = new_state;
        self.last_heartbeat = self.clock.now_millis();
        self.history.record(new_state, self.last_heartbeat);
        debug!(
            %from,
            to = %new_state,
            heartbeat = self.last_heartbeat,
            "transition"
        );
    }

    /// Run the handler of the current state once.
    pub fn step(&mut self) -> StepResult {
        match self.current_state {
            SystemState::Init => self.on_init(),
            SystemState::Idle => self.on_idle(),
            SystemState::Movement => self.on_movement(),
            SystemState::Shooting => self.on_shooting(),
            SystemState::Calculation => self.on_calculation(),
            SystemState::Error => self.on_error(),
            SystemState::Stopped => StepResult::Halted,
        }
    }

    /// Step until the machine stops, then shut it down.
    pub fn run(mut self) -> RunSummary {
        info!(run_id = %self.run_id, "supervisor loop starting");
        while !self.current_state.is_final() {
            self.step();
        }
        self.shutdown()
    }

    /// Tear the machine down: drain its history and report the final summary.
    ///
    /// Consuming `self` means no transition can follow shutdown.
    pub fn shutdown(mut self) -> RunSummary {
        info!(
            run_id = %self.run_id,
            state = %self.current_state,
            transitions = self.history.len().saturating_sub(1),
            "shutting down"
        );

        let summary = RunSummary {
            version: SUMMARY_VERSION,
            run_id: self.run_id,
            started_at: self.started_at,
            finished_at: Utc::now(),
            final_state: self.current_state,
            move_count: self.move_count,
            error_count: self.error_count,
            delay: self.delay,
            last_heartbeat: self.last_heartbeat,
            history: self.history.drain(),
        };

        if let Err(err) = self.reporter.summary(&summary) {
            warn!(error = %err, "failed to report run summary");
        }
        summary
    }

    /// Snapshot of the mode and counters.
    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            state: self.current_state,
            move_count: self.move_count,
            error_count: self.error_count,
            last_heartbeat: self.last_heartbeat,
            delay: self.delay,
        }
    }

    /// Detached copy of the history.
    pub fn history_report(&self) -> HistoryReport {
        self.history.snapshot()
    }

    fn report_status(&mut self) {
        let status = self.status();
        if let Err(err) = self.reporter.status(&status) {
            warn!(error = %err, "failed to report status");
        }
    }

    fn report_history(&mut self) {
        let history = self.history_report();
        if let Err(err) = self.reporter.history(&history) {
            warn!(error = %err, "failed to report history");
        }
    }

    fn advance(&mut self, to: SystemState) -> StepResult {
        let from = self.current_state;
        self.transition_to(to);
        StepResult::Transitioned { from, to }
    }
}
