//! Per-state handlers.
//!
//! Each handler performs its state's entry action and then transitions
//! exactly once, except Idle answering `status`, which only reports.

use super::{Machine, StepResult};
use crate::clock::Clock;
use crate::command::{Command, CommandSource};
use crate::config::DEFAULT_DELAY_MS;
use crate::core::SystemState;
use crate::report::Reporter;
use tracing::{error, info, warn};

impl<C: Clock, K: CommandSource, R: Reporter> Machine<C, K, R> {
    pub(super) fn on_init(&mut self) -> StepResult {
        info!("initializing");
        if self.delay == 0 {
            self.delay = DEFAULT_DELAY_MS;
        }
        self.advance(SystemState::Idle)
    }

    /// Blocks on the command source.
    pub(super) fn on_idle(&mut self) -> StepResult {
        self.report_status();

        let code = self.commands.next_command();
        let Some(command) = Command::from_code(code) else {
            warn!(code, "invalid command");
            return self.advance(SystemState::Error);
        };

        info!(%command, "command received");
        match command {
            Command::Status => {
                self.report_status();
                self.report_history();
                StepResult::Reported
            }
            Command::Move => self.advance(SystemState::Movement),
            Command::Shoot => self.advance(SystemState::Shooting),
            Command::Calc => self.advance(SystemState::Calculation),
            Command::Stop => self.advance(SystemState::Stopped),
        }
    }

    pub(super) fn on_movement(&mut self) -> StepResult {
        self.move_count = self.move_count.saturating_add(1);
        info!(move_count = self.move_count, "moving");

        if self.move_count >= self.move_threshold {
            self.advance(SystemState::Shooting)
        } else {
            self.advance(SystemState::Idle)
        }
    }

    pub(super) fn on_shooting(&mut self) -> StepResult {
        info!(move_count = self.move_count, "shooting");
        self.move_count = 0;
        self.advance(SystemState::Idle)
    }

    /// A calculation with no movements to work from is a fault.
    pub(super) fn on_calculation(&mut self) -> StepResult {
        info!(move_count = self.move_count, "calculating");

        if self.move_count == 0 {
            warn!("nothing to calculate from");
            self.advance(SystemState::Error)
        } else {
            self.advance(SystemState::Idle)
        }
    }

    pub(super) fn on_error(&mut self) -> StepResult {
        self.error_count = self.error_count.saturating_add(1);
        warn!(error_count = self.error_count, "handling error");

        if self.error_count > self.error_threshold {
            error!(
                error_count = self.error_count,
                threshold = self.error_threshold,
                "error threshold exceeded, stopping"
            );
            self.advance(SystemState::Stopped)
        } else {
            self.advance(SystemState::Idle)
        }
    }
}
