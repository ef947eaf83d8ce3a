//! Operating modes of the supervisor.
//!
//! `SystemState` is a closed enumeration: every dispatch site matches on it
//! exhaustively, so adding a mode forces every handler table to be updated.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating mode of the supervised process.
///
/// States carry no payload. Each variant has a stable numeric code
/// (its ordinal, `Init = 0` through `Stopped = 6`) and a display name.
///
/// # Example
///
/// ```rust
/// use supervisor_fsm::core::SystemState;
///
/// assert_eq!(SystemState::Movement.name(), "Movement");
/// assert_eq!(SystemState::Movement.code(), 2);
/// assert_eq!(SystemState::from_code(2), Some(SystemState::Movement));
/// assert!(SystemState::Stopped.is_final());
/// assert!(SystemState::Error.is_error());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SystemState {
    /// Start-up; fills in configuration defaults.
    Init,
    /// Waiting for an operator command.
    Idle,
    /// Performing one movement.
    Movement,
    /// Firing; clears the movement counter.
    Shooting,
    /// Computing from accumulated movements.
    Calculation,
    /// Recording an operational fault.
    Error,
    /// Terminal state.
    Stopped,
}

impl SystemState {
    /// Every state, in code order.
    pub const ALL: [SystemState; 7] = [
        Self::Init,
        Self::Idle,
        Self::Movement,
        Self::Shooting,
        Self::Calculation,
        Self::Error,
        Self::Stopped,
    ];

    /// Get the state's name for display/logging.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Init => "Init",
            Self::Idle => "Idle",
            Self::Movement => "Movement",
            Self::Shooting => "Shooting",
            Self::Calculation => "Calculation",
            Self::Error => "Error",
            Self::Stopped => "Stopped",
        }
    }

    /// Numeric code of the state (its ordinal).
    pub const fn code(self) -> u8 {
        match self {
            Self::Init => 0,
            Self::Idle => 1,
            Self::Movement => 2,
            Self::Shooting => 3,
            Self::Calculation => 4,
            Self::Error => 5,
            Self::Stopped => 6,
        }
    }

    /// Look a state up by its numeric code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// Check if this is the terminal state.
    ///
    /// No transitions leave a final state; the control loop ends on it.
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Stopped)
    }

    /// Check if this is the fault-handling state.
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }
}

impl fmt::Display for SystemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
