//! Machine configuration.
//!
//! Configuration is plain serde data, loaded from JSON or assembled with
//! [`MachineConfigBuilder`]. Validation uses Stillwater's `Validation` type so
//! that every broken rule is reported at once instead of the first one only.
//!
//! # Example
//!
//! ```rust
//! use supervisor_fsm::config::{ConfigError, MachineConfig, MachineConfigBuilder};
//!
//! let config = MachineConfigBuilder::new().delay(250).build().unwrap();
//! assert_eq!(config.delay_ms, 250);
//! assert_eq!(config.move_threshold, 3);
//!
//! let err = MachineConfig::from_json_str(r#"{ "move_threshold": 0, "delay_ms": 99999999 }"#)
//!     .unwrap_err();
//! match err {
//!     ConfigError::Invalid(violations) => assert_eq!(violations.len(), 2),
//!     other => panic!("unexpected error: {other}"),
//! }
//! ```

pub mod builder;
pub mod error;

pub use builder::MachineConfigBuilder;
pub use error::{ConfigError, ConfigViolation};

use crate::clock::Timestamp;
use serde::{Deserialize, Serialize};
use std::path::Path;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Delay applied by the Init handler when none is configured.
pub const DEFAULT_DELAY_MS: Timestamp = 1000;

/// Movements needed before the machine switches to Shooting.
pub const DEFAULT_MOVE_THRESHOLD: u32 = 3;

/// Errors tolerated before the machine escalates to Stopped.
pub const DEFAULT_ERROR_THRESHOLD: u32 = 3;

/// Upper bound accepted for `delay_ms` (one hour).
pub const MAX_DELAY_MS: Timestamp = 60 * 60 * 1000;

/// Tunable parameters of a machine.
///
/// Only the numbers are configurable. The comparisons are fixed: Movement
/// escalates once `move_count >= move_threshold`, Error escalates once
/// `error_count > error_threshold`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Inter-step delay in milliseconds; `0` means unset.
    pub delay_ms: Timestamp,
    pub move_threshold: u32,
    pub error_threshold: u32,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            delay_ms: 0,
            move_threshold: DEFAULT_MOVE_THRESHOLD,
            error_threshold: DEFAULT_ERROR_THRESHOLD,
        }
    }
}

impl MachineConfig {
    /// Check every rule, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigViolation>>> = Vec::new();

        checks.push(if self.move_threshold == 0 {
            Validation::fail(ConfigViolation::ZeroMoveThreshold)
        } else {
            Validation::success(())
        });

        // The error counter saturates at u32::MAX, so it can never exceed it.
        checks.push(if self.error_threshold == u32::MAX {
            Validation::fail(ConfigViolation::UnreachableErrorThreshold {
                threshold: self.error_threshold,
            })
        } else {
            Validation::success(())
        });

        checks.push(if self.delay_ms > MAX_DELAY_MS {
            Validation::fail(ConfigViolation::DelayTooLong {
                delay: self.delay_ms,
                max: MAX_DELAY_MS,
            })
        } else {
            Validation::success(())
        });

        Validation::all_vec(checks).map(|_| ())
    }

    /// Consume the config, returning it unchanged if every rule holds.
    pub fn validated(self) -> Result<Self, ConfigError> {
        match self.validate() {
            Validation::Success(()) => Ok(self),
            Validation::Failure(violations) => {
                Err(ConfigError::Invalid(violations.iter().cloned().collect()))
            }
        }
    }

    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validated()
    }

    /// Read, parse and validate a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = MachineConfig::default();
        assert!(config.validate().is_success());
        assert_eq!(config.delay_ms, 0);
        assert_eq!(config.move_threshold, 3);
        assert_eq!(config.error_threshold, 3);
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let config = MachineConfig {
            delay_ms: MAX_DELAY_MS + 1,
            move_threshold: 0,
            error_threshold: u32::MAX,
        };

        match config.validate() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 3);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigViolation::ZeroMoveThreshold)));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigViolation::UnreachableErrorThreshold { .. })));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigViolation::DelayTooLong { .. })));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn zero_error_threshold_is_allowed() {
        let config = MachineConfig {
            error_threshold: 0,
            ..MachineConfig::default()
        };
        assert!(config.validated().is_ok());
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let config = MachineConfig::from_json_str(r#"{ "delay_ms": 500 }"#).unwrap();
        assert_eq!(config.delay_ms, 500);
        assert_eq!(config.move_threshold, DEFAULT_MOVE_THRESHOLD);
        assert_eq!(config.error_threshold, DEFAULT_ERROR_THRESHOLD);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = MachineConfig::from_json_str("{ delay_ms: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn invalid_error_lists_every_violation() {
        let err = MachineConfig {
            move_threshold: 0,
            delay_ms: MAX_DELAY_MS + 1,
            ..MachineConfig::default()
        }
        .validated()
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("move threshold must be at least 1"));
        assert!(message.contains("exceeds the maximum"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = MachineConfig::from_json_file("/nonexistent/supervisor.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn config_survives_json() {
        let config = MachineConfig {
            delay_ms: 20,
            move_threshold: 5,
            error_threshold: 1,
        };
        let json = config.to_json_pretty().unwrap();
        assert_eq!(MachineConfig::from_json_str(&json).unwrap(), config);
    }
}
