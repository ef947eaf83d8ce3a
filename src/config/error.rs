//! Configuration error types.

use crate::clock::Timestamp;
use thiserror::Error;

/// A single rule broken by a [`MachineConfig`](super::MachineConfig).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("move threshold must be at least 1")]
    ZeroMoveThreshold,

    #[error("error threshold {threshold} can never be exceeded by the error counter")]
    UnreachableErrorThreshold { threshold: u32 },

    #[error("delay of {delay} ms exceeds the maximum of {max} ms")]
    DelayTooLong { delay: Timestamp, max: Timestamp },
}

/// Errors that can occur while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Every violated rule, in check order
    #[error("invalid configuration: {}", describe(.0))]
    Invalid(Vec<ConfigViolation>),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

fn describe(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
