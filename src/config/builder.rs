//! Builder API for creating machine configuration.

use crate::clock::Timestamp;
use crate::config::{ConfigError, MachineConfig};

/// Builder for creating a validated [`MachineConfig`]
#[derive(Clone, Debug, Default)]
pub struct MachineConfigBuilder {
    config: MachineConfig,
}

impl MachineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn from_config(config: MachineConfig) -> Self {
        Self { config }
    }

    /// Set the inter-step delay in milliseconds
    pub fn delay(mut self, millis: Timestamp) -> Self {
        self.config.delay_ms = millis;
        self
    }

    /// Set the movement count that triggers Shooting
    pub fn move_threshold(mut self, n: u32) -> Self {
        self.config.move_threshold = n;
        self
    }

    /// Set the error count that must be exceeded to stop
    pub fn error_threshold(mut self, n: u32) -> Self {
        self.config.error_threshold = n;
        self
    }

    /// Build the configuration, reporting every violated rule
    pub fn build(self) -> Result<MachineConfig, ConfigError> {
        self.config.validated()
    }
}
