//! Run summary error types.

use thiserror::Error;

/// Errors that can occur while encoding or decoding a run summary
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Serialization to JSON failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Summary version is not supported by this version
    #[error("Unsupported summary version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}
