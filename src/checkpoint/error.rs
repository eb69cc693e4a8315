//! Checkpoint error types.

use crate::builder::BuildError;
use crate::core::ContractViolation;
use thiserror::Error;

/// Errors that can occur during checkpoint operations
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Checkpoint version is not supported by this version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// A state named in the checkpoint could not be instantiated
    #[error("Cannot restore state: {0}")]
    State(#[from] ContractViolation),

    /// The builder used for resuming is misconfigured
    #[error("Cannot configure resumed context: {0}")]
    Build(#[from] BuildError),
}
