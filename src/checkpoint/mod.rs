//! Checkpoint and resume for contexts.
//!
//! A checkpoint captures what can be serialised about a context: its id,
//! the names of its current and previous states and its transition log.
//! State objects themselves are not serialised; resuming re-creates them
//! from a [`StateCatalog`].

use crate::builder::ContextBuilder;
use crate::catalog::StateCatalog;
use crate::core::{Context, ContextId, ContractViolation, StateHandle, TransitionLog};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextCheckpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Id of the context the checkpoint was taken from
    pub id: ContextId,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Name of the current state
    pub current: String,

    /// Name of the previous state, if any
    pub previous: Option<String>,

    /// Transition history
    pub history: TransitionLog,
}

impl ContextCheckpoint {
    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Parse a JSON checkpoint, rejecting unsupported versions.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate_version()?;
        Ok(checkpoint)
    }

    /// Encode with bincode.
    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode a binary checkpoint, rejecting unsupported versions.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate_version()?;
        Ok(checkpoint)
    }

    fn validate_version(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }
}

impl Context {
    /// Capture the current state names and history.
    pub fn checkpoint(&self) -> ContextCheckpoint {
        ContextCheckpoint {
            version: CHECKPOINT_VERSION,
            id: self.id(),
            timestamp: Utc::now(),
            current: self.state().name().to_string(),
            previous: self.previous_state().map(|s| s.name().to_string()),
            history: self.history(),
        }
    }

    /// Rebuild a context from `checkpoint`, creating its states from
    /// `catalog`.
    ///
    /// Uses the default observer. See [`ContextBuilder::resume`] to
    /// configure the resumed context.
    pub fn resume(
        checkpoint: &ContextCheckpoint,
        catalog: Rc<StateCatalog>,
    ) -> Result<Context, CheckpointError> {
        ContextBuilder::new().shared_catalog(catalog).resume(checkpoint)
    }
}

impl ContextBuilder {
    /// Rebuild a context from `checkpoint` with this builder's settings.
    ///
    /// The context keeps the checkpoint's id and history; an id or initial
    /// state set on the builder is ignored. States are created from the
    /// builder's catalog. No transition event is emitted.
    pub fn resume(self, checkpoint: &ContextCheckpoint) -> Result<Context, CheckpointError> {
        checkpoint.validate_version()?;

        let mut config = self.into_config()?;
        config.id = checkpoint.id;

        let catalog = config
            .catalog
            .clone()
            .ok_or_else(|| ContractViolation::NoCatalog {
                name: checkpoint.current.clone(),
            })?;
        let current = catalog.instantiate(&checkpoint.current)?;
        let previous: Option<StateHandle> = checkpoint
            .previous
            .as_deref()
            .map(|name| catalog.instantiate(name))
            .transpose()?;

        tracing::debug!(
            context = %checkpoint.id,
            current = %checkpoint.current,
            transitions = checkpoint.history.len(),
            "resuming context from checkpoint"
        );

        Ok(Context::restore(
            current,
            previous,
            checkpoint.history.clone(),
            config,
        ))
    }
}
