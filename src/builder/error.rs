//! Build errors for the context builder.

use crate::core::ContractViolation;
use thiserror::Error;

/// Errors that can occur when building a context.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) or .initial_named(name) before .build()")]
    MissingInitialState,

    #[error("History capacity must be at least 1")]
    ZeroHistoryCapacity,

    #[error("Initial state could not be resolved: {0}")]
    InitialState(#[from] ContractViolation),
}
