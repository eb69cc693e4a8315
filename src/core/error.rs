//! Contract violations raised by contexts, states and the catalog.

use thiserror::Error;

/// A value handed to a context or state does not satisfy the contract
/// the call requires.
///
/// Typed calls such as [`Context::transition_to`](super::Context::transition_to)
/// are checked by the compiler. These variants cover the entry points
/// that can only be checked at runtime: lookups by name and handles
/// that outlived their context.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContractViolation {
    #[error("No state named '{name}' is registered in the catalog")]
    UnknownState { name: String },

    #[error("Cannot resolve state '{name}': no state catalog configured")]
    NoCatalog { name: String },

    #[error("State '{state}' has not been installed into a context")]
    Unbound { state: String },

    #[error("Context handle refers to a context that has been dropped")]
    ContextDropped,
}
