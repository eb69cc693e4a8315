//! Core types of the State pattern.
//!
//! This module contains the two halves of the pattern and what they share:
//! - [`Context`], which owns the active state and delegates to it
//! - [`State`], the trait each behavioural mode implements
//! - [`ContextRef`], the weak back-reference a state keeps to its context
//! - [`TransitionLog`], the ordered record of transitions

mod context;
mod error;
mod history;
mod state;

pub use context::{Context, ContextId, StateHandle, WeakContext};
pub use error::ContractViolation;
pub use history::{TransitionLog, TransitionRecord};
pub use state::{ContextRef, State};

pub(crate) use context::ContextConfig;
