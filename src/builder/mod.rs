//! Builder API for configuring contexts.
//!
//! [`Context::new`](crate::core::Context::new) covers the common case. The
//! builder adds the remaining knobs: the transition observer, a state
//! catalog for named transitions, a cap on the history length and a fixed
//! context id.

pub mod context;
pub mod error;

pub use context::ContextBuilder;
pub use error::BuildError;
