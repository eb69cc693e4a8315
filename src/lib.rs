//! Shifter: the State behavioural pattern
//!
//! An object appears to change its type when its internal state changes.
//! A [`Context`] holds one active [`State`] and delegates every
//! [`request`](Context::request) to it; states decide when to replace
//! themselves by calling back into the context through a weak
//! back-reference.
//!
//! # Core Concepts
//!
//! - **Context**: owns the active state, mediates transitions
//! - **State**: one behavioural mode, implemented by user types
//! - **Observer**: injectable hook notified of every transition
//! - **Catalog**: named state factories for dynamic transitions and resume
//! - **Checkpoint**: serialisable snapshot of a context
//!
//! # Example
//!
//! ```rust
//! use shifter::{Context, ContextRef, ContractViolation, State};
//! use std::rc::Rc;
//!
//! #[derive(Default)]
//! struct On {
//!     context: ContextRef,
//! }
//!
//! #[derive(Default)]
//! struct Off {
//!     context: ContextRef,
//! }
//!
//! impl State for On {
//!     fn handle(&self) -> Result<(), ContractViolation> {
//!         self.require_context()?.transition_to(Rc::new(Off::default()));
//!         Ok(())
//!     }
//!
//!     fn context_ref(&self) -> &ContextRef {
//!         &self.context
//!     }
//! }
//!
//! impl State for Off {
//!     fn handle(&self) -> Result<(), ContractViolation> {
//!         self.require_context()?.transition_to(Rc::new(On::default()));
//!         Ok(())
//!     }
//!
//!     fn context_ref(&self) -> &ContextRef {
//!         &self.context
//!     }
//! }
//!
//! let context = Context::new(Rc::new(Off::default()));
//! context.request().unwrap();
//! assert_eq!(context.state().name(), "On");
//! assert_eq!(context.history().path(), vec!["Off", "On"]);
//! ```

pub mod builder;
pub mod catalog;
pub mod checkpoint;
pub mod core;
pub mod observer;

// Re-export commonly used types
pub use builder::{BuildError, ContextBuilder};
pub use catalog::StateCatalog;
pub use checkpoint::{CheckpointError, ContextCheckpoint};
pub use crate::core::{
    Context, ContextId, ContextRef, ContractViolation, State, StateHandle, TransitionLog,
    TransitionRecord, WeakContext,
};
pub use observer::{
    NoopObserver, RecordingObserver, TracingObserver, TransitionEvent, TransitionObserver,
};
