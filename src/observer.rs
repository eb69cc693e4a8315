//! Observation hooks for transitions.
//!
//! A context reports every transition, including the initial installation,
//! to one [`TransitionObserver`]. The default observer writes a `tracing`
//! event; tests install a [`RecordingObserver`] and assert on the sequence.

use crate::core::{ContextId, TransitionRecord};
use chrono::{DateTime, Utc};
use std::cell::RefCell;

/// A transition as seen by observers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionEvent {
    /// Context that transitioned
    pub context: ContextId,
    /// Name of the replaced state, `None` for the initial installation
    pub from: Option<String>,
    /// Name of the installed state
    pub to: String,
    pub timestamp: DateTime<Utc>,
}

impl TransitionEvent {
    pub fn is_initial(&self) -> bool {
        self.from.is_none()
    }

    pub(crate) fn to_record(&self) -> TransitionRecord {
        TransitionRecord {
            from: self.from.clone(),
            to: self.to.clone(),
            timestamp: self.timestamp,
        }
    }
}

/// Hook called after a context has installed a new state.
///
/// The context is fully updated and not borrowed when the hook runs, so an
/// observer may inspect it.
pub trait TransitionObserver {
    fn on_transition(&self, event: &TransitionEvent);
}

/// Emits one `INFO` event per transition on the `shifter::transition` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl TransitionObserver for TracingObserver {
    fn on_transition(&self, event: &TransitionEvent) {
        tracing::info!(
            target: "shifter::transition",
            context = %event.context,
            from = event.from.as_deref().unwrap_or("-"),
            to = %event.to,
            "Context: Transition to {}",
            event.to
        );
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl TransitionObserver for NoopObserver {
    fn on_transition(&self, _event: &TransitionEvent) {}
}

/// Keeps every event in memory.
///
/// # Example
///
/// ```rust
/// use shifter::core::{Context, ContextRef, ContractViolation, State};
/// use shifter::observer::RecordingObserver;
/// use std::rc::Rc;
///
/// #[derive(Default)]
/// struct Idle {
///     context: ContextRef,
/// }
///
/// impl State for Idle {
///     fn handle(&self) -> Result<(), ContractViolation> {
///         Ok(())
///     }
///
///     fn context_ref(&self) -> &ContextRef {
///         &self.context
///     }
/// }
///
/// let observer = Rc::new(RecordingObserver::new());
/// let context = Context::builder()
///     .initial(Rc::new(Idle::default()))
///     .observer(observer.clone())
///     .build()
///     .unwrap();
///
/// context.transition_to(Rc::new(Idle::default()));
/// assert_eq!(observer.targets(), vec!["Idle", "Idle"]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: RefCell<Vec<TransitionEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every event seen so far, oldest first.
    pub fn events(&self) -> Vec<TransitionEvent> {
        self.events.borrow().clone()
    }

    /// Names of the installed states, oldest first.
    pub fn targets(&self) -> Vec<String> {
        self.events.borrow().iter().map(|e| e.to.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl TransitionObserver for RecordingObserver {
    fn on_transition(&self, event: &TransitionEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
