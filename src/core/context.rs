//! The context whose behaviour is delegated to its current state.

use super::error::ContractViolation;
use super::history::{TransitionLog, TransitionRecord};
use super::state::State;
use crate::builder::ContextBuilder;
use crate::catalog::StateCatalog;
use crate::observer::{TracingObserver, TransitionEvent, TransitionObserver};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use uuid::Uuid;

/// Shared handle to a state installed in a context.
pub type StateHandle = Rc<dyn State>;

/// Identifier of a context, used in logs and checkpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextId(Uuid);

impl ContextId {
    /// Generate a random (v4) id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ContextId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ContextId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Settings a context is created with.
pub(crate) struct ContextConfig {
    pub id: ContextId,
    pub observer: Rc<dyn TransitionObserver>,
    pub catalog: Option<Rc<StateCatalog>>,
    pub history_capacity: Option<usize>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            id: ContextId::new(),
            observer: Rc::new(TracingObserver),
            catalog: None,
            history_capacity: None,
        }
    }
}

struct Inner {
    id: ContextId,
    current: StateHandle,
    previous: Option<StateHandle>,
    history: TransitionLog,
    history_capacity: Option<usize>,
    observer: Rc<dyn TransitionObserver>,
    catalog: Option<Rc<StateCatalog>>,
}

/// Holds exactly one active [`State`] and delegates requests to it.
///
/// `Context` is a cheap, cloneable handle; clones refer to the same
/// context. States only ever hold a [`WeakContext`], so dropping the last
/// `Context` handle destroys the context and every state it owns.
///
/// The type is single-threaded. Internal borrows are released before any
/// handler, observer or state factory runs, so a handler may call back
/// into the context while [`request`](Context::request) is in progress.
#[derive(Clone)]
pub struct Context {
    inner: Rc<RefCell<Inner>>,
}

/// Non-owning handle to a [`Context`].
#[derive(Clone, Default)]
pub struct WeakContext {
    inner: Weak<RefCell<Inner>>,
}

impl WeakContext {
    /// A handle that refers to no context.
    pub fn new() -> Self {
        Self::default()
    }

    /// A strong handle, if the context is still alive.
    pub fn upgrade(&self) -> Option<Context> {
        self.inner.upgrade().map(|inner| Context { inner })
    }

    /// Whether some `Context` handle still keeps the context alive.
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Whether both handles refer to the same context allocation.
    pub fn ptr_eq(&self, other: &WeakContext) -> bool {
        self.inner.ptr_eq(&other.inner)
    }
}

impl fmt::Debug for WeakContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(context) => f
                .debug_tuple("WeakContext")
                .field(&context.id().to_string())
                .finish(),
            None => f.write_str("WeakContext(<dropped>)"),
        }
    }
}

impl Context {
    /// Create a context in `initial`, logging transitions through
    /// [`TracingObserver`].
    ///
    /// The initial state is installed through the same path as
    /// [`transition_to`](Context::transition_to): its back-reference is
    /// wired and a record with no `from` is written.
    ///
    /// The history is unbounded: every transition appends a record. Use
    /// [`ContextBuilder::history_capacity`] for long-running contexts.
    pub fn new(initial: StateHandle) -> Self {
        Self::with_config(initial, ContextConfig::default())
    }

    /// Start configuring a context.
    pub fn builder() -> ContextBuilder {
        ContextBuilder::new()
    }

    pub(crate) fn with_config(initial: StateHandle, config: ContextConfig) -> Self {
        let context = Self::allocate(Rc::clone(&initial), None, TransitionLog::new(), config);
        context.install(None, &initial);
        context
    }

    /// Rebuild a context from saved parts without emitting an event.
    pub(crate) fn restore(
        current: StateHandle,
        previous: Option<StateHandle>,
        mut history: TransitionLog,
        config: ContextConfig,
    ) -> Self {
        if let Some(capacity) = config.history_capacity {
            history.truncate_front(capacity);
        }
        let context = Self::allocate(Rc::clone(&current), previous.clone(), history, config);
        if let Some(previous) = previous {
            previous.context_ref().bind(context.downgrade());
        }
        current.context_ref().bind(context.downgrade());
        context
    }

    fn allocate(
        current: StateHandle,
        previous: Option<StateHandle>,
        history: TransitionLog,
        config: ContextConfig,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                id: config.id,
                current,
                previous,
                history,
                history_capacity: config.history_capacity,
                observer: config.observer,
                catalog: config.catalog,
            })),
        }
    }

    /// Replace the current state with `state`.
    ///
    /// The current state becomes the previous one, `state`'s
    /// back-reference is pointed at this context, a record is appended to
    /// the history and the observer is notified.
    pub fn transition_to(&self, state: StateHandle) {
        let (replaced, displaced) = {
            let mut inner = self.inner.borrow_mut();
            let replaced = std::mem::replace(&mut inner.current, Rc::clone(&state));
            let displaced = inner.previous.replace(Rc::clone(&replaced));
            (replaced, displaced)
        };
        // Dropped outside the borrow: a state's Drop may touch the context.
        drop(displaced);

        let from = replaced.name().to_string();
        self.install(Some(from), &state);
    }

    /// Transition to the state registered under `name` in this context's
    /// catalog.
    ///
    /// Fails without touching the current state when no catalog is
    /// configured or the name is unknown.
    pub fn transition_to_named(&self, name: &str) -> Result<(), ContractViolation> {
        let catalog = self
            .catalog()
            .ok_or_else(|| ContractViolation::NoCatalog {
                name: name.to_string(),
            })?;
        let state = catalog.instantiate(name)?;
        self.transition_to(state);
        Ok(())
    }

    fn install(&self, from: Option<String>, state: &StateHandle) {
        state.context_ref().bind(self.downgrade());

        let event = TransitionEvent {
            context: self.id(),
            from,
            to: state.name().to_string(),
            timestamp: Utc::now(),
        };

        let observer = {
            let mut inner = self.inner.borrow_mut();
            let capacity = inner.history_capacity;
            inner.history.push(event.to_record(), capacity);
            Rc::clone(&inner.observer)
        };
        observer.on_transition(&event);
    }

    /// Delegate to the current state's [`State::handle`].
    ///
    /// Any transition the handler performs is visible through
    /// [`state`](Context::state) as soon as this returns.
    pub fn request(&self) -> Result<(), ContractViolation> {
        let state = self.state();
        tracing::trace!(context = %self.id(), state = state.name(), "handling request");
        state.handle()
    }

    /// The current state.
    pub fn state(&self) -> StateHandle {
        Rc::clone(&self.inner.borrow().current)
    }

    /// The state replaced by the most recent transition.
    pub fn previous_state(&self) -> Option<StateHandle> {
        self.inner.borrow().previous.clone()
    }

    /// Whether `state` is the very instance currently installed.
    pub fn is_current(&self, state: &StateHandle) -> bool {
        Rc::ptr_eq(&self.inner.borrow().current, state)
    }

    /// Snapshot of the transition history.
    ///
    /// Clones the whole log. Prefer [`history_len`](Context::history_len)
    /// or [`last_transition`](Context::last_transition) on hot paths.
    pub fn history(&self) -> TransitionLog {
        self.inner.borrow().history.clone()
    }

    /// Number of records in the history.
    pub fn history_len(&self) -> usize {
        self.inner.borrow().history.len()
    }

    /// Most recent transition record.
    pub fn last_transition(&self) -> Option<TransitionRecord> {
        self.inner.borrow().history.last().cloned()
    }

    /// Id used in transition events and checkpoints.
    pub fn id(&self) -> ContextId {
        self.inner.borrow().id
    }

    /// Catalog used by [`transition_to_named`](Context::transition_to_named).
    pub fn catalog(&self) -> Option<Rc<StateCatalog>> {
        self.inner.borrow().catalog.clone()
    }

    /// Non-owning handle to this context.
    pub fn downgrade(&self) -> WeakContext {
        WeakContext {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Whether both handles refer to the same context.
    pub fn ptr_eq(&self, other: &Context) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (id, current, previous, transitions) = {
            let inner = self.inner.borrow();
            (
                inner.id,
                Rc::clone(&inner.current),
                inner.previous.clone(),
                inner.history.len(),
            )
        };
        f.debug_struct("Context")
            .field("id", &id.to_string())
            .field("current", &current.name())
            .field("previous", &previous.as_ref().map(|s| s.name()))
            .field("transitions", &transitions)
            .finish()
    }
}
