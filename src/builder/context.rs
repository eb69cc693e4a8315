//! Builder for constructing contexts.

use crate::builder::error::BuildError;
use crate::catalog::StateCatalog;
use crate::core::{Context, ContextConfig, ContextId, ContractViolation, StateHandle};
use crate::observer::{TracingObserver, TransitionObserver};
use std::rc::Rc;

enum Initial {
    State(StateHandle),
    Named(String),
}

/// Builder for constructing contexts with a fluent API.
///
/// # Example
///
/// ```rust
/// use shifter::builder::ContextBuilder;
/// use shifter::catalog::StateCatalog;
/// use shifter::core::{ContextRef, ContractViolation, State};
/// use shifter::observer::NoopObserver;
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
/// let context = ContextBuilder::new()
///     .catalog(StateCatalog::new().with_state("Idle", || Rc::new(Idle::default())))
///     .initial_named("Idle")
///     .observer(Rc::new(NoopObserver))
///     .history_capacity(16)
///     .build()
///     .unwrap();
///
/// assert_eq!(context.state().name(), "Idle");
/// ```
#[derive(Default)]
pub struct ContextBuilder {
    initial: Option<Initial>,
    observer: Option<Rc<dyn TransitionObserver>>,
    catalog: Option<Rc<StateCatalog>>,
    history_capacity: Option<usize>,
    id: Option<ContextId>,
}

impl ContextBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial state.
    ///
    /// Overrides an earlier call to this or [`initial_named`](Self::initial_named).
    pub fn initial(mut self, state: StateHandle) -> Self {
        self.initial = Some(Initial::State(state));
        self
    }

    /// Resolve the initial state from the catalog when building.
    pub fn initial_named(mut self, name: impl Into<String>) -> Self {
        self.initial = Some(Initial::Named(name.into()));
        self
    }

    /// Set the transition observer. Defaults to [`TracingObserver`].
    pub fn observer(mut self, observer: Rc<dyn TransitionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Attach a catalog owned by this context.
    pub fn catalog(self, catalog: StateCatalog) -> Self {
        self.shared_catalog(Rc::new(catalog))
    }

    /// Attach a catalog that may also be used by other contexts.
    pub fn shared_catalog(mut self, catalog: Rc<StateCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Keep at most `capacity` history records, dropping the oldest.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = Some(capacity);
        self
    }

    /// Use a fixed id instead of a random one.
    pub fn id(mut self, id: ContextId) -> Self {
        self.id = Some(id);
        self
    }

    /// Build the context, installing the initial state.
    pub fn build(self) -> Result<Context, BuildError> {
        let (initial, config) = self.into_parts()?;
        let initial = match initial.ok_or(BuildError::MissingInitialState)? {
            Initial::State(state) => state,
            Initial::Named(name) => resolve(&config, &name)?,
        };
        Ok(Context::with_config(initial, config))
    }

    /// Validated settings, without the initial state.
    pub(crate) fn into_config(self) -> Result<ContextConfig, BuildError> {
        self.into_parts().map(|(_, config)| config)
    }

    fn into_parts(self) -> Result<(Option<Initial>, ContextConfig), BuildError> {
        if self.history_capacity == Some(0) {
            return Err(BuildError::ZeroHistoryCapacity);
        }

        let config = ContextConfig {
            id: self.id.unwrap_or_default(),
            observer: self.observer.unwrap_or_else(|| Rc::new(TracingObserver)),
            catalog: self.catalog,
            history_capacity: self.history_capacity,
        };
        Ok((self.initial, config))
    }
}

fn resolve(config: &ContextConfig, name: &str) -> Result<StateHandle, BuildError> {
    let catalog = config
        .catalog
        .as_ref()
        .ok_or_else(|| ContractViolation::NoCatalog {
            name: name.to_string(),
        })?;
    Ok(catalog.instantiate(name)?)
}
