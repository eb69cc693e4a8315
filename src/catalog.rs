//! Named state factories.
//!
//! A catalog lets a context resolve states by name: handlers can call
//! [`Context::transition_to_named`](crate::core::Context::transition_to_named)
//! without constructing the next state themselves, and checkpoints can be
//! resumed from the state names they store.

use crate::core::{ContractViolation, StateHandle};
use std::collections::BTreeMap;
use std::fmt;

/// Function producing a fresh state instance.
pub type StateFactory = Box<dyn Fn() -> StateHandle>;

/// Registry of state factories keyed by name.
///
/// Register each state under the name its [`State::name`](crate::core::State::name)
/// returns, otherwise checkpoints taken from a context will not resume.
///
/// # Example
///
/// ```rust
/// use shifter::catalog::StateCatalog;
/// use shifter::core::{ContextRef, ContractViolation, State};
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
/// let catalog = StateCatalog::new().with_state("Idle", || Rc::new(Idle::default()));
///
/// assert!(catalog.contains("Idle"));
/// assert!(catalog.instantiate("Busy").is_err());
/// ```
#[derive(Default)]
pub struct StateCatalog {
    factories: BTreeMap<String, StateFactory>,
}

impl StateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `name`, replacing any earlier registration.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> StateHandle + 'static,
    {
        let name = name.into();
        tracing::debug!(state = %name, "registering state factory");
        self.factories.insert(name, Box::new(factory));
        self
    }

    /// Builder-style [`register`](StateCatalog::register).
    pub fn with_state<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> StateHandle + 'static,
    {
        self.register(name, factory);
        self
    }

    /// Create a fresh instance of the state registered under `name`.
    pub fn instantiate(&self, name: &str) -> Result<StateHandle, ContractViolation> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ContractViolation::UnknownState {
                name: name.to_string(),
            })?;
        Ok(factory())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for StateCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCatalog")
            .field("states", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ContextRef, State};
    use std::rc::Rc;

    struct Tagged {
        tag: &'static str,
        context: ContextRef,
    }

    impl Tagged {
        fn create(tag: &'static str) -> StateHandle {
            Rc::new(Self {
                tag,
                context: ContextRef::new(),
            })
        }
    }

    impl State for Tagged {
        fn handle(&self) -> Result<(), ContractViolation> {
            Ok(())
        }

        fn context_ref(&self) -> &ContextRef {
            &self.context
        }

        fn name(&self) -> &str {
            self.tag
        }
    }

    #[test]
    fn instantiate_returns_fresh_instances() {
        let catalog = StateCatalog::new().with_state("A", || Tagged::create("A"));

        let first = catalog.instantiate("A").unwrap();
        let second = catalog.instantiate("A").unwrap();

        assert_eq!(first.name(), "A");
        assert!(!Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn unknown_name_is_a_violation() {
        let catalog = StateCatalog::new();

        let error = catalog.instantiate("Missing").err();

        assert_eq!(
            error,
            Some(ContractViolation::UnknownState {
                name: "Missing".to_string()
            })
        );
    }

    #[test]
    fn register_replaces_existing_factory() {
        let mut catalog = StateCatalog::new();
        catalog.register("A", || Tagged::create("first"));
        catalog.register("A", || Tagged::create("second"));

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.instantiate("A").unwrap().name(), "second");
    }

    #[test]
    fn names_are_sorted() {
        let catalog = StateCatalog::new()
            .with_state("B", || Tagged::create("B"))
            .with_state("A", || Tagged::create("A"));

        assert_eq!(catalog.names(), vec!["A", "B"]);
        assert!(!catalog.is_empty());
        assert_eq!(format!("{:?}", catalog), "StateCatalog { states: [\"A\", \"B\"] }");
    }
}
