//! The State trait and the back-reference slot states carry.
//!
//! A state is one behavioural mode of a [`Context`]. The context owns its
//! states; a state only holds a weak back-reference to the context, which
//! it uses to request transitions from inside [`State::handle`].

use super::context::{Context, WeakContext};
use super::error::ContractViolation;
use std::cell::RefCell;
use std::fmt;

/// Non-owning back-reference from a state to the context it is installed in.
///
/// Every state embeds one of these and returns it from
/// [`State::context_ref`]. The slot is empty until the state is installed
/// for the first time; installing it into another context overwrites it.
#[derive(Default)]
pub struct ContextRef {
    slot: RefCell<Option<WeakContext>>,
}

impl ContextRef {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// The owning context, if the state was installed and the context
    /// is still alive.
    pub fn get(&self) -> Option<Context> {
        self.slot.borrow().as_ref().and_then(WeakContext::upgrade)
    }

    /// Point the slot at `context`.
    ///
    /// Fails with [`ContractViolation::ContextDropped`] when the handle no
    /// longer refers to a live context. The slot is left untouched then.
    pub fn set(&self, context: &WeakContext) -> Result<(), ContractViolation> {
        if !context.is_alive() {
            return Err(ContractViolation::ContextDropped);
        }
        self.bind(context.clone());
        Ok(())
    }

    /// Whether the state has ever been installed.
    pub fn is_bound(&self) -> bool {
        self.slot.borrow().is_some()
    }

    pub(crate) fn bind(&self, context: WeakContext) {
        *self.slot.borrow_mut() = Some(context);
    }
}

impl fmt::Debug for ContextRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(context) => f
                .debug_tuple("ContextRef")
                .field(&context.id().to_string())
                .finish(),
            None if self.is_bound() => f.write_str("ContextRef(<dropped>)"),
            None => f.write_str("ContextRef(<unbound>)"),
        }
    }
}

/// Trait for the behavioural modes of a [`Context`].
///
/// Implementors supply [`handle`](State::handle) and expose the
/// [`ContextRef`] they embed. Everything else has a default.
///
/// # Example
///
/// ```rust
/// use shifter::core::{Context, ContextRef, ContractViolation, State};
/// use std::rc::Rc;
///
/// #[derive(Default)]
/// struct Idle {
///     context: ContextRef,
/// }
///
/// #[derive(Default)]
/// struct Busy {
///     context: ContextRef,
/// }
///
/// impl State for Idle {
///     fn handle(&self) -> Result<(), ContractViolation> {
///         self.require_context()?.transition_to(Rc::new(Busy::default()));
///         Ok(())
///     }
///
///     fn context_ref(&self) -> &ContextRef {
///         &self.context
///     }
/// }
///
/// impl State for Busy {
///     fn handle(&self) -> Result<(), ContractViolation> {
///         self.require_context()?.transition_to(Rc::new(Idle::default()));
///         Ok(())
///     }
///
///     fn context_ref(&self) -> &ContextRef {
///         &self.context
///     }
/// }
///
/// let context = Context::new(Rc::new(Idle::default()));
/// context.request().unwrap();
/// assert_eq!(context.state().name(), "Busy");
/// ```
pub trait State {
    /// Run this state's behaviour.
    ///
    /// Handlers typically perform some action and then call
    /// [`Context::transition_to`] on their owning context.
    fn handle(&self) -> Result<(), ContractViolation>;

    /// The back-reference slot embedded in this state.
    fn context_ref(&self) -> &ContextRef;

    /// Name used in transition records, logs and checkpoints.
    ///
    /// Defaults to the last path segment of the type name, with generic
    /// arguments stripped.
    fn name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// The context this state is installed in, if it is still alive.
    fn context(&self) -> Option<Context> {
        self.context_ref().get()
    }

    /// Rewire the back-reference to `context`.
    fn set_context(&self, context: &WeakContext) -> Result<(), ContractViolation> {
        self.context_ref().set(context)
    }

    /// The owning context, or the reason there is none.
    fn require_context(&self) -> Result<Context, ContractViolation> {
        let slot = self.context_ref();
        if !slot.is_bound() {
            return Err(ContractViolation::Unbound {
                state: self.name().to_string(),
            });
        }
        slot.get().ok_or(ContractViolation::ContextDropped)
    }
}

fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
