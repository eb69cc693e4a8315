//! Property-based tests for contexts and transitions.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated transition sequences.

use proptest::prelude::*;
use shifter::catalog::StateCatalog;
use shifter::core::{Context, ContextRef, ContractViolation, State, StateHandle};
use shifter::{ContextBuilder, ContextCheckpoint, RecordingObserver};
use std::rc::Rc;

#[derive(Default)]
struct Alpha {
    context: ContextRef,
}

#[derive(Default)]
struct Beta {
    context: ContextRef,
}

#[derive(Default)]
struct Gamma {
    context: ContextRef,
}

macro_rules! passive_state {
    ($ty:ty) => {
        impl State for $ty {
            fn handle(&self) -> Result<(), ContractViolation> {
                Ok(())
            }

            fn context_ref(&self) -> &ContextRef {
                &self.context
            }
        }
    };
}

passive_state!(Alpha);
passive_state!(Beta);
passive_state!(Gamma);

const NAMES: [&str; 3] = ["Alpha", "Beta", "Gamma"];

fn make(kind: usize) -> StateHandle {
    match kind {
        0 => Rc::new(Alpha::default()),
        1 => Rc::new(Beta::default()),
        _ => Rc::new(Gamma::default()),
    }
}

fn catalog() -> Rc<StateCatalog> {
    Rc::new(
        StateCatalog::new()
            .with_state("Alpha", || make(0))
            .with_state("Beta", || make(1))
            .with_state("Gamma", || make(2)),
    )
}

prop_compose! {
    fn arbitrary_kind()(kind in 0..3usize) -> usize {
        kind
    }
}

proptest! {
    #[test]
    fn constructed_context_holds_initial_state(kind in arbitrary_kind()) {
        let initial = make(kind);
        let context = Context::new(initial.clone());

        prop_assert!(context.is_current(&initial));
        prop_assert!(initial.context().unwrap().ptr_eq(&context));
    }

    #[test]
    fn transition_installs_and_rewires(first in arbitrary_kind(), second in arbitrary_kind()) {
        let context = Context::new(make(first));
        let next = make(second);

        context.transition_to(next.clone());

        prop_assert!(context.is_current(&next));
        prop_assert!(next.context().unwrap().ptr_eq(&context));
        let previous = context.previous_state().unwrap();
        prop_assert_eq!(previous.name(), NAMES[first]);
    }

    #[test]
    fn history_follows_transition_sequence(
        kinds in prop::collection::vec(arbitrary_kind(), 1..12)
    ) {
        let observer = Rc::new(RecordingObserver::new());
        let context = ContextBuilder::new()
            .initial(make(kinds[0]))
            .observer(observer.clone())
            .build()
            .unwrap();

        for &kind in &kinds[1..] {
            context.transition_to(make(kind));
        }

        let expected: Vec<&str> = kinds.iter().map(|&k| NAMES[k]).collect();
        let history = context.history();
        prop_assert_eq!(history.path(), expected.clone());
        prop_assert_eq!(history.len(), kinds.len());
        prop_assert_eq!(observer.targets(), expected);
    }

    #[test]
    fn unknown_names_leave_context_unchanged(
        kind in arbitrary_kind(),
        name in "[a-z]{1,8}"
    ) {
        let initial = make(kind);
        let context = ContextBuilder::new()
            .shared_catalog(catalog())
            .initial(initial.clone())
            .build()
            .unwrap();

        let result = context.transition_to_named(&name);

        prop_assert_eq!(result, Err(ContractViolation::UnknownState { name }));
        prop_assert!(context.is_current(&initial));
        prop_assert_eq!(context.history().len(), 1);
    }

    #[test]
    fn checkpoint_resume_reproduces_context(
        kinds in prop::collection::vec(arbitrary_kind(), 1..8)
    ) {
        let context = ContextBuilder::new()
            .shared_catalog(catalog())
            .initial(make(kinds[0]))
            .build()
            .unwrap();
        for &kind in &kinds[1..] {
            context.transition_to_named(NAMES[kind]).unwrap();
        }

        let checkpoint = context.checkpoint();
        let from_json = ContextCheckpoint::from_json(&checkpoint.to_json().unwrap()).unwrap();
        let from_binary =
            ContextCheckpoint::from_binary(&checkpoint.to_binary().unwrap()).unwrap();

        for decoded in [from_json, from_binary] {
            let resumed = Context::resume(&decoded, catalog()).unwrap();

            prop_assert_eq!(resumed.id(), context.id());
            let (resumed_state, original_state) = (resumed.state(), context.state());
            prop_assert_eq!(resumed_state.name(), original_state.name());
            prop_assert_eq!(
                resumed.previous_state().map(|s| s.name().to_string()),
                context.previous_state().map(|s| s.name().to_string())
            );
            prop_assert_eq!(resumed.history(), context.history());
        }
    }

    #[test]
    fn states_never_keep_context_alive(kinds in prop::collection::vec(arbitrary_kind(), 1..6)) {
        let states: Vec<StateHandle> = kinds.iter().map(|&k| make(k)).collect();
        let context = Context::new(states[0].clone());
        for state in &states[1..] {
            context.transition_to(state.clone());
        }
        let weak = context.downgrade();

        drop(context);

        prop_assert!(!weak.is_alive());
        for state in &states {
            prop_assert!(state.context().is_none());
        }
    }
}
