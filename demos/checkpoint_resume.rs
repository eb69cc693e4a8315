//! Checkpoint and Resume
//!
//! This example demonstrates saving a context and resuming it later.
//!
//! Key concepts:
//! - States are registered by name in a catalog
//! - A checkpoint stores state names and the transition log
//! - Resuming re-creates states from the catalog
//!
//! Run with: RUST_LOG=debug cargo run --example checkpoint_resume

use shifter::{
    CheckpointError, Context, ContextBuilder, ContextCheckpoint, ContextRef, ContractViolation,
    State, StateCatalog,
};
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

#[derive(Default)]
struct Draft {
    context: ContextRef,
}

#[derive(Default)]
struct Review {
    context: ContextRef,
}

#[derive(Default)]
struct Published {
    context: ContextRef,
}

impl State for Draft {
    fn handle(&self) -> Result<(), ContractViolation> {
        self.require_context()?.transition_to_named("Review")
    }

    fn context_ref(&self) -> &ContextRef {
        &self.context
    }
}

impl State for Review {
    fn handle(&self) -> Result<(), ContractViolation> {
        self.require_context()?.transition_to_named("Published")
    }

    fn context_ref(&self) -> &ContextRef {
        &self.context
    }
}

impl State for Published {
    fn handle(&self) -> Result<(), ContractViolation> {
        println!("  Published: nothing left to do");
        Ok(())
    }

    fn context_ref(&self) -> &ContextRef {
        &self.context
    }
}

fn catalog() -> Rc<StateCatalog> {
    Rc::new(
        StateCatalog::new()
            .with_state("Draft", || Rc::new(Draft::default()))
            .with_state("Review", || Rc::new(Review::default()))
            .with_state("Published", || Rc::new(Published::default())),
    )
}

fn main() -> Result<(), CheckpointError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Checkpoint and Resume Example ===\n");

    let document = ContextBuilder::new()
        .shared_catalog(catalog())
        .initial_named("Draft")
        .build()?;
    document.request()?;
    println!("Before checkpoint: {}", document.state().name());

    let json = document.checkpoint().to_json()?;
    println!("\nCheckpoint:\n{}\n", json);
    drop(document);

    let checkpoint = ContextCheckpoint::from_json(&json)?;
    let resumed = Context::resume(&checkpoint, catalog())?;
    println!("After resume: {}", resumed.state().name());

    resumed.request()?;
    resumed.request()?;
    println!("Final: {}", resumed.state().name());
    println!("Path: {}", resumed.history().path().join(" -> "));

    println!("\n=== Example Complete ===");
    Ok(())
}
