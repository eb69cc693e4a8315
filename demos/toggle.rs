//! Toggle
//!
//! This example demonstrates the State pattern with two states that hand
//! control back and forth.
//!
//! Key concepts:
//! - States hold a weak back-reference to their context
//! - A handler requests the next state through that back-reference
//! - Transitions are reported through `tracing`
//!
//! Run with: RUST_LOG=info cargo run --example toggle

use shifter::{Context, ContextRef, ContractViolation, State};
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

#[derive(Default)]
struct Locked {
    context: ContextRef,
}

#[derive(Default)]
struct Unlocked {
    context: ContextRef,
}

impl State for Locked {
    fn handle(&self) -> Result<(), ContractViolation> {
        println!("  Locked: accepting coin, unlocking");
        self.require_context()?.transition_to(Rc::new(Unlocked::default()));
        Ok(())
    }

    fn context_ref(&self) -> &ContextRef {
        &self.context
    }
}

impl State for Unlocked {
    fn handle(&self) -> Result<(), ContractViolation> {
        println!("  Unlocked: letting one through, locking");
        self.require_context()?.transition_to(Rc::new(Locked::default()));
        Ok(())
    }

    fn context_ref(&self) -> &ContextRef {
        &self.context
    }
}

fn main() -> Result<(), ContractViolation> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Toggle Example ===\n");

    let turnstile = Context::new(Rc::new(Locked::default()));

    for round in 1..=4 {
        println!("Request {}:", round);
        turnstile.request()?;
        println!("  now {}", turnstile.state().name());
    }

    println!("\nPath: {}", turnstile.history().path().join(" -> "));
    println!("\n=== Example Complete ===");
    Ok(())
}
