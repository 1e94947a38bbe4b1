//! Crashsim Driver
//!
//! The simulation driver owns the authoritative run state: configuration,
//! strategy state, append-only ledger, multiplier sequence, and cursor. It
//! advances one round at a time through an `EscalationPolicy` and is the
//! only component allowed to mutate state; pacing is the caller's concern.

mod error;
mod simulation;

pub use error::{DriverError, Result};
pub use simulation::{Phase, SimulationDriver, StepOutcome};
