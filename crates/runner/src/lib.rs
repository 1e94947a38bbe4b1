//! Crashsim Runner
//!
//! Orchestration around the simulation driver:
//! - `SimulationRunner`: batch replay and tokio-paced stepping, with
//!   optional live-sync polling of a `MultiplierSource`
//! - `CrashFeedSimulator`: seeded random crash-round generator
//! - `RunSummary`: ledger aggregates (win rate, total profit, drawdown)
//!
//! The driver stays single-threaded and step-driven; everything about
//! *when* a step happens lives here.

mod feed_sim;
mod runner;
mod summary;

pub use feed_sim::CrashFeedSimulator;
pub use runner::SimulationRunner;
pub use summary::RunSummary;
