//! Crashsim Core Domain
//!
//! Pure domain types for the crash-game strategy simulator.
//! This crate contains no async, no I/O, and is 100% unit testable.

mod config;
mod settlement;
mod state;
mod values;

// Re-export commonly used types at crate root
pub use config::{ConfigError, StrategyConfig};
pub use settlement::{RoundResult, Settlement};
pub use state::StrategyState;
pub use values::{CASHOUT_SCALE, Money, Multiplier, Timestamp, round_cashout};
