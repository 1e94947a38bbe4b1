//! Crashsim Engine
//!
//! Pure settlement policies implementing the `EscalationPolicy` port:
//! - `StagedMartingale`: staged bet/cashout escalation with a loss-streak
//!   cap, after which the bet freezes and the cashout target climbs
//! - `FlatBet`: constant bet and target, a baseline for comparison runs
//!
//! Policies never mutate anything; they map `(config, state, multiplier)`
//! to `(settlement record, next state)` and the driver owns the rest.

mod flat;
mod outcome;
mod staged;

pub use flat::FlatBet;
pub use staged::StagedMartingale;
