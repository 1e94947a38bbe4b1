use crashsim_core::{Multiplier, Settlement, StrategyConfig, StrategyState};

use crate::error::EngineResult;

/// Port for bet/cashout escalation policies
///
/// A policy is a pure transition function: given the configuration, the
/// current strategy state, and the next observed multiplier, it produces the
/// settlement record for the round and the state to carry into the next one.
/// Implementations must be deterministic and side-effect free; the driver is
/// the only component that mutates state.
pub trait EscalationPolicy: Send {
    /// Policy name for logging
    fn name(&self) -> &str;

    /// Settle one round
    ///
    /// `round_index` is the 0-based position of `multiplier` in the sequence
    /// and becomes the ledger identity of the record. Implementations reject
    /// non-positive multipliers rather than propagating them into the state.
    fn settle(
        &self,
        config: &StrategyConfig,
        state: &StrategyState,
        round_index: u64,
        multiplier: Multiplier,
    ) -> EngineResult<(Settlement, StrategyState)>;
}

impl<T: EscalationPolicy + ?Sized> EscalationPolicy for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn settle(
        &self,
        config: &StrategyConfig,
        state: &StrategyState,
        round_index: u64,
        multiplier: Multiplier,
    ) -> EngineResult<(Settlement, StrategyState)> {
        (**self).settle(config, state, round_index, multiplier)
    }
}
