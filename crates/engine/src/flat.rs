use crashsim_core::{Multiplier, Settlement, StrategyConfig, StrategyState};
use crashsim_ports::{EngineResult, EscalationPolicy};

use crate::outcome::settle_outcome;

/// Flat betting policy: always `base_bet` at `base_cashout`
///
/// No escalation in either regime. Useful as a baseline when comparing a
/// staged run against the same multiplier sequence; the loss streak is still
/// tracked so ledgers stay comparable.
pub struct FlatBet;

impl FlatBet {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FlatBet {
    fn default() -> Self {
        Self::new()
    }
}

impl EscalationPolicy for FlatBet {
    fn name(&self) -> &str {
        "Flat Bet"
    }

    fn settle(
        &self,
        config: &StrategyConfig,
        state: &StrategyState,
        round_index: u64,
        multiplier: Multiplier,
    ) -> EngineResult<(Settlement, StrategyState)> {
        let record = settle_outcome(state, round_index, multiplier)?;
        let next = StrategyState {
            balance: record.balance_after,
            loss_streak: record.loss_streak_after,
            ..config.baseline_state()
        };
        Ok((record, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crashsim_core::RoundResult;
    use rust_decimal_macros::dec;

    #[test]
    fn test_flat_bet_never_escalates() {
        let config = StrategyConfig::default();
        let policy = FlatBet::new();
        let mut state = config.baseline_state();

        for i in 0..5 {
            let (record, next) = policy.settle(&config, &state, i, dec!(1.0)).unwrap();
            assert_eq!(record.result, RoundResult::Loss);
            assert_eq!(record.bet, config.base_bet);
            assert_eq!(next.current_bet, config.base_bet);
            assert_eq!(next.current_cashout, config.base_cashout);
            assert_eq!(next.loss_streak, (i + 1) as u32);
            state = next;
        }

        let (record, next) = policy.settle(&config, &state, 5, dec!(2.0)).unwrap();
        assert_eq!(record.result, RoundResult::Win);
        assert_eq!(record.profit, config.base_bet * (config.base_cashout - dec!(1)));
        assert_eq!(next.loss_streak, 0);
    }
}
