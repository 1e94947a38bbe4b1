use crashsim_core::{
    Multiplier, RoundResult, Settlement, StrategyConfig, StrategyState, round_cashout,
};
use crashsim_ports::{EngineResult, EscalationPolicy};
use rust_decimal::Decimal;

use crate::outcome::settle_outcome;

/// Staged martingale escalation policy
///
/// After each loss while the streak is within `max_streak`:
/// 1. the bet grows by `bet_increment`
/// 2. the cashout target is recomputed from absolute configuration values:
///    `base_cashout + (streak / round_block) * cashout_increment`
///
/// Once the streak exceeds `max_streak` the bet freezes at its current value
/// and the target climbs by a flat `multiplier_increment_after_max` per
/// further loss, unbounded. Any win restores the baseline bet and target.
pub struct StagedMartingale;

impl StagedMartingale {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StagedMartingale {
    fn default() -> Self {
        Self::new()
    }
}

impl EscalationPolicy for StagedMartingale {
    fn name(&self) -> &str {
        "Staged Martingale"
    }

    fn settle(
        &self,
        config: &StrategyConfig,
        state: &StrategyState,
        round_index: u64,
        multiplier: Multiplier,
    ) -> EngineResult<(Settlement, StrategyState)> {
        let record = settle_outcome(state, round_index, multiplier)?;

        let next = match record.result {
            // Full reset to baseline regardless of how deep the streak was
            RoundResult::Win => StrategyState {
                balance: record.balance_after,
                ..config.baseline_state()
            },
            RoundResult::Loss => {
                let streak = record.loss_streak_after;
                let (next_bet, next_cashout) = if streak <= config.max_streak {
                    // Stage is derived from absolute config values each
                    // round, so it is idempotent for a given streak count
                    let stage = Decimal::from(streak / config.round_block);
                    (
                        state.current_bet + config.bet_increment,
                        config.base_cashout + stage * config.cashout_increment,
                    )
                } else {
                    // Cap exceeded: bet frozen, target climbs without bound
                    (
                        state.current_bet,
                        state.current_cashout + config.multiplier_increment_after_max,
                    )
                };
                StrategyState {
                    balance: record.balance_after,
                    current_bet: next_bet,
                    current_cashout: round_cashout(next_cashout),
                    loss_streak: streak,
                }
            }
        };

        Ok((record, next))
    }
}
