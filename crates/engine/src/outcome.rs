//! Round outcome arithmetic shared by all policies
//!
//! Winning and losing a round is policy-independent; only the derivation of
//! the next bet and cashout target differs between policies.

use crashsim_core::{Multiplier, RoundResult, Settlement, StrategyState};
use crashsim_ports::{EngineError, EngineResult};
use rust_decimal::Decimal;

/// Settle the observed multiplier against the current state
///
/// Profit is `bet * (target - 1)` on a win and `-bet` on a loss; the balance
/// in the record already includes it. `loss_streak_after` is 0 on a win and
/// exactly `loss_streak + 1` on a loss.
pub(crate) fn settle_outcome(
    state: &StrategyState,
    round_index: u64,
    multiplier: Multiplier,
) -> EngineResult<Settlement> {
    if multiplier <= Decimal::ZERO {
        return Err(EngineError::InvalidMultiplier(multiplier));
    }

    let (result, profit) = if multiplier >= state.current_cashout {
        (
            RoundResult::Win,
            state.current_bet * (state.current_cashout - Decimal::ONE),
        )
    } else {
        (RoundResult::Loss, -state.current_bet)
    };

    Ok(Settlement::new(
        round_index,
        state.current_bet,
        state.current_cashout,
        multiplier,
        result,
        profit,
        state.balance + profit,
        match result {
            RoundResult::Win => 0,
            RoundResult::Loss => state.loss_streak + 1,
        },
    ))
}
