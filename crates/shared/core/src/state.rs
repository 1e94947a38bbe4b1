use serde::{Deserialize, Serialize};

use crate::values::{Money, Multiplier};

/// Running strategy state, overwritten in full on every round advance
///
/// Invariants while the state is used to settle rounds:
/// - `current_bet > 0`
/// - `current_cashout > 1`
/// - `loss_streak` resets to 0 exactly on a win and increments by 1 per loss
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyState {
    /// Current balance
    pub balance: Money,
    /// Bet that will be placed on the next round
    pub current_bet: Money,
    /// Cashout target for the next round, kept at 2 decimal places
    pub current_cashout: Multiplier,
    /// Consecutive losses since the last win
    pub loss_streak: u32,
}
