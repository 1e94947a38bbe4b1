use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::values::{Money, Multiplier, Timestamp};

/// Outcome of a settled round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundResult {
    Win,
    Loss,
}

impl RoundResult {
    pub fn is_win(&self) -> bool {
        matches!(self, RoundResult::Win)
    }
}

/// One settled round, immutable once appended to the ledger
///
/// `round_index` is the 0-based position in the multiplier sequence and the
/// ledger identity of the record - never reused or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub round_index: u64,
    /// Bet placed this round
    pub bet: Money,
    /// Cashout target the strategy aimed for
    pub cashout_target: Multiplier,
    /// Observed round outcome
    pub multiplier: Multiplier,
    pub result: RoundResult,
    /// `bet * (cashout_target - 1)` on a win, `-bet` on a loss
    pub profit: Money,
    pub balance_after: Money,
    pub loss_streak_after: u32,
    pub settled_at: Timestamp,
}

impl Settlement {
    /// Create a settlement record with an explicit timestamp
    #[allow(clippy::too_many_arguments)]
    pub fn new_with_time(
        round_index: u64,
        bet: Money,
        cashout_target: Multiplier,
        multiplier: Multiplier,
        result: RoundResult,
        profit: Money,
        balance_after: Money,
        loss_streak_after: u32,
        settled_at: Timestamp,
    ) -> Self {
        Self {
            round_index,
            bet,
            cashout_target,
            multiplier,
            result,
            profit,
            balance_after,
            loss_streak_after,
            settled_at,
        }
    }

    /// Create a settlement record stamped with the current system time
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        round_index: u64,
        bet: Money,
        cashout_target: Multiplier,
        multiplier: Multiplier,
        result: RoundResult,
        profit: Money,
        balance_after: Money,
        loss_streak_after: u32,
    ) -> Self {
        Self::new_with_time(
            round_index,
            bet,
            cashout_target,
            multiplier,
            result,
            profit,
            balance_after,
            loss_streak_after,
            Utc::now(),
        )
    }

    pub fn is_win(&self) -> bool {
        self.result.is_win()
    }
}
