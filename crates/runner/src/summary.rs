use std::fmt;

use crashsim_core::{Money, Settlement};
use rust_decimal::Decimal;
use serde::Serialize;

/// Aggregates over a completed (or paused) run's ledger
///
/// Carries the figures the presentation layer renders next to the state
/// snapshot: total profit, win rate, and the risk-side extremes.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub rounds: usize,
    pub wins: usize,
    pub losses: usize,
    /// Percentage of rounds won; `None` before any round settles
    pub win_rate: Option<f64>,
    pub total_profit: Money,
    pub final_balance: Money,
    pub peak_balance: Money,
    pub trough_balance: Money,
    pub longest_loss_streak: u32,
}

impl RunSummary {
    pub fn from_ledger(initial_balance: Money, ledger: &[Settlement]) -> Self {
        let rounds = ledger.len();
        let wins = ledger.iter().filter(|r| r.is_win()).count();
        let total_profit: Decimal = ledger.iter().map(|r| r.profit).sum();
        let final_balance = ledger
            .last()
            .map_or(initial_balance, |r| r.balance_after);
        let peak_balance = ledger
            .iter()
            .map(|r| r.balance_after)
            .fold(initial_balance, Decimal::max);
        let trough_balance = ledger
            .iter()
            .map(|r| r.balance_after)
            .fold(initial_balance, Decimal::min);
        let longest_loss_streak = ledger
            .iter()
            .map(|r| r.loss_streak_after)
            .max()
            .unwrap_or(0);

        Self {
            rounds,
            wins,
            losses: rounds - wins,
            win_rate: (rounds > 0).then(|| wins as f64 / rounds as f64 * 100.0),
            total_profit,
            final_balance,
            peak_balance,
            trough_balance,
            longest_loss_streak,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let win_rate = match self.win_rate {
            Some(rate) => format!("{rate:.1}%"),
            None => "n/a".to_string(),
        };
        write!(
            f,
            "{} rounds ({} wins / {} losses, win rate {}), profit {}, \
             balance {} (peak {}, trough {}), longest loss streak {}",
            self.rounds,
            self.wins,
            self.losses,
            win_rate,
            self.total_profit,
            self.final_balance,
            self.peak_balance,
            self.trough_balance,
            self.longest_loss_streak
        )
    }
}
