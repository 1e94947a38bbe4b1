use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::StrategyState;
use crate::values::{Money, Multiplier, round_cashout};

/// Configuration rejected at construction time
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Base bet must be positive, got {0}")]
    NonPositiveBaseBet(Decimal),

    #[error("Base cashout must exceed 1.0, got {0}")]
    BaseCashoutTooLow(Decimal),

    #[error("{field} must not be negative, got {value}")]
    NegativeIncrement { field: &'static str, value: Decimal },

    #[error("Round block must be positive")]
    ZeroRoundBlock,
}

/// Strategy configuration, immutable for the duration of a run
///
/// The first eight fields define settlement behavior; the pacing fields
/// (`simulation_speed_ms`, `live_sync`, `sync_interval_secs`) only drive the
/// external scheduler and have no bearing on settlement correctness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Starting balance
    pub initial_balance: Money,
    /// Bet size restored after every win
    pub base_bet: Money,
    /// Added to the bet on each loss while the streak is within the cap
    pub bet_increment: Money,
    /// Loss-streak count beyond which the bet stops increasing
    pub max_streak: u32,
    /// Consecutive losses per escalation stage
    pub round_block: u32,
    /// Cashout target restored after every win
    pub base_cashout: Multiplier,
    /// Added to the cashout target per completed stage within the cap
    pub cashout_increment: Multiplier,
    /// Added to the cashout target per loss once the cap is exceeded
    pub multiplier_increment_after_max: Multiplier,
    /// Delay between paced rounds, in milliseconds
    #[serde(default = "default_speed_ms")]
    pub simulation_speed_ms: u64,
    /// Whether the runner polls the multiplier source while running
    #[serde(default)]
    pub live_sync: bool,
    /// Source polling interval, in seconds
    #[serde(default = "default_sync_secs")]
    pub sync_interval_secs: u64,
}

fn default_speed_ms() -> u64 {
    500
}

fn default_sync_secs() -> u64 {
    30
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            initial_balance: dec!(1000),
            base_bet: dec!(10),
            bet_increment: dec!(1),
            max_streak: 30,
            round_block: 5,
            base_cashout: dec!(1.3),
            cashout_increment: dec!(0.2),
            multiplier_increment_after_max: dec!(0.05),
            simulation_speed_ms: default_speed_ms(),
            live_sync: false,
            sync_interval_secs: default_sync_secs(),
        }
    }
}

impl StrategyConfig {
    /// Validate the settlement parameters
    ///
    /// Called by the driver at construction and on every config replacement,
    /// so invalid parameters never reach a running simulation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_bet <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveBaseBet(self.base_bet));
        }
        if self.base_cashout <= Decimal::ONE {
            return Err(ConfigError::BaseCashoutTooLow(self.base_cashout));
        }
        for (field, value) in [
            ("Bet increment", self.bet_increment),
            ("Cashout increment", self.cashout_increment),
            (
                "Multiplier increment after max",
                self.multiplier_increment_after_max,
            ),
        ] {
            if value < Decimal::ZERO {
                return Err(ConfigError::NegativeIncrement { field, value });
            }
        }
        if self.round_block == 0 {
            return Err(ConfigError::ZeroRoundBlock);
        }
        Ok(())
    }

    /// The strategy state a fresh (or reset) run starts from
    pub fn baseline_state(&self) -> StrategyState {
        StrategyState {
            balance: self.initial_balance,
            current_bet: self.base_bet,
            current_cashout: round_cashout(self.base_cashout),
            loss_streak: 0,
        }
    }

    /// Whether replacing `self` with `other` invalidates an existing run
    ///
    /// Edits to the baseline parameters (initial balance, base bet, base
    /// cashout) force a reset; pacing and escalation-increment edits do not.
    pub fn baseline_differs(&self, other: &Self) -> bool {
        self.initial_balance != other.initial_balance
            || self.base_bet != other.base_bet
            || self.base_cashout != other.base_cashout
    }
}
