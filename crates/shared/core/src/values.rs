use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// Monetary value (balance, bet, profit) - uses Decimal for precision
/// Future: could become a newtype with validation (finite range, currency)
pub type Money = Decimal;

/// Round outcome or cashout target multiplier - uses Decimal for precision
pub type Multiplier = Decimal;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Decimal places kept on the cashout target after every update
pub const CASHOUT_SCALE: u32 = 2;

/// Quantize a cashout target to 2 decimal places, half-up.
///
/// Applied after every state update. Note this is a cumulative quantization
/// over long loss streaks with fractional increments.
pub fn round_cashout(target: Multiplier) -> Multiplier {
    target.round_dp_with_strategy(CASHOUT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_cashout_half_up() {
        assert_eq!(round_cashout(dec!(1.305)), dec!(1.31));
        assert_eq!(round_cashout(dec!(1.304)), dec!(1.30));
        assert_eq!(round_cashout(dec!(1.3)), dec!(1.30));
    }

    #[test]
    fn test_round_cashout_is_idempotent() {
        let once = round_cashout(dec!(2.4567));
        assert_eq!(round_cashout(once), once);
    }
}
