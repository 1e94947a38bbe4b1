//! Crash Feed Simulator - synthetic round source for offline runs
//!
//! Generates crash-game multipliers with a 1% house edge:
//! `m = 0.99 / (1 - u)` for uniform `u`, floored at 1.00 and truncated to
//! 2 decimal places, so about 1% of rounds crash instantly at 1.00 and the
//! tail is unbounded. Seedable for reproducible simulations.

use async_trait::async_trait;
use crashsim_core::Multiplier;
use crashsim_ports::{MultiplierSource, SourceResult};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rust_decimal::{Decimal, RoundingStrategy};
use tokio::sync::broadcast;

/// House-edge factor applied to the crash distribution
const HOUSE_EDGE_FACTOR: f64 = 0.99;

/// Generates simulated crash rounds
pub struct CrashFeedSimulator {
    rng: StdRng,
    /// Every multiplier generated so far, oldest first
    history: Vec<Multiplier>,
    /// Rounds revealed per source poll
    rounds_per_poll: usize,
    /// Stop generating once history reaches this size (None = unbounded)
    max_rounds: Option<usize>,
    /// Round broadcaster
    event_tx: broadcast::Sender<Multiplier>,
}

impl CrashFeedSimulator {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create with a specific seed for reproducible simulations
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        let (event_tx, _) = broadcast::channel(1000);
        Self {
            rng,
            history: Vec::new(),
            rounds_per_poll: 1,
            max_rounds: None,
            event_tx,
        }
    }

    /// Rounds revealed per `fetch_rows` poll (default 1)
    pub fn rounds_per_poll(mut self, rounds: usize) -> Self {
        self.rounds_per_poll = rounds;
        self
    }

    /// Cap the total number of rounds the feed will ever produce
    pub fn max_rounds(mut self, max: usize) -> Self {
        self.max_rounds = Some(max);
        self
    }

    /// Subscribe to generated rounds
    pub fn subscribe(&self) -> broadcast::Receiver<Multiplier> {
        self.event_tx.subscribe()
    }

    pub fn history(&self) -> &[Multiplier] {
        &self.history
    }

    /// Draw the next multiplier from the crash distribution
    fn next_multiplier(&mut self) -> Multiplier {
        let u: f64 = self.rng.gen_range(0.0..1.0);
        let raw = HOUSE_EDGE_FACTOR / (1.0 - u);
        Decimal::from_f64_retain(raw)
            .unwrap_or(Decimal::ONE)
            .round_dp_with_strategy(2, RoundingStrategy::ToZero)
            .max(Decimal::ONE)
    }

    /// Generate one round, record it, and broadcast it
    ///
    /// Returns None once the configured round cap is reached.
    pub fn tick(&mut self) -> Option<Multiplier> {
        if let Some(max) = self.max_rounds {
            if self.history.len() >= max {
                return None;
            }
        }
        let multiplier = self.next_multiplier();
        self.history.push(multiplier);
        // Ignore send error (no subscribers is ok)
        let _ = self.event_tx.send(multiplier);
        Some(multiplier)
    }

    /// Generate up to `n` rounds at once
    pub fn generate(&mut self, n: usize) -> &[Multiplier] {
        let start = self.history.len();
        for _ in 0..n {
            if self.tick().is_none() {
                break;
            }
        }
        &self.history[start..]
    }

    /// Run continuously at a fixed cadence until the cap (if any) is hit
    pub async fn run(&mut self, interval_ms: u64) {
        loop {
            if self.tick().is_none() {
                return;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(interval_ms)).await;
        }
    }
}

impl Default for CrashFeedSimulator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MultiplierSource for CrashFeedSimulator {
    fn name(&self) -> &str {
        "crash-feed-sim"
    }

    /// Reveal the rounds played since the last poll, then snapshot
    ///
    /// Models polling a live sheet: each fetch observes a grown (never
    /// shrunk) history.
    async fn fetch_rows(&mut self) -> SourceResult<Vec<String>> {
        self.generate(self.rounds_per_poll);
        Ok(self.history.iter().map(|m| m.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_multipliers_are_at_least_one() {
        let mut feed = CrashFeedSimulator::with_seed(42);
        for m in feed.generate(1000).to_vec() {
            assert!(m >= dec!(1.00), "generated {m}");
            assert!(m.scale() <= 2, "more than 2 dp: {m}");
        }
    }

    #[test]
    fn test_seeded_feed_is_reproducible() {
        let mut a = CrashFeedSimulator::with_seed(7);
        let mut b = CrashFeedSimulator::with_seed(7);
        assert_eq!(a.generate(50).to_vec(), b.generate(50).to_vec());

        let mut c = CrashFeedSimulator::with_seed(8);
        assert_ne!(a.history(), c.generate(50));
    }

    #[test]
    fn test_round_cap_stops_generation() {
        let mut feed = CrashFeedSimulator::with_seed(1).max_rounds(5);
        assert_eq!(feed.generate(10).len(), 5);
        assert_eq!(feed.tick(), None);
        assert_eq!(feed.history().len(), 5);
    }

    #[tokio::test]
    async fn test_polling_reveals_history_append_only() {
        let mut feed = CrashFeedSimulator::with_seed(3).rounds_per_poll(2);
        let first = feed.fetch_rows().await.unwrap();
        let second = feed.fetch_rows().await.unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 4);
        assert_eq!(&second[..2], &first[..]);
    }
}
