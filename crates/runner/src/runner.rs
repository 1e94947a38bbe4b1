//! Simulation runner - decides *when* the driver steps
//!
//! The driver exposes a single atomic step; this wraps it with the two
//! schedules the system needs:
//! - `run_to_completion`: batch replay, as fast as the ledger can grow
//! - `run_paced`: one round per tokio interval tick, with optional
//!   live-sync polling of a `MultiplierSource` between steps

use crashsim_driver::{Result, SimulationDriver, StepOutcome};
use crashsim_feed::filter_rows;
use crashsim_ports::{EscalationPolicy, MultiplierSource};
use log::{info, warn};
use tokio::time::{Duration, Instant, interval};

use crate::summary::RunSummary;

/// Drives a simulation over its multiplier sequence
pub struct SimulationRunner<P: EscalationPolicy> {
    driver: SimulationDriver<P>,
    source: Option<Box<dyn MultiplierSource>>,
    /// Snapshot rows already ingested from the source
    ingested_rows: usize,
}

impl<P: EscalationPolicy> SimulationRunner<P> {
    pub fn new(driver: SimulationDriver<P>) -> Self {
        Self {
            driver,
            source: None,
            ingested_rows: 0,
        }
    }

    /// Attach a live multiplier source polled during paced runs
    pub fn with_source(mut self, source: Box<dyn MultiplierSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn driver(&self) -> &SimulationDriver<P> {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut SimulationDriver<P> {
        &mut self.driver
    }

    /// Poll the source once and append any rows beyond what was already seen
    ///
    /// Snapshots are reconciled append-only: a shorter snapshot than before
    /// is logged and ignored, never truncated into the consumed sequence.
    /// Source failures are recoverable; they leave the run untouched.
    pub async fn sync_from_source(&mut self) -> usize {
        let Some(source) = self.source.as_mut() else {
            return 0;
        };
        let rows = match source.fetch_rows().await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Sync from {} failed: {}", source.name(), e);
                return 0;
            }
        };
        if rows.len() < self.ingested_rows {
            warn!(
                "{} snapshot shrank from {} to {} rows; ignoring",
                source.name(),
                self.ingested_rows,
                rows.len()
            );
            return 0;
        }

        let fresh = filter_rows(&rows[self.ingested_rows..]);
        self.ingested_rows = rows.len();
        let appended = self.driver.append_multipliers(fresh);
        if appended > 0 {
            info!("Synced {} new multipliers from {}", appended, source.name());
        }
        appended
    }

    /// Replay everything currently loaded (plus whatever the source yields)
    /// without pacing, then stop
    pub async fn run_to_completion(&mut self) -> Result<RunSummary> {
        if self.driver.remaining() == 0 && self.source.is_some() {
            self.sync_from_source().await;
        }
        self.driver.start()?;
        loop {
            match self.driver.advance_one_round()? {
                StepOutcome::Settled(_) => {}
                StepOutcome::AwaitingData => {
                    if self.sync_from_source().await == 0 {
                        break;
                    }
                }
                StepOutcome::Inactive => break,
            }
        }
        self.finish()
    }

    /// Step once per interval tick, syncing the source on its own cadence
    /// while `live_sync` is set
    ///
    /// Ends when the sequence is exhausted and a final sync yields nothing
    /// new. Cancelling the future between ticks leaves the driver stopped at
    /// a round boundary, never mid-step.
    pub async fn run_paced(&mut self) -> Result<RunSummary> {
        let (live_sync, sync_interval_secs, speed_ms) = {
            let config = self.driver.config();
            (
                config.live_sync,
                config.sync_interval_secs,
                config.simulation_speed_ms,
            )
        };
        let live_sync = live_sync && self.source.is_some();
        let sync_every = Duration::from_secs(sync_interval_secs.max(1));
        let mut ticker = interval(Duration::from_millis(speed_ms.max(1)));
        let mut last_sync = Instant::now();

        if self.driver.remaining() == 0 && self.source.is_some() {
            self.sync_from_source().await;
            last_sync = Instant::now();
        }
        self.driver.start()?;

        loop {
            ticker.tick().await;

            if live_sync && last_sync.elapsed() >= sync_every {
                self.sync_from_source().await;
                last_sync = Instant::now();
            }

            match self.driver.advance_one_round()? {
                StepOutcome::Settled(_) => {}
                StepOutcome::AwaitingData => {
                    if self.sync_from_source().await == 0 {
                        break;
                    }
                    last_sync = Instant::now();
                }
                StepOutcome::Inactive => break,
            }
        }
        self.finish()
    }

    fn finish(&mut self) -> Result<RunSummary> {
        self.driver.stop();
        let summary = RunSummary::from_ledger(
            self.driver.config().initial_balance,
            self.driver.ledger(),
        );
        info!("[{}] Run finished: {}", self.driver.run_id(), summary);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crashsim_core::StrategyConfig;
    use crashsim_engine::StagedMartingale;
    use crashsim_feed::StaticSource;
    use rust_decimal_macros::dec;

    fn runner(multipliers: &[crashsim_core::Multiplier]) -> SimulationRunner<StagedMartingale> {
        let mut driver =
            SimulationDriver::new(StrategyConfig::default(), StagedMartingale::new()).unwrap();
        driver.append_multipliers(multipliers.iter().copied());
        SimulationRunner::new(driver)
    }

    #[tokio::test]
    async fn test_run_to_completion_settles_all_rounds() {
        let mut runner = runner(&[dec!(1.5), dec!(1.0), dec!(2.1), dec!(1.0)]);
        let summary = runner.run_to_completion().await.unwrap();

        assert_eq!(summary.rounds, 4);
        assert_eq!(summary.wins, 2);
        assert_eq!(runner.driver().ledger().len(), 4);
    }

    #[tokio::test]
    async fn test_completion_drains_attached_source() {
        let driver =
            SimulationDriver::new(StrategyConfig::default(), StagedMartingale::new()).unwrap();
        let source = StaticSource::from_text("1.5\nbad row\n2.0\n0\n1.1");
        let mut runner = SimulationRunner::new(driver).with_source(Box::new(source));

        let summary = runner.run_to_completion().await.unwrap();
        // 5 snapshot rows, 3 valid multipliers
        assert_eq!(summary.rounds, 3);
    }

    #[tokio::test]
    async fn test_source_rows_are_never_ingested_twice() {
        let driver =
            SimulationDriver::new(StrategyConfig::default(), StagedMartingale::new()).unwrap();
        let source = StaticSource::from_text("1.5\n2.0");
        let mut runner = SimulationRunner::new(driver).with_source(Box::new(source));

        runner.run_to_completion().await.unwrap();
        assert_eq!(runner.driver().ledger().len(), 2);

        // Second completion resyncs the identical snapshot: nothing new
        let summary = runner.run_to_completion().await.unwrap();
        assert_eq!(summary.rounds, 2);
        assert_eq!(runner.driver().cursor(), 2);
    }
}
