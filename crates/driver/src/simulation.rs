use crashsim_core::{Multiplier, Settlement, StrategyConfig, StrategyState};
use crashsim_ports::EscalationPolicy;
use log::{debug, info, warn};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{DriverError, Result};

/// Driver lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No run in progress; state sits at the configuration baseline
    Idle,
    /// Steps settle rounds when the caller invokes `advance_one_round`
    Running,
    /// Paused; `start` resumes exactly where the run left off
    Stopped,
}

/// Result of a single `advance_one_round` call
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// A round was settled and appended to the ledger
    Settled(Settlement),
    /// Cursor has caught up with the sequence; waiting for live appends
    AwaitingData,
    /// Driver is not running; the step was a no-op
    Inactive,
}

/// Owns and sequences one simulation run
///
/// The driver is single-threaded and step-driven: each `advance_one_round`
/// settles exactly one round atomically (record appended and state replaced
/// together). The multiplier sequence may grow between steps via
/// `append_multipliers`; consumed entries are never truncated or rewritten,
/// and no index is ever settled twice.
pub struct SimulationDriver<P: EscalationPolicy> {
    config: StrategyConfig,
    policy: P,
    state: StrategyState,
    ledger: Vec<Settlement>,
    multipliers: Vec<Multiplier>,
    cursor: usize,
    phase: Phase,
    run_id: Uuid,
}

impl<P: EscalationPolicy> SimulationDriver<P> {
    /// Create a driver with a validated configuration
    pub fn new(config: StrategyConfig, policy: P) -> Result<Self> {
        config.validate()?;
        let state = config.baseline_state();
        Ok(Self {
            config,
            policy,
            state,
            ledger: Vec::new(),
            multipliers: Vec::new(),
            cursor: 0,
            phase: Phase::Idle,
            run_id: Uuid::new_v4(),
        })
    }

    /// Append multipliers to the sequence, discarding non-positive values
    ///
    /// Legal in any phase - a live source may grow the sequence mid-run.
    /// Returns how many values were accepted.
    pub fn append_multipliers<I>(&mut self, multipliers: I) -> usize
    where
        I: IntoIterator<Item = Multiplier>,
    {
        let before = self.multipliers.len();
        self.multipliers
            .extend(multipliers.into_iter().filter(|m| *m > Decimal::ZERO));
        let accepted = self.multipliers.len() - before;
        if accepted > 0 {
            debug!(
                "[{}] Appended {} multipliers ({} total)",
                self.run_id,
                accepted,
                self.multipliers.len()
            );
        }
        accepted
    }

    /// Begin or resume the run
    ///
    /// A fresh run (empty ledger or cursor at 0) re-baselines state and
    /// clears the ledger; otherwise the existing cursor and state are kept
    /// so a stopped run continues where it left off.
    pub fn start(&mut self) -> Result<()> {
        if self.multipliers.is_empty() {
            return Err(DriverError::EmptySequence);
        }
        if self.phase == Phase::Running {
            return Ok(());
        }
        if self.ledger.is_empty() || self.cursor == 0 {
            self.ledger.clear();
            self.cursor = 0;
            self.state = self.config.baseline_state();
            info!(
                "[{}] Starting fresh run with {} ({} multipliers)",
                self.run_id,
                self.policy.name(),
                self.multipliers.len()
            );
        } else {
            info!(
                "[{}] Resuming at round {} of {}",
                self.run_id,
                self.cursor,
                self.multipliers.len()
            );
        }
        self.phase = Phase::Running;
        Ok(())
    }

    /// Settle the round at the cursor, if there is one
    ///
    /// Atomic: on `Settled` the record has been appended, the state replaced,
    /// and the cursor advanced, all together. A cursor at the end of the
    /// sequence is not an error - it is the waiting-for-data condition.
    pub fn advance_one_round(&mut self) -> Result<StepOutcome> {
        if self.phase != Phase::Running {
            return Ok(StepOutcome::Inactive);
        }
        let Some(multiplier) = self.multipliers.get(self.cursor).copied() else {
            return Ok(StepOutcome::AwaitingData);
        };

        let (record, next_state) =
            self.policy
                .settle(&self.config, &self.state, self.cursor as u64, multiplier)?;

        debug!(
            "[{}] Round {}: {:?} bet {} target {} against {} -> balance {}",
            self.run_id,
            record.round_index,
            record.result,
            record.bet,
            record.cashout_target,
            record.multiplier,
            record.balance_after
        );

        self.ledger.push(record.clone());
        self.state = next_state;
        self.cursor += 1;
        Ok(StepOutcome::Settled(record))
    }

    /// Pause without touching state or ledger
    pub fn stop(&mut self) {
        if self.phase == Phase::Running {
            info!("[{}] Stopped at round {}", self.run_id, self.cursor);
            self.phase = Phase::Stopped;
        }
    }

    /// Clear ledger and cursor and re-baseline state
    ///
    /// Rejected while running; stop first. State and ledger always move as
    /// a unit, and a reset starts a new run identity.
    pub fn reset(&mut self) -> Result<()> {
        if self.phase == Phase::Running {
            return Err(DriverError::ResetWhileRunning);
        }
        self.ledger.clear();
        self.cursor = 0;
        self.state = self.config.baseline_state();
        self.phase = Phase::Idle;
        let old = std::mem::replace(&mut self.run_id, Uuid::new_v4());
        info!("[{}] Reset (new run {})", old, self.run_id);
        Ok(())
    }

    /// Replace the configuration
    ///
    /// Rejected while running. Edits to the baseline parameters (initial
    /// balance, base bet, base cashout) invalidate the existing run and
    /// force an implicit reset; other edits leave the run intact.
    pub fn update_config(&mut self, config: StrategyConfig) -> Result<()> {
        if self.phase == Phase::Running {
            return Err(DriverError::EditWhileRunning);
        }
        config.validate()?;
        let needs_reset = self.config.baseline_differs(&config);
        self.config = config;
        if needs_reset {
            warn!(
                "[{}] Baseline parameters changed; resetting run",
                self.run_id
            );
            self.reset()?;
        }
        Ok(())
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Current strategy-state snapshot
    pub fn state(&self) -> &StrategyState {
        &self.state
    }

    /// The append-only ledger, in settlement order
    pub fn ledger(&self) -> &[Settlement] {
        &self.ledger
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the next round to settle
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Multipliers loaded but not yet settled
    pub fn remaining(&self) -> usize {
        self.multipliers.len() - self.cursor
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }
}
