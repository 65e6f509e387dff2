//! The participation loop — ticks forever until the operator says stop.
//!
//! Control flow per tick: evaluate the cadence scheduler against the
//! current step, run the due tasks in priority order, increment the step,
//! pause one tick interval. Sub-task failures are inspected once at the
//! tick boundary, logged, and survived; the loop leaves `Running` only on
//! an explicit shutdown signal, observed at the top of a tick.

use std::sync::Arc;
use std::time::Duration;

use aegis_chain::{AccessPolicyClient, ChainError, LedgerClient, ServingHandle, TelemetrySink};
use aegis_types::Timestamp;

use crate::cadence::{CadenceScheduler, TaskKind};
use crate::config::MinerConfig;
use crate::metrics::MinerMetrics;
use crate::shutdown::ShutdownListener;
use crate::state::ParticipationState;
use crate::tasks::{
    maybe_submit_weights, refresh_blacklist, refresh_snapshot, report_status, resync_metagraph,
    WeightOutcome,
};
use crate::{MinerError, VERSION};

/// Lifecycle of the participation loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    ShuttingDown,
    Stopped,
}

/// The long-running driver of the miner's network participation.
pub struct ParticipationLoop<L, P, T, S> {
    config: MinerConfig,
    state: ParticipationState,
    scheduler: CadenceScheduler,
    ledger: L,
    policy: P,
    telemetry: T,
    serving: S,
    metrics: Arc<MinerMetrics>,
    shutdown: ShutdownListener,
    loop_state: LoopState,
}

impl<L, P, T, S> ParticipationLoop<L, P, T, S>
where
    L: LedgerClient,
    P: AccessPolicyClient,
    T: TelemetrySink,
    S: ServingHandle,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: MinerConfig,
        state: ParticipationState,
        ledger: L,
        policy: P,
        telemetry: T,
        serving: S,
        metrics: Arc<MinerMetrics>,
        shutdown: ShutdownListener,
    ) -> Self {
        Self {
            config,
            state,
            scheduler: CadenceScheduler::new(),
            ledger,
            policy,
            telemetry,
            serving,
            metrics,
            shutdown,
            loop_state: LoopState::Running,
        }
    }

    pub fn state(&self) -> &ParticipationState {
        &self.state
    }

    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn telemetry(&self) -> &T {
        &self.telemetry
    }

    pub fn serving(&self) -> &S {
        &self.serving
    }

    /// Run until the shutdown signal is observed.
    ///
    /// Starts the serving handle, then ticks at the configured interval.
    /// Individual sub-task calls carry no timeout (a hung chain call
    /// stalls the loop until it returns); the signal is checked between
    /// ticks only, so in-flight tasks always finish.
    pub fn run(&mut self) -> Result<(), MinerError> {
        self.serving.start()?;
        tracing::info!(
            version = VERSION,
            uid = %self.state.uid,
            netuid = %self.config.netuid,
            "miner serving; entering main loop"
        );

        let pause = Duration::from_millis(self.config.tick_interval_ms);
        loop {
            if self.shutdown.is_triggered() {
                self.finalize();
                return Ok(());
            }
            self.tick();
            std::thread::sleep(pause);
        }
    }

    /// One loop iteration: dispatch due tasks, then advance the step.
    ///
    /// Nothing a sub-task does can escape this function; errors are logged
    /// here and the counter advances regardless.
    pub fn tick(&mut self) {
        self.metrics.ticks.inc();

        let due = self.scheduler.due(self.state.step);
        if !due.is_empty() {
            tracing::debug!(step = self.state.step, tasks = due.len(), "cadence boundary");
        }
        for kind in due {
            if let Err(e) = self.run_task(kind) {
                self.metrics.transient_errors.inc();
                tracing::error!(
                    task = ?kind,
                    step = self.state.step,
                    transient = e.is_transient(),
                    "sub-task failed: {e}"
                );
            }
        }

        self.state.step += 1;

        self.metrics.step.set(self.state.step as i64);
        self.metrics
            .snapshot_block
            .set(self.state.snapshot.block as i64);
        self.metrics
            .blacklisted
            .set(i64::from(self.state.is_blacklisted));
        self.metrics
            .participant_count
            .set(self.state.snapshot.participant_count() as i64);
    }

    fn run_task(&mut self, kind: TaskKind) -> Result<(), ChainError> {
        match kind {
            TaskKind::WeightSubmission => {
                let outcome =
                    maybe_submit_weights(&mut self.state, &self.ledger, self.config.set_weights)?;
                match outcome {
                    WeightOutcome::Submitted { .. } => self.metrics.weight_submissions.inc(),
                    WeightOutcome::Rejected { .. } => self.metrics.weight_rejections.inc(),
                    WeightOutcome::Disabled | WeightOutcome::NotStale { .. } => {}
                }
            }
            TaskKind::BlacklistRefresh => {
                refresh_blacklist(&mut self.state, &self.policy)?;
                self.metrics.blacklist_refreshes.inc();
            }
            TaskKind::MetagraphResync => {
                resync_metagraph(&mut self.state, &self.ledger)?;
            }
            TaskKind::SnapshotRefresh => {
                refresh_snapshot(&mut self.state, &self.ledger)?;
            }
            TaskKind::TelemetryReport => {
                report_status(
                    &self.state,
                    &self.telemetry,
                    self.config.telemetry_enabled,
                    VERSION,
                    Timestamp::now(),
                );
            }
        }
        Ok(())
    }

    /// Orderly shutdown: release the serving transport, flush telemetry,
    /// stop. Called exactly once, from the top of the tick that observed
    /// the signal.
    fn finalize(&mut self) {
        self.loop_state = LoopState::ShuttingDown;
        tracing::info!(step = self.state.step, "shutdown signal observed, stopping miner");

        if let Err(e) = self.serving.stop() {
            tracing::warn!("failed to stop serving handle: {e}");
        }
        if let Err(e) = self.telemetry.flush() {
            tracing::warn!("failed to flush telemetry: {e}");
        }

        self.loop_state = LoopState::Stopped;
        tracing::info!("miner stopped");
    }
}
