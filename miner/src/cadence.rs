//! Cadence scheduling — which sub-tasks are due at a given step.
//!
//! Cadences are step-counter intervals, not wall-clock timers: a task is
//! due whenever `step % interval == 0`, evaluated independently per task.
//! Step 0 therefore fires every cadence; the first weight submission is
//! still gated by the staleness window, so firing at startup is harmless.

/// Umbrella cadence: the loop only does periodic work every 20 steps.
pub const UMBRELLA_INTERVAL: u64 = 20;
/// Remote blacklist refresh cadence.
pub const BLACKLIST_INTERVAL: u64 = 300;
/// Forced metagraph resync cadence.
pub const RESYNC_INTERVAL: u64 = 600;

/// The sub-tasks the scheduler can mark due.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Check the staleness window and possibly submit weights.
    WeightSubmission,
    /// Re-query the remote blacklist.
    BlacklistRefresh,
    /// Full metagraph resync against the chain.
    MetagraphResync,
    /// Lightweight metagraph refresh from the cached connection.
    SnapshotRefresh,
    /// Log the status line and emit telemetry.
    TelemetryReport,
}

/// The cadence table, in execution priority order.
///
/// The blacklist and resync intervals are whole multiples of the umbrella
/// interval, so evaluating each row independently is equivalent to the
/// nested checks they replace.
const CADENCES: [(u64, TaskKind); 5] = [
    (UMBRELLA_INTERVAL, TaskKind::WeightSubmission),
    (BLACKLIST_INTERVAL, TaskKind::BlacklistRefresh),
    (RESYNC_INTERVAL, TaskKind::MetagraphResync),
    (UMBRELLA_INTERVAL, TaskKind::SnapshotRefresh),
    (UMBRELLA_INTERVAL, TaskKind::TelemetryReport),
];

/// Evaluates the cadence table against the step counter.
///
/// Stateless by design: cadences depend only on `step`, never on wall
/// clock or on whether another task fired.
pub struct CadenceScheduler {
    table: &'static [(u64, TaskKind)],
}

impl CadenceScheduler {
    pub fn new() -> Self {
        Self { table: &CADENCES }
    }

    /// All tasks due at `step`, in priority order.
    ///
    /// Evaluated against the pre-increment step value: the loop calls this
    /// with the step the tick started at, and increments afterwards.
    pub fn due(&self, step: u64) -> Vec<TaskKind> {
        self.table
            .iter()
            .filter(|(interval, _)| step % interval == 0)
            .map(|&(_, kind)| kind)
            .collect()
    }
}

impl Default for CadenceScheduler {
    fn default() -> Self {
        Self::new()
    }
}
