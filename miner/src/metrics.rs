//! Prometheus metrics for the Aegis miner.
//!
//! The [`MinerMetrics`] struct owns a dedicated [`Registry`] that the
//! daemon's `/metrics` endpoint can encode into the Prometheus text
//! exposition format.

use prometheus::{
    register_int_counter_with_registry, register_int_gauge_with_registry, IntCounter, IntGauge,
    Opts, Registry,
};

/// Central collection of all miner-level Prometheus metrics.
pub struct MinerMetrics {
    /// The Prometheus registry that owns every metric below.
    pub registry: Registry,

    // ── Counters ────────────────────────────────────────────────────────
    /// Total loop ticks executed.
    pub ticks: IntCounter,
    /// Total weight submissions accepted by the chain.
    pub weight_submissions: IntCounter,
    /// Total weight submissions rejected by the chain.
    pub weight_rejections: IntCounter,
    /// Total blacklist refreshes that completed.
    pub blacklist_refreshes: IntCounter,
    /// Total transient sub-task failures caught at the tick boundary.
    pub transient_errors: IntCounter,

    // ── Gauges ──────────────────────────────────────────────────────────
    /// Current step counter.
    pub step: IntGauge,
    /// Block height of the cached metagraph snapshot.
    pub snapshot_block: IntGauge,
    /// Whether the local hotkey is currently blacklisted (0/1).
    pub blacklisted: IntGauge,
    /// Participant count in the cached snapshot.
    pub participant_count: IntGauge,
}

impl MinerMetrics {
    /// Create a fresh set of metrics, all registered under a new
    /// [`Registry`].
    pub fn new() -> Self {
        let registry = Registry::new();

        let ticks = register_int_counter_with_registry!(
            Opts::new("aegis_ticks_total", "Total loop ticks executed"),
            registry
        )
        .expect("failed to register ticks counter");

        let weight_submissions = register_int_counter_with_registry!(
            Opts::new(
                "aegis_weight_submissions_total",
                "Total weight submissions accepted by the chain"
            ),
            registry
        )
        .expect("failed to register weight_submissions counter");

        let weight_rejections = register_int_counter_with_registry!(
            Opts::new(
                "aegis_weight_rejections_total",
                "Total weight submissions rejected by the chain"
            ),
            registry
        )
        .expect("failed to register weight_rejections counter");

        let blacklist_refreshes = register_int_counter_with_registry!(
            Opts::new(
                "aegis_blacklist_refreshes_total",
                "Total completed blacklist refreshes"
            ),
            registry
        )
        .expect("failed to register blacklist_refreshes counter");

        let transient_errors = register_int_counter_with_registry!(
            Opts::new(
                "aegis_transient_errors_total",
                "Total transient sub-task failures caught at the tick boundary"
            ),
            registry
        )
        .expect("failed to register transient_errors counter");

        let step = register_int_gauge_with_registry!(
            Opts::new("aegis_step", "Current step counter"),
            registry
        )
        .expect("failed to register step gauge");

        let snapshot_block = register_int_gauge_with_registry!(
            Opts::new(
                "aegis_snapshot_block",
                "Block height of the cached metagraph snapshot"
            ),
            registry
        )
        .expect("failed to register snapshot_block gauge");

        let blacklisted = register_int_gauge_with_registry!(
            Opts::new(
                "aegis_blacklisted",
                "Whether the local hotkey is blacklisted (0/1)"
            ),
            registry
        )
        .expect("failed to register blacklisted gauge");

        let participant_count = register_int_gauge_with_registry!(
            Opts::new(
                "aegis_participant_count",
                "Participant count in the cached snapshot"
            ),
            registry
        )
        .expect("failed to register participant_count gauge");

        Self {
            registry,
            ticks,
            weight_submissions,
            weight_rejections,
            blacklist_refreshes,
            transient_errors,
            step,
            snapshot_block,
            blacklisted,
            participant_count,
        }
    }
}

impl Default for MinerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
