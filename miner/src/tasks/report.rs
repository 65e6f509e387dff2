//! Telemetry report task.
//!
//! Every umbrella cadence the miner logs one status line and, when
//! telemetry is enabled, ships the five consensus metrics to the sink as
//! individually tagged values. Sink failures are logged and swallowed;
//! reporting never aborts a tick.

use std::fmt;

use aegis_chain::TelemetrySink;
use aegis_types::Timestamp;

use crate::state::ParticipationState;

/// One status record, extracted from the state at reporting time.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusReport {
    pub version: String,
    pub blacklisted: bool,
    pub step: u64,
    pub block: u64,
    pub stake: f64,
    pub rank: f64,
    pub trust: f64,
    pub consensus: f64,
    pub incentive: f64,
    pub emission: f64,
}

impl StatusReport {
    /// Extract this miner's metrics from the cached snapshot. Metrics are
    /// zero when the uid is missing from the snapshot (e.g. before the
    /// first successful sync).
    pub fn collect(state: &ParticipationState, version: &str) -> Self {
        let own = state.snapshot.neuron(state.uid);
        let metric = |f: fn(&aegis_chain::NeuronInfo) -> f64| own.map(f).unwrap_or(0.0);
        Self {
            version: version.to_string(),
            blacklisted: state.is_blacklisted,
            step: state.step,
            block: state.snapshot.block,
            stake: metric(|n| n.stake),
            rank: metric(|n| n.rank),
            trust: metric(|n| n.trust),
            consensus: metric(|n| n.consensus),
            incentive: metric(|n| n.incentive),
            emission: metric(|n| n.emission),
        }
    }

    /// The five per-neuron metrics shipped to the telemetry sink, with
    /// their tag suffixes.
    fn sink_fields(&self) -> [(&'static str, f64); 5] {
        [
            ("rank", self.rank),
            ("trust", self.trust),
            ("consensus", self.consensus),
            ("incentive", self.incentive),
            ("emission", self.emission),
        ]
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Version:{} | Blacklist:{} | Step:{} | Block:{} | Stake:{} | Rank:{} | \
             Trust:{} | Consensus:{} | Incentive:{} | Emission:{}",
            self.version,
            self.blacklisted,
            self.step,
            self.block,
            self.stake,
            self.rank,
            self.trust,
            self.consensus,
            self.incentive,
            self.emission,
        )
    }
}

/// Log the status line and optionally emit telemetry.
pub fn report_status<T: TelemetrySink>(
    state: &ParticipationState,
    sink: &T,
    telemetry_enabled: bool,
    version: &str,
    now: Timestamp,
) -> StatusReport {
    let report = StatusReport::collect(state, version);
    tracing::info!("{report}");

    if telemetry_enabled {
        for (suffix, value) in report.sink_fields() {
            let tag = format!("{}:{}_{}", state.uid, state.hotkey, suffix);
            if let Err(e) = sink.emit(&tag, value, now) {
                tracing::warn!(%tag, "telemetry emit failed: {e}");
            }
        }
    }

    report
}
