//! Aegis subnet miner — the periodic participation loop.
//!
//! The miner is the central coordinator that keeps this neuron active on
//! the subnet:
//! - Tracks local progress against the chain's block height
//! - Fires periodic sub-tasks at cadences derived from a step counter
//! - Submits weight vectors under staleness constraints (deprecated path)
//! - Refreshes the cached metagraph view
//! - Enforces the remotely sourced blacklist decision
//! - Emits a status line and telemetry every umbrella cadence
//! - Survives transient failures indefinitely; only an operator signal
//!   stops it

pub mod cadence;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod runner;
pub mod shutdown;
pub mod state;
pub mod tasks;

pub use cadence::{CadenceScheduler, TaskKind};
pub use config::MinerConfig;
pub use error::MinerError;
pub use logging::{init_logging, LogFormat};
pub use metrics::MinerMetrics;
pub use runner::{LoopState, ParticipationLoop};
pub use shutdown::{ShutdownController, ShutdownListener};
pub use state::ParticipationState;

/// Release version reported in the status line.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
