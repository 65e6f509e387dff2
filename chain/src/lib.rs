//! Chain-facing interfaces for the Aegis miner.
//!
//! The participation loop consumes the outside world through four narrow
//! seams, all defined here:
//! - [`LedgerClient`] — block height, metagraph snapshots, weight submission
//! - [`AccessPolicyClient`] — the remote blacklist decision
//! - [`TelemetrySink`] — timestamped key/value metrics
//! - [`ServingHandle`] — start/stop of the request-serving transport
//!
//! Concrete implementations live alongside the traits: an HTTP blacklist
//! client, a JSON-lines telemetry file sink, and a simulated ledger for
//! running the daemon without a live chain.

pub mod client;
pub mod error;
pub mod http;
pub mod sim;
pub mod snapshot;
pub mod telemetry;

pub use client::{AccessPolicyClient, LedgerClient, ServingHandle, TelemetrySink};
pub use error::ChainError;
pub use http::HttpBlacklistClient;
pub use sim::SimLedger;
pub use snapshot::{NetworkSnapshot, NeuronInfo};
pub use telemetry::FileTelemetrySink;
