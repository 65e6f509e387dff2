//! The trait seams between the participation loop and the outside world.
//!
//! All calls are synchronous and potentially blocking: the loop performs
//! its I/O inline and bounds the cost with its cadences, so no method here
//! should be called from an async context directly.

use aegis_types::{Hotkey, Timestamp, Uid, VersionKey};

use crate::error::ChainError;
use crate::snapshot::NetworkSnapshot;

/// Read and write access to the chain the miner participates on.
pub trait LedgerClient {
    /// The current block height.
    fn current_block(&self) -> Result<u64, ChainError>;

    /// Submit a weight vector on behalf of `uid`.
    ///
    /// Returns `Ok(true)` when the chain accepted the submission and
    /// `Ok(false)` when it was rejected without error. With
    /// `wait_for_inclusion = false` the call must not block on finality.
    fn submit_weights(
        &self,
        uid: Uid,
        weights: &[f64],
        version_key: VersionKey,
        wait_for_inclusion: bool,
    ) -> Result<bool, ChainError>;

    /// Fetch the metagraph.
    ///
    /// With `force_resync = false` this is a cheap re-derivation from the
    /// already-cached connection; with `force_resync = true` it performs a
    /// full resync against the chain before returning.
    fn snapshot(&self, force_resync: bool) -> Result<NetworkSnapshot, ChainError>;
}

/// Remote access-control decision for the local identity.
pub trait AccessPolicyClient {
    /// Whether `hotkey` appears on the remotely maintained blacklist.
    fn is_blacklisted(&self, hotkey: &Hotkey) -> Result<bool, ChainError>;
}

/// Destination for timestamped key/value metrics.
pub trait TelemetrySink {
    fn emit(&self, tag: &str, value: f64, at: Timestamp) -> Result<(), ChainError>;

    /// Flush buffered metrics; called once during orderly shutdown.
    fn flush(&self) -> Result<(), ChainError>;
}

/// Lifecycle handle for the request-serving transport.
///
/// The transport itself (what it serves, how it authenticates callers) is
/// outside this workspace; the loop only needs to start it before ticking
/// and stop it exactly once on shutdown.
pub trait ServingHandle {
    fn start(&mut self) -> Result<(), ChainError>;
    fn stop(&mut self) -> Result<(), ChainError>;
}
