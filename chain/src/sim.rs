//! Simulated ledger for the dev network.
//!
//! Lets the daemon run end-to-end with no live chain: block height advances
//! with wall-clock time, the metagraph is synthesized deterministically,
//! and weight submissions are accepted after a shape check. Useful for
//! local development and smoke testing the participation loop.

use std::time::{Duration, Instant};

use aegis_types::{Hotkey, Uid, VersionKey};

use crate::client::LedgerClient;
use crate::error::ChainError;
use crate::snapshot::{NetworkSnapshot, NeuronInfo};

/// An in-process stand-in for the chain.
pub struct SimLedger {
    started: Instant,
    genesis_height: u64,
    block_time: Duration,
    neuron_count: u16,
}

impl SimLedger {
    /// Default block time on the dev network.
    pub const DEFAULT_BLOCK_TIME: Duration = Duration::from_secs(12);

    pub fn new(neuron_count: u16, genesis_height: u64, block_time: Duration) -> Self {
        Self {
            started: Instant::now(),
            genesis_height,
            block_time,
            neuron_count,
        }
    }

    /// A dev ledger with the default block time.
    pub fn dev(neuron_count: u16) -> Self {
        Self::new(neuron_count, 0, Self::DEFAULT_BLOCK_TIME)
    }

    fn height_now(&self) -> u64 {
        let elapsed = self.started.elapsed().as_secs();
        self.genesis_height + elapsed / self.block_time.as_secs().max(1)
    }

    /// Deterministic per-neuron metrics so repeated snapshots at the same
    /// height are identical.
    fn synthesize_neuron(uid: u16) -> NeuronInfo {
        let spread = f64::from(uid % 32) / 32.0;
        NeuronInfo {
            uid: Uid::new(uid),
            hotkey: Hotkey::new(format!("sim-hotkey-{uid}")),
            stake: 1_000.0 + f64::from(uid) * 10.0,
            rank: spread,
            trust: spread * 0.9,
            consensus: spread * 0.8,
            incentive: spread * 0.7,
            emission: spread * 0.01,
        }
    }
}

impl LedgerClient for SimLedger {
    fn current_block(&self) -> Result<u64, ChainError> {
        Ok(self.height_now())
    }

    fn submit_weights(
        &self,
        uid: Uid,
        weights: &[f64],
        version_key: VersionKey,
        wait_for_inclusion: bool,
    ) -> Result<bool, ChainError> {
        if weights.len() != self.neuron_count as usize {
            tracing::warn!(
                got = weights.len(),
                expected = self.neuron_count,
                "sim ledger rejected weight vector with wrong length"
            );
            return Ok(false);
        }
        tracing::debug!(
            %uid,
            %version_key,
            wait_for_inclusion,
            "sim ledger accepted weight submission"
        );
        Ok(true)
    }

    fn snapshot(&self, force_resync: bool) -> Result<NetworkSnapshot, ChainError> {
        tracing::trace!(force_resync, "synthesizing metagraph snapshot");
        Ok(NetworkSnapshot {
            block: self.height_now(),
            neurons: (0..self.neuron_count).map(Self::synthesize_neuron).collect(),
        })
    }
}
