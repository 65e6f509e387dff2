//! Nullable ledger — programmable block height, snapshots, and submission
//! outcomes, with every call recorded.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use aegis_chain::{ChainError, LedgerClient, NetworkSnapshot, NeuronInfo};
use aegis_types::{Hotkey, Uid, VersionKey};

/// A weight submission recorded by [`NullLedger`].
#[derive(Clone, Debug)]
pub struct SubmittedWeights {
    pub uid: Uid,
    pub weights: Vec<f64>,
    pub version_key: VersionKey,
    pub wait_for_inclusion: bool,
}

/// A test ledger that never talks to a chain.
pub struct NullLedger {
    block: Cell<u64>,
    snapshot: RefCell<NetworkSnapshot>,
    submissions: RefCell<Vec<SubmittedWeights>>,
    /// Scripted outcomes for upcoming `submit_weights` calls; when empty,
    /// submissions are accepted.
    submit_script: RefCell<VecDeque<Result<bool, ChainError>>>,
    /// Scripted errors for upcoming `current_block` calls.
    block_script: RefCell<VecDeque<ChainError>>,
    /// Scripted errors for upcoming `snapshot` calls.
    snapshot_script: RefCell<VecDeque<ChainError>>,
    light_syncs: Cell<u32>,
    forced_syncs: Cell<u32>,
}

impl NullLedger {
    pub fn new(block: u64, snapshot: NetworkSnapshot) -> Self {
        Self {
            block: Cell::new(block),
            snapshot: RefCell::new(snapshot),
            submissions: RefCell::new(Vec::new()),
            submit_script: RefCell::new(VecDeque::new()),
            block_script: RefCell::new(VecDeque::new()),
            snapshot_script: RefCell::new(VecDeque::new()),
            light_syncs: Cell::new(0),
            forced_syncs: Cell::new(0),
        }
    }

    /// A ledger whose snapshot holds `count` neurons with zeroed metrics.
    pub fn with_neurons(block: u64, count: u16) -> Self {
        let neurons = (0..count)
            .map(|uid| NeuronInfo {
                uid: Uid::new(uid),
                hotkey: Hotkey::new(format!("null-hotkey-{uid}")),
                stake: 0.0,
                rank: 0.0,
                trust: 0.0,
                consensus: 0.0,
                incentive: 0.0,
                emission: 0.0,
            })
            .collect();
        Self::new(block, NetworkSnapshot { block, neurons })
    }

    /// Move the chain head to `height`.
    pub fn set_block(&self, height: u64) {
        self.block.set(height);
    }

    /// Advance the chain head by `delta` blocks.
    pub fn advance_blocks(&self, delta: u64) {
        self.block.set(self.block.get() + delta);
    }

    /// Replace the snapshot served to callers.
    pub fn set_snapshot(&self, snapshot: NetworkSnapshot) {
        *self.snapshot.borrow_mut() = snapshot;
    }

    /// Script the outcome of the next `submit_weights` call.
    pub fn script_submit(&self, outcome: Result<bool, ChainError>) {
        self.submit_script.borrow_mut().push_back(outcome);
    }

    /// Script the next `current_block` call to fail.
    pub fn fail_next_current_block(&self, err: ChainError) {
        self.block_script.borrow_mut().push_back(err);
    }

    /// Script the next `snapshot` call to fail.
    pub fn fail_next_snapshot(&self, err: ChainError) {
        self.snapshot_script.borrow_mut().push_back(err);
    }

    /// All recorded submissions (for assertions).
    pub fn submissions(&self) -> Vec<SubmittedWeights> {
        self.submissions.borrow().clone()
    }

    pub fn light_sync_count(&self) -> u32 {
        self.light_syncs.get()
    }

    pub fn forced_sync_count(&self) -> u32 {
        self.forced_syncs.get()
    }
}

impl LedgerClient for NullLedger {
    fn current_block(&self) -> Result<u64, ChainError> {
        if let Some(err) = self.block_script.borrow_mut().pop_front() {
            return Err(err);
        }
        Ok(self.block.get())
    }

    fn submit_weights(
        &self,
        uid: Uid,
        weights: &[f64],
        version_key: VersionKey,
        wait_for_inclusion: bool,
    ) -> Result<bool, ChainError> {
        self.submissions.borrow_mut().push(SubmittedWeights {
            uid,
            weights: weights.to_vec(),
            version_key,
            wait_for_inclusion,
        });
        self.submit_script
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(true))
    }

    fn snapshot(&self, force_resync: bool) -> Result<NetworkSnapshot, ChainError> {
        if let Some(err) = self.snapshot_script.borrow_mut().pop_front() {
            return Err(err);
        }
        if force_resync {
            self.forced_syncs.set(self.forced_syncs.get() + 1);
        } else {
            self.light_syncs.set(self.light_syncs.get() + 1);
        }
        let mut snapshot = self.snapshot.borrow().clone();
        snapshot.block = self.block.get();
        Ok(snapshot)
    }
}
