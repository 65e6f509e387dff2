//! The metagraph snapshot — a cached view of the global network state.

use aegis_types::{Hotkey, Uid};
use serde::{Deserialize, Serialize};

/// Per-neuron metrics as recorded on chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NeuronInfo {
    pub uid: Uid,
    pub hotkey: Hotkey,
    pub stake: f64,
    pub rank: f64,
    pub trust: f64,
    pub consensus: f64,
    pub incentive: f64,
    pub emission: f64,
}

/// A point-in-time view of every neuron on the subnet.
///
/// Snapshots are replaced wholesale on refresh and never partially
/// mutated; `block` records the height at which the view was captured.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    /// Block height at which this snapshot was captured.
    pub block: u64,
    /// All registered neurons, indexed by uid.
    pub neurons: Vec<NeuronInfo>,
}

impl NetworkSnapshot {
    /// An empty snapshot at the given height.
    pub fn empty(block: u64) -> Self {
        Self {
            block,
            neurons: Vec::new(),
        }
    }

    /// Number of registered participants.
    pub fn participant_count(&self) -> usize {
        self.neurons.len()
    }

    /// Look up a neuron by uid.
    pub fn neuron(&self, uid: Uid) -> Option<&NeuronInfo> {
        self.neurons.iter().find(|n| n.uid == uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neuron(uid: u16, stake: f64) -> NeuronInfo {
        NeuronInfo {
            uid: Uid::new(uid),
            hotkey: Hotkey::new(format!("hk-{uid}")),
            stake,
            rank: 0.0,
            trust: 0.0,
            consensus: 0.0,
            incentive: 0.0,
            emission: 0.0,
        }
    }

    #[test]
    fn empty_snapshot_has_no_participants() {
        let snap = NetworkSnapshot::empty(7);
        assert_eq!(snap.block, 7);
        assert_eq!(snap.participant_count(), 0);
        assert!(snap.neuron(Uid::new(0)).is_none());
    }

    #[test]
    fn neuron_lookup_by_uid() {
        let snap = NetworkSnapshot {
            block: 100,
            neurons: vec![neuron(0, 1.0), neuron(1, 2.0), neuron(2, 3.0)],
        };
        assert_eq!(snap.participant_count(), 3);
        assert_eq!(snap.neuron(Uid::new(1)).unwrap().stake, 2.0);
        assert!(snap.neuron(Uid::new(9)).is_none());
    }
}
