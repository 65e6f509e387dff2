//! The mutable record the participation loop advances.

use aegis_chain::NetworkSnapshot;
use aegis_types::{Hotkey, Uid, VersionKey};

/// Everything the loop mutates, in one place.
///
/// Created once at startup, exclusively owned by the loop, and handed to
/// sub-tasks by mutable borrow for the duration of their invocation. No
/// other component ever holds a competing reference.
#[derive(Clone, Debug)]
pub struct ParticipationState {
    /// Loop iteration counter. Starts at 0, +1 per tick, never reset.
    pub step: u64,
    /// Block height of the last successful weight submission.
    pub last_submitted_block: u64,
    /// Local cache of the remote blacklist decision.
    pub is_blacklisted: bool,
    /// This miner's index in the metagraph. Immutable after startup.
    pub uid: Uid,
    /// This miner's public identity. Immutable after startup.
    pub hotkey: Hotkey,
    /// Protocol tag attached to weight submissions. Immutable.
    pub version_key: VersionKey,
    /// Last-known metagraph view; replaced wholesale on refresh.
    pub snapshot: NetworkSnapshot,
}

impl ParticipationState {
    /// Fresh state at startup.
    ///
    /// `current_block` seeds `last_submitted_block` so the staleness
    /// window starts closed: the first submission requires the chain to
    /// advance past the window first.
    pub fn new(
        uid: Uid,
        hotkey: Hotkey,
        version_key: VersionKey,
        current_block: u64,
        snapshot: NetworkSnapshot,
    ) -> Self {
        Self {
            step: 0,
            last_submitted_block: current_block,
            is_blacklisted: false,
            uid,
            hotkey,
            version_key,
            snapshot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_starts_at_step_zero_with_closed_window() {
        let state = ParticipationState::new(
            Uid::new(3),
            Hotkey::new("hk"),
            VersionKey::new(100),
            5000,
            NetworkSnapshot::empty(5000),
        );
        assert_eq!(state.step, 0);
        assert_eq!(state.last_submitted_block, 5000);
        assert!(!state.is_blacklisted);
        assert_eq!(state.uid, Uid::new(3));
    }
}
