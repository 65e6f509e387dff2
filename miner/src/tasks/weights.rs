//! Weight submission task.
//!
//! Miners do not need to set weights on this subnet; the whole path is
//! deprecated and will be removed in a future release. Until then it must
//! stay correct: submit a one-hot self-weight when the cadence is due, the
//! feature is enabled, and the chain has advanced past the staleness
//! window since the last successful submission.

use aegis_chain::{ChainError, LedgerClient};
use aegis_types::Uid;

use crate::state::ParticipationState;

/// Minimum block-height delta required before a new submission. A delta of
/// exactly this value does NOT trigger (strict inequality).
pub const STALENESS_WINDOW: u64 = 100;

/// What the weight task decided this cadence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeightOutcome {
    /// Weight submission is disabled by configuration.
    Disabled,
    /// The staleness window has not reopened yet.
    NotStale { delta: u64 },
    /// The chain accepted the submission at this height.
    Submitted { block: u64 },
    /// The chain reported failure; state was left unchanged.
    Rejected { block: u64 },
}

/// Build the weight vector: all zero except `1.0` at this miner's uid.
pub fn one_hot_weights(participant_count: usize, uid: Uid) -> Vec<f64> {
    let mut weights = vec![0.0; participant_count];
    if let Some(own) = weights.get_mut(uid.as_index()) {
        *own = 1.0;
    }
    weights
}

/// Submit weights if enabled and the staleness window has reopened.
///
/// On success, `last_submitted_block` becomes the height observed at
/// submission time. On rejection or error it is left unchanged, so the
/// retry waits for the window to reopen naturally.
pub fn maybe_submit_weights<L: LedgerClient>(
    state: &mut ParticipationState,
    ledger: &L,
    enabled: bool,
) -> Result<WeightOutcome, ChainError> {
    if !enabled {
        tracing::trace!("weight submission disabled by configuration");
        return Ok(WeightOutcome::Disabled);
    }

    let current_block = ledger.current_block()?;
    let delta = current_block.saturating_sub(state.last_submitted_block);
    if delta <= STALENESS_WINDOW {
        tracing::trace!(
            delta,
            window = STALENESS_WINDOW,
            "staleness window still closed, skipping weight submission"
        );
        return Ok(WeightOutcome::NotStale { delta });
    }

    let weights = one_hot_weights(state.snapshot.participant_count(), state.uid);

    tracing::warn!(
        "DEPRECATION NOTICE: miners do not need to set weights on this subnet; \
         this capability will be removed in a future release"
    );
    tracing::debug!(
        uid = %state.uid,
        version_key = %state.version_key,
        participants = weights.len(),
        current_block,
        "submitting weight vector"
    );

    let accepted = ledger.submit_weights(state.uid, &weights, state.version_key, false)?;
    if accepted {
        tracing::info!(block = current_block, "successfully set weights");
        state.last_submitted_block = current_block;
        Ok(WeightOutcome::Submitted {
            block: current_block,
        })
    } else {
        tracing::error!(block = current_block, "failed to set weights");
        Ok(WeightOutcome::Rejected {
            block: current_block,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aegis_nullables::NullLedger;
    use aegis_types::{Hotkey, VersionKey};

    fn state_with(last_submitted: u64, participants: u16, uid: u16) -> ParticipationState {
        let ledger = NullLedger::with_neurons(last_submitted, participants);
        let snapshot = ledger.snapshot(false).unwrap();
        ParticipationState::new(
            Uid::new(uid),
            Hotkey::new("hk-test"),
            VersionKey::new(7),
            last_submitted,
            snapshot,
        )
    }

    #[test]
    fn one_hot_vector_invariants() {
        let weights = one_hot_weights(16, Uid::new(5));
        assert_eq!(weights.len(), 16);
        assert_eq!(weights.iter().sum::<f64>(), 1.0);
        assert_eq!(weights[5], 1.0);
        assert!(weights
            .iter()
            .enumerate()
            .all(|(i, &w)| w == if i == 5 { 1.0 } else { 0.0 }));
    }

    #[test]
    fn one_hot_with_out_of_range_uid_stays_zero() {
        let weights = one_hot_weights(4, Uid::new(9));
        assert_eq!(weights.iter().sum::<f64>(), 0.0);
    }

    #[test]
    fn disabled_flag_short_circuits_without_chain_io() {
        let ledger = NullLedger::with_neurons(10_000, 4);
        let mut state = state_with(0, 4, 1);
        let outcome = maybe_submit_weights(&mut state, &ledger, false).unwrap();
        assert_eq!(outcome, WeightOutcome::Disabled);
        assert!(ledger.submissions().is_empty());
        assert_eq!(state.last_submitted_block, 0);
    }

    #[test]
    fn delta_of_exactly_window_does_not_submit() {
        let ledger = NullLedger::with_neurons(1100, 4);
        let mut state = state_with(1000, 4, 1);
        let outcome = maybe_submit_weights(&mut state, &ledger, true).unwrap();
        assert_eq!(outcome, WeightOutcome::NotStale { delta: 100 });
        assert!(ledger.submissions().is_empty());
        assert_eq!(state.last_submitted_block, 1000);
    }

    #[test]
    fn delta_past_window_submits_and_updates_watermark() {
        let ledger = NullLedger::with_neurons(1101, 4);
        let mut state = state_with(1000, 4, 2);
        let outcome = maybe_submit_weights(&mut state, &ledger, true).unwrap();
        assert_eq!(outcome, WeightOutcome::Submitted { block: 1101 });
        assert_eq!(state.last_submitted_block, 1101);

        let subs = ledger.submissions();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].uid, Uid::new(2));
        assert_eq!(subs[0].weights.len(), 4);
        assert_eq!(subs[0].weights[2], 1.0);
        assert!(!subs[0].wait_for_inclusion);
        assert_eq!(subs[0].version_key, VersionKey::new(7));
    }

    #[test]
    fn watermark_is_the_observed_height_not_a_later_one() {
        let ledger = NullLedger::with_neurons(1200, 4);
        let mut state = state_with(1000, 4, 0);
        // The chain advances while the submission is in flight; the
        // watermark must still be the height read at submission time.
        ledger.script_submit(Ok(true));
        maybe_submit_weights(&mut state, &ledger, true).unwrap();
        ledger.advance_blocks(50);
        assert_eq!(state.last_submitted_block, 1200);
    }

    #[test]
    fn rejection_leaves_watermark_unchanged() {
        let ledger = NullLedger::with_neurons(1500, 4);
        let mut state = state_with(1000, 4, 1);
        ledger.script_submit(Ok(false));
        let outcome = maybe_submit_weights(&mut state, &ledger, true).unwrap();
        assert_eq!(outcome, WeightOutcome::Rejected { block: 1500 });
        assert_eq!(state.last_submitted_block, 1000);
    }

    #[test]
    fn transient_error_propagates_and_leaves_state_unchanged() {
        let ledger = NullLedger::with_neurons(1500, 4);
        let mut state = state_with(1000, 4, 1);
        ledger.script_submit(Err(ChainError::Transient("rpc timeout".into())));
        let err = maybe_submit_weights(&mut state, &ledger, true).unwrap_err();
        assert!(err.is_transient());
        assert_eq!(state.last_submitted_block, 1000);
    }

    #[test]
    fn vector_is_sized_to_current_snapshot() {
        let ledger = NullLedger::with_neurons(1201, 32);
        let mut state = state_with(1000, 32, 31);
        maybe_submit_weights(&mut state, &ledger, true).unwrap();
        assert_eq!(ledger.submissions()[0].weights.len(), 32);
    }
}
