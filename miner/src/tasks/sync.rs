//! Metagraph sync task.
//!
//! Two behaviors at two cadences: a cheap snapshot refresh from the
//! already-cached chain connection every umbrella tick, and a forced full
//! resync on the resync cadence. Both replace the cached view wholesale
//! and are idempotent aside from the I/O cost.

use aegis_chain::{ChainError, LedgerClient};

use crate::state::ParticipationState;

/// Lightweight refresh: re-derive the snapshot without forcing a resync.
pub fn refresh_snapshot<L: LedgerClient>(
    state: &mut ParticipationState,
    ledger: &L,
) -> Result<(), ChainError> {
    state.snapshot = ledger.snapshot(false)?;
    tracing::trace!(
        block = state.snapshot.block,
        participants = state.snapshot.participant_count(),
        "metagraph snapshot refreshed"
    );
    Ok(())
}

/// Forced resync: make the chain rebuild its view before replacing ours.
pub fn resync_metagraph<L: LedgerClient>(
    state: &mut ParticipationState,
    ledger: &L,
) -> Result<(), ChainError> {
    tracing::debug!(
        block = state.snapshot.block,
        "forcing full metagraph resync"
    );
    state.snapshot = ledger.snapshot(true)?;
    Ok(())
}
