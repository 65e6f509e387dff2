//! Remote blacklist refresh task.

use aegis_chain::{AccessPolicyClient, ChainError};

use crate::state::ParticipationState;

/// Re-query the remote access policy and update the local flag.
///
/// A query failure is transient: the error propagates to the tick
/// boundary, the cached flag keeps its previous value, and the next
/// attempt happens at the next natural cadence hit.
pub fn refresh_blacklist<P: AccessPolicyClient>(
    state: &mut ParticipationState,
    policy: &P,
) -> Result<bool, ChainError> {
    let blacklisted = policy.is_blacklisted(&state.hotkey)?;
    if blacklisted != state.is_blacklisted {
        tracing::info!(
            hotkey = %state.hotkey,
            blacklisted,
            "remote blacklist status changed"
        );
    }
    state.is_blacklisted = blacklisted;
    Ok(blacklisted)
}
