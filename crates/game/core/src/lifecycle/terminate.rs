//! Failure termination (MIA).

use crate::combat::FailureReason;
use crate::config::RunConfig;
use crate::env::{MissionEvent, RunEnv};
use crate::state::SessionState;

/// What a failed run cost the player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FailureSummary {
    pub reason: FailureReason,
    pub ship_slot: u32,
    pub was_starter: bool,
    /// Collected items discarded with the run.
    pub forfeited_items: usize,
    /// The custom loadout was marked missing.
    pub slot_lost: bool,
}

/// Discards the run and any combat context and marks the loadout missing.
///
/// Returns `None` when there was nothing left to terminate, so a second call
/// for the same run is a no-op.
pub fn terminate_failure(
    state: &mut SessionState,
    reason: FailureReason,
    env: &RunEnv<'_>,
) -> Option<FailureSummary> {
    let ship_slot = match (&state.run, &state.combat) {
        (Some(run), _) => run.ship_slot,
        (None, Some(combat)) => combat.ship_slot,
        (None, None) => return None,
    };
    let forfeited_items = state
        .run
        .take()
        .map_or(0, |run| run.collected_loot.len());
    state.clear_combat();

    let slot_lost = state.profile.mark_missing(ship_slot);
    env.record(MissionEvent::RunFailed { ship_slot, reason });

    Some(FailureSummary {
        reason,
        ship_slot,
        was_starter: RunConfig::is_starter_slot(ship_slot),
        forfeited_items,
        slot_lost,
    })
}

/// Abandons the live run (or the combat in progress) as MIA.
///
/// The terminating guard is raised before anything is discarded. Concurrent
/// callers that observe it get `None`, as do calls with nothing to abandon.
pub fn abandon(state: &mut SessionState, env: &RunEnv<'_>) -> Option<FailureSummary> {
    if state.terminating || (state.run.is_none() && state.combat.is_none()) {
        return None;
    }
    state.terminating = true;
    terminate_failure(state, FailureReason::Abandon, env)
}

/// Acknowledges a termination and lowers the guard once nothing is left to
/// terminate. Returns whether the guard was lowered.
pub fn return_to_hub(state: &mut SessionState) -> bool {
    if state.run.is_some() || state.combat.is_some() {
        return false;
    }
    state.terminating = false;
    true
}
