//! Run lifecycle: creation, map-side mutations, and failure termination.
//!
//! Success termination lives in [`crate::extraction`]; everything else that
//! creates, mutates outside combat, or discards the live run is here.
mod combat;
mod error;
mod flee;
mod terminate;

pub use combat::{begin_boss_combat, begin_combat, interrupt_poi_with_combat};
pub use error::LifecycleError;
pub use flee::{EscapeReport, escape};
pub use terminate::{FailureSummary, abandon, return_to_hub, terminate_failure};

use crate::env::{MissionEvent, RunEnv};
use crate::state::{
    HexCoord, LootItem, PendingSalvage, PoiCombat, RunRecord, SessionState, ai_core_total,
    salvage_credit_total,
};

/// Creates a new run with the loadout in `ship_slot`.
///
/// Sections start at full hull and detection is reset through the threat
/// collaborator. A terminated run must be acknowledged with
/// [`return_to_hub`] first.
pub fn start_run(
    state: &mut SessionState,
    ship_slot: u32,
    tier: u8,
    map_seed: u64,
    env: &RunEnv<'_>,
) -> Result<(), LifecycleError> {
    if state.terminating {
        return Err(LifecycleError::Terminating);
    }
    if state.run.is_some() {
        return Err(LifecycleError::RunAlreadyActive);
    }
    if state.combat.is_some() {
        return Err(LifecycleError::CombatInProgress);
    }
    if !state.profile.slot_is_active(ship_slot) {
        return Err(LifecycleError::SlotUnavailable(ship_slot));
    }
    let loadout = env.loadout(ship_slot)?;
    let threat = env.threat()?;

    let tier = tier.max(1);
    let mut run = RunRecord::new(map_seed, ship_slot, tier, loadout.sections);
    threat.reset_tracking();
    run.set_detection(threat.current_level());

    state.run = Some(run);
    env.record(MissionEvent::RunStarted {
        ship_slot,
        tier,
        map_seed,
    });
    Ok(())
}

fn collect(run: &mut RunRecord, items: Vec<LootItem>) {
    run.credits_earned += salvage_credit_total(&items);
    run.ai_cores_earned += ai_core_total(&items);
    run.collected_loot.extend(items);
}

/// Loots a PoI. A coordinate already looted yields nothing and returns
/// `false`.
pub fn loot_poi(
    state: &mut SessionState,
    coord: HexCoord,
    items: Vec<LootItem>,
) -> Result<bool, LifecycleError> {
    let run = state.run.as_mut().ok_or(LifecycleError::NoActiveRun)?;
    if !run.record_looted(coord) {
        return Ok(false);
    }
    run.reopen_gate();
    collect(run, items);
    Ok(true)
}

/// Hands back PoI loot preserved across a combat and adds it to the
/// collected loot. Only available once the combat is fully resolved.
pub fn take_pending_salvage(
    state: &mut SessionState,
) -> Result<Option<PendingSalvage>, LifecycleError> {
    if state.combat.is_some() {
        return Err(LifecycleError::CombatInProgress);
    }
    let run = state.run.as_mut().ok_or(LifecycleError::NoActiveRun)?;
    let Some(pending) = run.interruptions.take_salvage() else {
        return Ok(None);
    };
    collect(run, pending.loot.clone());
    Ok(Some(pending))
}

/// Returns the interrupted PoI, with its remaining waypoints, so map travel
/// can resume.
pub fn resume_poi(state: &mut SessionState) -> Result<Option<PoiCombat>, LifecycleError> {
    if state.combat.is_some() {
        return Err(LifecycleError::CombatInProgress);
    }
    let run = state.run.as_mut().ok_or(LifecycleError::NoActiveRun)?;
    Ok(run.interruptions.take_poi_combat())
}

/// Adjusts detection through the threat collaborator and mirrors the clamped
/// level into the run.
pub fn adjust_detection(
    state: &mut SessionState,
    delta: f64,
    reason: &str,
    env: &RunEnv<'_>,
) -> Result<f64, LifecycleError> {
    let run = state.run.as_mut().ok_or(LifecycleError::NoActiveRun)?;
    let threat = env.threat()?;
    threat.adjust_level(delta, reason);
    run.set_detection(threat.current_level());
    if delta > 0.0 {
        run.reopen_gate();
    }
    Ok(run.detection_level)
}
