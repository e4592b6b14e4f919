//! Combat initiation.
//!
//! Safety-critical encounter flags are mirrored into durable state here,
//! before the battle starts, because the descriptor may be cleared by
//! unrelated code before the outcome is resolved.

use super::LifecycleError;
use crate::combat::{CombatContext, CombatEncounterDescriptor, Encounter};
use crate::env::RunEnv;
use crate::state::{
    BossId, Interruption, InterruptionKind, PendingSalvage, PoiCombat, RunFlags, RunRecord,
    SessionState, aggregate_hull,
};

/// Interruption kinds that belong to one combat and go stale with it.
const COMBAT_SCOPED: [InterruptionKind; 3] = [
    InterruptionKind::PoiCombat,
    InterruptionKind::Salvage,
    InterruptionKind::BlueprintReward,
];

fn ensure_can_start(state: &SessionState) -> Result<(), LifecycleError> {
    if state.terminating {
        return Err(LifecycleError::Terminating);
    }
    if state.combat.is_some() {
        return Err(LifecycleError::CombatInProgress);
    }
    Ok(())
}

/// Drops interruptions left over from a previous combat.
fn discard_stale(run: &mut RunRecord) -> Vec<InterruptionKind> {
    COMBAT_SCOPED
        .into_iter()
        .filter(|kind| run.interruptions.take(*kind).is_some())
        .collect()
}

fn start(state: &mut SessionState, mut descriptor: CombatEncounterDescriptor) {
    let Some(run) = state.run.as_mut() else {
        return;
    };
    run.flags
        .set(RunFlags::BLOCKADE_COMBAT, descriptor.is_blockade());
    run.reopen_gate();
    descriptor.starting_hull = run.hull;
    state.combat = Some(CombatContext::from_descriptor(&descriptor, run.ship_slot));
    state.encounter = Some(descriptor);
}

/// Starts a regular or blockade combat inside the live run.
///
/// Returns the stale interruption kinds that were discarded.
pub fn begin_combat(
    state: &mut SessionState,
    descriptor: CombatEncounterDescriptor,
) -> Result<Vec<InterruptionKind>, LifecycleError> {
    ensure_can_start(state)?;
    if descriptor.encounter.is_boss() {
        return Err(LifecycleError::BossOutsideHub);
    }
    let run = state.run.as_mut().ok_or(LifecycleError::NoActiveRun)?;

    let discarded = discard_stale(run);
    start(state, descriptor);
    Ok(discarded)
}

/// Starts a combat that interrupted a PoI visit.
///
/// The PoI is marked looted immediately; its loot is kept as pending salvage
/// until the combat is over.
pub fn interrupt_poi_with_combat(
    state: &mut SessionState,
    poi: PoiCombat,
    pending: PendingSalvage,
    descriptor: CombatEncounterDescriptor,
) -> Result<Vec<InterruptionKind>, LifecycleError> {
    ensure_can_start(state)?;
    if descriptor.encounter.is_boss() {
        return Err(LifecycleError::BossOutsideHub);
    }
    let run = state.run.as_mut().ok_or(LifecycleError::NoActiveRun)?;

    let discarded = discard_stale(run);
    run.record_looted(poi.coord);
    if !pending.loot.is_empty() || pending.progress.is_some() {
        run.interruptions.insert(Interruption::Salvage(pending));
    }
    run.interruptions.insert(Interruption::PoiCombat(poi));

    start(state, descriptor);
    Ok(discarded)
}

/// Starts a boss combat from the hub with the loadout in `ship_slot`.
pub fn begin_boss_combat(
    state: &mut SessionState,
    boss_id: BossId,
    ship_slot: u32,
    env: &RunEnv<'_>,
) -> Result<(), LifecycleError> {
    ensure_can_start(state)?;
    if state.run.is_some() {
        return Err(LifecycleError::RunAlreadyActive);
    }
    if !state.profile.slot_is_active(ship_slot) {
        return Err(LifecycleError::SlotUnavailable(ship_slot));
    }
    let boss = env.boss(&boss_id)?;
    let loadout = env.loadout(ship_slot)?;

    let mut descriptor =
        CombatEncounterDescriptor::new(Encounter::Boss { boss_id }, 1, boss.difficulty);
    descriptor.starting_hull = aggregate_hull(&loadout.sections).1;

    state.profile.boss_progress.record_attempt();
    state.combat = Some(CombatContext::from_descriptor(&descriptor, ship_slot));
    state.encounter = Some(descriptor);
    Ok(())
}
