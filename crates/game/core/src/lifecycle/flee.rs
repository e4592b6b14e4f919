//! Escaping an encounter.

use super::{FailureSummary, LifecycleError, terminate_failure};
use crate::combat::{CombatPhase, FailureReason};
use crate::config::RunConfig;
use crate::env::{RunEnv, SeededRng};
use crate::escape::{EscapeOutcome, resolve_escape};
use crate::state::{HexCoord, HostileId, RunFlags, SessionState};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EscapeReport {
    pub outcome: EscapeOutcome,
    /// Coordinate recorded as fled, if the escape left a PoI behind.
    pub fled: Option<HexCoord>,
    /// Set when the escape destroyed the ship.
    pub failure: Option<FailureSummary>,
}

/// Escapes from `hostile`, taking randomly distributed damage.
///
/// Any in-flight (unresolved) combat is discarded along with the PoI it
/// interrupted. A destroying escape terminates the run as MIA.
pub fn escape(
    state: &mut SessionState,
    hostile: &HostileId,
    coord: Option<HexCoord>,
    seed: u64,
    env: &RunEnv<'_>,
    config: &RunConfig,
) -> Result<EscapeReport, LifecycleError> {
    if state
        .combat
        .as_ref()
        .is_some_and(|combat| combat.phase != CombatPhase::AwaitingOutcome)
    {
        return Err(LifecycleError::CombatInProgress);
    }
    let damage = env
        .hostiles()?
        .hostile(hostile)
        .and_then(|profile| profile.damage)
        .unwrap_or(config.default_escape_damage);

    let run = state.run.as_mut().ok_or(LifecycleError::NoActiveRun)?;
    let outcome = resolve_escape(&run.sections, damage, &mut SeededRng::new(seed));
    outcome.apply_to(run);

    let poi = run.interruptions.take_poi_combat();
    run.interruptions.take_salvage();
    run.flags.remove(RunFlags::BLOCKADE_COMBAT);

    let fled = coord.or(poi.map(|poi| poi.coord));
    if let Some(coord) = fled {
        run.record_fled(coord);
    }
    state.clear_combat();

    let failure = if outcome.destroyed {
        terminate_failure(state, FailureReason::Combat, env)
    } else {
        None
    };

    Ok(EscapeReport {
        outcome,
        fled,
        failure,
    })
}
