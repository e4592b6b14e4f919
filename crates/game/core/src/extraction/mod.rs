//! Extraction: the blockade gate, the capacity limit, and success
//! termination.
//!
//! An attempt either clears the gate (and completes immediately when the
//! collected loot fits), asks the player to pick what to keep, or reports a
//! blockade the caller must fight. Passing the gate is recorded on the run,
//! so a later `complete_extraction` never rolls again.
mod error;
mod gate;
mod limit;

pub use error::ExtractionError;
pub use gate::{DetectionGate, GateDecision};
pub use limit::{extraction_limit, run_extraction_limit};

use std::collections::BTreeSet;

use crate::combat::{CombatEncounterDescriptor, Encounter};
use crate::config::RunConfig;
use crate::env::{MissionEvent, OracleError, RunEnv, SeededRng, derive_seed};
use crate::state::{
    HostileId, InterruptionKind, LootItem, RunFlags, RunRecord, SessionState, ai_core_total,
    salvage_credit_total,
};

/// Roll context for the extraction gate draw.
const EXTRACTION_ROLL: u32 = 1;

/// Result of a successful extraction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractionSummary {
    pub ship_slot: u32,
    pub tier: u8,
    pub limit: u32,
    pub extracted: Vec<LootItem>,
    /// Collected items left behind by the selection.
    pub discarded: usize,
    /// Credits from salvage items only.
    pub extracted_credits: u64,
    pub extracted_ai_cores: u32,
    pub reputation_earned: u32,
    pub drones_damaged: bool,
    pub hull: u32,
    pub max_hull: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ExtractionAttempt {
    Extracted(ExtractionSummary),
    /// More loot than capacity; call `complete_extraction` with a selection.
    SelectionRequired { limit: u32, collected: usize },
    /// A hostile intercepts; fight it before extracting.
    Blockaded { hostile: HostileId },
}

fn reputation_bonus(run: &RunRecord, env: &RunEnv<'_>) -> Result<u32, OracleError> {
    if run.is_starter() {
        return Ok(0);
    }
    Ok(env.reputation()?.extraction_bonus())
}

/// Current extraction limit of the live run.
pub fn current_limit(
    run: &RunRecord,
    env: &RunEnv<'_>,
    config: &RunConfig,
) -> Result<u32, OracleError> {
    Ok(run_extraction_limit(run, reputation_bonus(run, env)?, config))
}

/// Attempts to extract from the live run.
///
/// The gate is skipped when a blockade was already beaten this run or the
/// gate was passed with no map activity since. Otherwise a clearance item is spent first if
/// requested and available, and the detection roll runs only without one.
pub fn attempt_extraction(
    state: &mut SessionState,
    use_clearance: bool,
    env: &RunEnv<'_>,
    config: &RunConfig,
) -> Result<ExtractionAttempt, ExtractionError> {
    if state.combat.is_some() {
        return Err(ExtractionError::CombatInProgress);
    }
    let SessionState { profile, run, .. } = &mut *state;
    let run = run.as_mut().ok_or(ExtractionError::NoActiveRun)?;

    let skip_gate = run.blockade_cleared()
        || run.flags.contains(RunFlags::EXTRACTION_CLEARED)
        || run
            .interruptions
            .contains(InterruptionKind::BlockadeExtraction);

    if !skip_gate {
        let gate = DetectionGate::new(env.hostiles()?, &config.fallback_blockade_hostile);
        let seed = derive_seed(
            run.map_seed,
            u64::from(run.extraction_attempts),
            EXTRACTION_ROLL,
        );
        let mut rng = SeededRng::new(seed);
        let decision = if use_clearance {
            gate.attempt_with_clearance(profile, run.detection_level, run.map_tier, &mut rng)
        } else {
            gate.attempt_extraction(run.detection_level, run.map_tier, &mut rng)
        };
        run.extraction_attempts += 1;

        if let GateDecision::Blocked { hostile } = decision {
            return Ok(ExtractionAttempt::Blockaded { hostile });
        }
    }

    run.interruptions.take(InterruptionKind::BlockadeExtraction);
    run.flags.insert(RunFlags::EXTRACTION_CLEARED);

    let limit = current_limit(run, env, config)?;
    let collected = run.collected_loot.len();
    if collected > limit as usize {
        return Ok(ExtractionAttempt::SelectionRequired { limit, collected });
    }
    complete_extraction(state, None, env, config).map(ExtractionAttempt::Extracted)
}

/// Descriptor for the blockade combat that follows a blocked attempt.
///
/// Unknown hostiles fight at default difficulty.
pub fn blockade_descriptor(
    hostile: HostileId,
    run: &RunRecord,
    env: &RunEnv<'_>,
) -> Result<CombatEncounterDescriptor, OracleError> {
    let difficulty = env
        .hostiles()?
        .hostile(&hostile)
        .map(|profile| profile.difficulty)
        .unwrap_or_default();
    Ok(CombatEncounterDescriptor::new(
        Encounter::Blockade { ai_id: hostile },
        run.map_tier,
        difficulty,
    ))
}

fn select(
    collected: &[LootItem],
    selection: Option<&[usize]>,
    limit: u32,
) -> Result<Vec<LootItem>, ExtractionError> {
    let Some(indices) = selection else {
        if collected.len() > limit as usize {
            return Err(ExtractionError::SelectionRequired {
                limit,
                collected: collected.len(),
            });
        }
        return Ok(collected.to_vec());
    };

    if indices.len() > limit as usize {
        return Err(ExtractionError::SelectionTooLarge {
            selected: indices.len(),
            limit,
        });
    }
    let mut seen = BTreeSet::new();
    indices
        .iter()
        .map(|&index| {
            if !seen.insert(index) {
                return Err(ExtractionError::DuplicateSelection(index));
            }
            collected
                .get(index)
                .cloned()
                .ok_or(ExtractionError::SelectionOutOfRange(index))
        })
        .collect()
}

/// Successful termination: banks the kept loot and discards the run.
///
/// Credits come strictly from the kept salvage items. Drones are damaged
/// when the ship returns below the configured share of its max hull.
pub fn complete_extraction(
    state: &mut SessionState,
    selection: Option<&[usize]>,
    env: &RunEnv<'_>,
    config: &RunConfig,
) -> Result<ExtractionSummary, ExtractionError> {
    if state.combat.is_some() {
        return Err(ExtractionError::CombatInProgress);
    }
    let run = state.run.as_ref().ok_or(ExtractionError::NoActiveRun)?;
    if !run.flags.contains(RunFlags::EXTRACTION_CLEARED) {
        return Err(ExtractionError::NotCleared);
    }

    let limit = current_limit(run, env, config)?;
    let extracted = select(&run.collected_loot, selection, limit)?;
    let Some(run) = state.run.take() else {
        return Err(ExtractionError::NoActiveRun);
    };

    let extracted_credits = salvage_credit_total(&extracted);
    let extracted_ai_cores = ai_core_total(&extracted);
    let drones_damaged = u64::from(run.hull) * 100
        < u64::from(run.max_hull) * u64::from(config.drone_damage_hull_percent);

    let profile = &mut state.profile;
    profile.credits += extracted_credits;
    profile.ai_cores += extracted_ai_cores;
    profile.reputation += u64::from(run.combat_reputation_earned);
    profile.bank_items(&extracted);
    if drones_damaged {
        profile.mark_drones_damaged(run.ship_slot);
    }

    env.record(MissionEvent::ExtractionCompleted {
        ship_slot: run.ship_slot,
        tier: run.map_tier,
        items: extracted.len() as u32,
    });
    if extracted_credits > 0 {
        env.record(MissionEvent::CreditsEarned {
            amount: extracted_credits,
        });
    }

    Ok(ExtractionSummary {
        ship_slot: run.ship_slot,
        tier: run.map_tier,
        limit,
        discarded: run.collected_loot.len() - extracted.len(),
        extracted,
        extracted_credits,
        extracted_ai_cores,
        reputation_earned: run.combat_reputation_earned,
        drones_damaged,
        hull: run.hull,
        max_hull: run.max_hull,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::{adjust_detection, loot_poi, start_run};
    use crate::state::{HexCoord, Interruption, LootSource, Rarity, SectionKey};
    use crate::testing::Fakes;

    fn session(fakes: &Fakes, slot: u32, items: Vec<LootItem>) -> SessionState {
        let mut state = SessionState::new(fakes.profile());
        start_run(&mut state, slot, 1, 17, &fakes.env()).unwrap();
        state.run.as_mut().unwrap().collected_loot = items;
        state
    }

    fn loot(count: usize) -> Vec<LootItem> {
        (0..count)
            .map(|i| LootItem::salvage("scrap", "Scrap", 10 + i as u64, LootSource::PoiLoot))
            .collect()
    }

    #[test]
    fn zero_detection_extracts_everything_that_fits() {
        let fakes = Fakes::new();
        let mut state = session(&fakes, 0, loot(3));
        let attempt = attempt_extraction(&mut state, false, &fakes.env(), &fakes.config).unwrap();

        let ExtractionAttempt::Extracted(summary) = attempt else {
            panic!("expected extraction, got {attempt:?}");
        };
        assert_eq!(summary.limit, 3);
        assert_eq!(summary.extracted_credits, 10 + 11 + 12);
        assert_eq!(state.profile.credits, 33);
        assert!(state.run.is_none());
    }

    #[test]
    fn over_capacity_requires_selection() {
        let fakes = Fakes::new();
        let mut state = session(&fakes, 0, loot(5));
        let attempt = attempt_extraction(&mut state, false, &fakes.env(), &fakes.config).unwrap();
        assert_eq!(
            attempt,
            ExtractionAttempt::SelectionRequired {
                limit: 3,
                collected: 5
            }
        );

        let env = fakes.env();
        assert_eq!(
            complete_extraction(&mut state, Some(&[0, 1, 2, 3][..]), &env, &fakes.config),
            Err(ExtractionError::SelectionTooLarge {
                selected: 4,
                limit: 3
            })
        );
        assert_eq!(
            complete_extraction(&mut state, Some(&[0, 0][..]), &env, &fakes.config),
            Err(ExtractionError::DuplicateSelection(0))
        );
        assert_eq!(
            complete_extraction(&mut state, Some(&[9][..]), &env, &fakes.config),
            Err(ExtractionError::SelectionOutOfRange(9))
        );

        let summary = complete_extraction(&mut state, Some(&[4, 2][..]), &env, &fakes.config).unwrap();
        assert_eq!(summary.extracted_credits, 14 + 12);
        assert_eq!(summary.discarded, 3);
    }

    #[test]
    fn full_detection_is_blockaded_then_cleared_run_never_rolls_again() {
        let fakes = Fakes::new();
        let mut state = session(&fakes, 0, loot(1));
        state.run.as_mut().unwrap().set_detection(100.0);

        let attempt = attempt_extraction(&mut state, false, &fakes.env(), &fakes.config).unwrap();
        assert_eq!(
            attempt,
            ExtractionAttempt::Blockaded {
                hostile: HostileId::new("interceptor")
            }
        );

        let run = state.run.as_mut().unwrap();
        run.flags.insert(RunFlags::BLOCKADE_CLEARED);
        run.interruptions.insert(Interruption::BlockadeExtraction);
        let attempts = run.extraction_attempts;

        let attempt = attempt_extraction(&mut state, false, &fakes.env(), &fakes.config).unwrap();
        assert!(matches!(attempt, ExtractionAttempt::Extracted(_)));
        assert_eq!(state.profile.credits, 10);
        assert_eq!(attempts, 1);
    }

    #[test]
    fn map_activity_after_selection_reopens_the_gate() {
        let fakes = Fakes::new();
        let mut state = session(&fakes, 0, loot(4));
        let env = fakes.env();
        assert!(matches!(
            attempt_extraction(&mut state, false, &env, &fakes.config),
            Ok(ExtractionAttempt::SelectionRequired { limit: 3, collected: 4 })
        ));

        // Lowering detection keeps the gate passed.
        adjust_detection(&mut state, -5.0, "cloak", &env).unwrap();
        assert!(matches!(
            attempt_extraction(&mut state, false, &env, &fakes.config),
            Ok(ExtractionAttempt::SelectionRequired { .. })
        ));
        assert_eq!(state.run.as_ref().unwrap().extraction_attempts, 1);

        let extra = vec![LootItem::ai_cores(1, LootSource::PoiLoot)];
        assert!(loot_poi(&mut state, HexCoord::new(3, 3), extra).unwrap());
        adjust_detection(&mut state, 100.0, "alarm", &env).unwrap();

        let attempt = attempt_extraction(&mut state, false, &env, &fakes.config).unwrap();
        assert_eq!(
            attempt,
            ExtractionAttempt::Blockaded {
                hostile: HostileId::new("interceptor")
            }
        );
        assert_eq!(state.run.as_ref().unwrap().extraction_attempts, 2);
        assert_eq!(
            complete_extraction(&mut state, Some(&[0][..]), &env, &fakes.config),
            Err(ExtractionError::NotCleared)
        );
    }

    #[test]
    fn clearance_bypasses_full_detection() {
        let fakes = Fakes::new();
        let mut state = session(&fakes, 0, loot(1));
        state.profile.clearance_items = 1;
        state.run.as_mut().unwrap().set_detection(100.0);

        let attempt = attempt_extraction(&mut state, true, &fakes.env(), &fakes.config).unwrap();
        assert!(matches!(attempt, ExtractionAttempt::Extracted(_)));
        assert_eq!(state.profile.clearance_items, 0);
    }

    #[test]
    fn completion_requires_cleared_gate() {
        let fakes = Fakes::new();
        let mut state = session(&fakes, 0, loot(1));
        assert_eq!(
            complete_extraction(&mut state, None, &fakes.env(), &fakes.config),
            Err(ExtractionError::NotCleared)
        );
    }

    #[test]
    fn credits_ignore_running_total_and_non_salvage() {
        let fakes = Fakes::new();
        let items = vec![
            LootItem::salvage("scrap", "Scrap", 70, LootSource::PoiLoot),
            LootItem::card("laser", "Laser", Rarity::Rare, LootSource::CombatSalvage),
            LootItem::ai_cores(2, LootSource::CombatSalvage),
        ];
        let mut state = session(&fakes, 1, items);
        state.run.as_mut().unwrap().credits_earned = 9_999;

        let attempt = attempt_extraction(&mut state, false, &fakes.env(), &fakes.config).unwrap();
        let ExtractionAttempt::Extracted(summary) = attempt else {
            panic!("expected extraction, got {attempt:?}");
        };
        assert_eq!(summary.extracted_credits, 70);
        assert_eq!(summary.extracted_ai_cores, 2);
        assert_eq!(state.profile.inventory.len(), 1);
        assert_eq!(
            fakes.mission.kinds(),
            vec!["run_started", "extraction_completed", "credits_earned"]
        );
    }

    #[test]
    fn returning_below_half_hull_damages_drones() {
        let fakes = Fakes::new();
        let mut state = session(&fakes, 1, loot(1));
        let run = state.run.as_mut().unwrap();
        for key in ["bridge", "power_cell"] {
            if let Some(section) = run.sections.get_mut(&SectionKey::new(key)) {
                section.set_hull(2);
            }
        }
        run.refresh_hull();

        let attempt = attempt_extraction(&mut state, false, &fakes.env(), &fakes.config).unwrap();
        let ExtractionAttempt::Extracted(summary) = attempt else {
            panic!("expected extraction, got {attempt:?}");
        };
        assert!(summary.drones_damaged);
        assert_eq!(state.profile.slot(1).map(|slot| slot.drones_damaged), Some(true));
    }
}
