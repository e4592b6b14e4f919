//! Scripted demonstration run.
//!
//! Flies one run end to end against whatever content the coordinator was
//! built with: loot a PoI, win an ambush, then extract, fighting through a
//! blockade and trimming loot to capacity when required.

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use extraction_core::{
    BattleResult, CombatEncounterDescriptor, Difficulty, Encounter, ExtractionAttempt,
    ExtractionSummary, HexCoord, HostileId, LootItem, LootSource, TransitionTarget,
};
use extraction_runtime::RunCoordinator;

/// Hostile that ambushes the scripted PoI.
const AMBUSH_HOSTILE: &str = "raider";
/// A beaten blockade skips the gate, so two attempts always suffice.
const MAX_EXTRACTION_ATTEMPTS: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DemoSettings {
    pub ship_slot: u32,
    pub tier: u8,
    pub seed: Option<u64>,
}

/// Wins the combat in flight without hull loss and banks its salvage.
fn win_current_combat(coordinator: &mut RunCoordinator) -> Result<TransitionTarget> {
    let outcome = coordinator.resolve_combat(&BattleResult::victory(BTreeMap::new()))?;
    tracing::info!(
        items = outcome.loot.len(),
        message = %outcome.message,
        "combat won"
    );

    let mut transition = coordinator.finalize_victory()?;
    if transition == TransitionTarget::AwaitBlueprintAccept {
        transition = coordinator.accept_blueprint()?;
    }
    Ok(transition)
}

fn poi_loot(tier: u8) -> Vec<LootItem> {
    let tier = u64::from(tier);
    vec![
        LootItem::salvage("hull_plating", "Hull Plating", 15 * tier, LootSource::PoiLoot),
        LootItem::salvage("data_core", "Data Core", 25 * tier, LootSource::PoiLoot),
    ]
}

/// Drives a full run and returns the extraction summary.
///
/// A session resumed with a run still live is abandoned first so the demo
/// always starts from the hub.
pub fn run_demo(
    coordinator: &mut RunCoordinator,
    settings: DemoSettings,
) -> Result<ExtractionSummary> {
    if coordinator.run().is_some() || coordinator.state().in_combat() {
        tracing::warn!("resumed session has a live run; abandoning it before the demo");
        coordinator.abandon_run();
    }
    coordinator.return_to_hub();

    let map_seed = coordinator.start_run(settings.ship_slot, settings.tier, settings.seed)?;
    tracing::info!(map_seed, "demo run started");

    coordinator.loot_poi(HexCoord::new(1, 0), poi_loot(settings.tier))?;

    let ambush = CombatEncounterDescriptor::new(
        Encounter::Regular {
            ai_id: HostileId::new(AMBUSH_HOSTILE),
        },
        settings.tier,
        Difficulty::Normal,
    );
    coordinator.begin_combat(ambush)?;
    win_current_combat(coordinator)?;
    // A won fight resets tracking; the patrol spots the ship on the way out.
    coordinator.adjust_detection(35.0, "patrol sighting")?;
    coordinator.save()?;

    for _ in 0..MAX_EXTRACTION_ATTEMPTS {
        let limit = coordinator.extraction_limit()?;
        match coordinator.attempt_extraction(false)? {
            ExtractionAttempt::Extracted(summary) => return Ok(summary),
            ExtractionAttempt::SelectionRequired { limit, collected } => {
                tracing::info!(limit, collected, "over capacity; keeping the first items");
                let keep: Vec<usize> = (0..limit as usize).collect();
                return Ok(coordinator.complete_extraction(Some(&keep))?);
            }
            ExtractionAttempt::Blockaded { hostile } => {
                tracing::info!(hostile = %hostile, limit, "fighting through the blockade");
                win_current_combat(coordinator)?;
                coordinator.save()?;
            }
        }
    }
    bail!("extraction did not complete after {MAX_EXTRACTION_ATTEMPTS} attempts")
}
