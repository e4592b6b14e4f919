//! Extraction scenarios driven through the coordinator.
mod common;

use std::collections::BTreeMap;

use common::{CORSAIR, STARTER, card, coordinator, coordinator_with, profile, regular, salvage};
use extraction_core::{
    BattleResult, Difficulty, ExtractionAttempt, HexCoord, HostileId, SectionKey, TransitionTarget,
};

#[test]
fn starter_extracts_salvage_credits_only() {
    let mut coordinator = coordinator();
    coordinator
        .start_run(STARTER, 1, Some(7))
        .expect("starter run should start");

    coordinator
        .loot_poi(HexCoord::new(1, 0), vec![salvage("plating", 40), card("flak")])
        .expect("poi should be looted");

    let attempt = coordinator
        .attempt_extraction(false)
        .expect("extraction should be attempted");
    let ExtractionAttempt::Extracted(summary) = attempt else {
        panic!("detection is zero; expected a clean extraction, got {attempt:?}");
    };

    assert_eq!(summary.limit, 3);
    assert_eq!(summary.extracted.len(), 2);
    assert_eq!(summary.discarded, 0);
    assert_eq!(summary.extracted_credits, 40);

    let profile = coordinator.profile();
    assert_eq!(profile.credits, 40);
    assert_eq!(profile.reputation, 0);
    assert_eq!(profile.inventory.len(), 1);
    assert!(coordinator.run().is_none());
}

#[test]
fn custom_loadout_limit_counts_bonus_and_damage() {
    let mut start = profile();
    start.reputation = 200;
    let mut coordinator = coordinator_with(start);
    coordinator
        .start_run(CORSAIR, 1, Some(9))
        .expect("corsair run should start");
    assert_eq!(coordinator.extraction_limit().unwrap(), 8);

    // ================================================================
    // Win a fight that leaves the bridge damaged
    // ================================================================
    coordinator
        .begin_combat(regular("raider", Difficulty::Normal))
        .expect("combat should start");
    let mut hull = BTreeMap::new();
    hull.insert(SectionKey::new("bridge"), 3);
    let outcome = coordinator
        .resolve_combat(&BattleResult::victory(hull))
        .expect("victory should resolve");
    assert_eq!(outcome.loot.len(), 2);
    assert_eq!(
        coordinator.finalize_victory().unwrap(),
        TransitionTarget::ResumeRun
    );
    assert_eq!(coordinator.extraction_limit().unwrap(), 7);

    let items = (0..5)
        .map(|i| salvage(&format!("crate_{i}"), 10))
        .collect();
    coordinator
        .loot_poi(HexCoord::new(2, -1), items)
        .expect("poi should be looted");

    let attempt = coordinator.attempt_extraction(false).unwrap();
    let ExtractionAttempt::Extracted(summary) = attempt else {
        panic!("seven items fit a limit of seven, got {attempt:?}");
    };
    assert_eq!(summary.limit, 7);
    assert_eq!(summary.extracted.len(), 7);
    // Raider at normal difficulty pays 25, minus 4 for a loadout worth 40.
    assert_eq!(summary.reputation_earned, 21);
    assert_eq!(coordinator.profile().reputation, 221);
}

#[test]
fn over_capacity_requires_selection() {
    let mut start = profile();
    start.reputation = 200;
    let mut coordinator = coordinator_with(start);
    coordinator.start_run(CORSAIR, 1, Some(9)).unwrap();

    coordinator.begin_combat(regular("raider", Difficulty::Normal)).unwrap();
    let mut hull = BTreeMap::new();
    hull.insert(SectionKey::new("bridge"), 3);
    coordinator
        .resolve_combat(&BattleResult::victory(hull))
        .unwrap();
    coordinator.finalize_victory().unwrap();

    let items = (0..6)
        .map(|i| salvage(&format!("crate_{i}"), 10))
        .collect();
    coordinator.loot_poi(HexCoord::new(0, 3), items).unwrap();

    let attempt = coordinator.attempt_extraction(false).unwrap();
    assert_eq!(
        attempt,
        ExtractionAttempt::SelectionRequired {
            limit: 7,
            collected: 8
        }
    );
    assert!(coordinator.run().is_some(), "run stays live until selection");

    // A selection larger than the limit is refused; the run survives.
    let too_many: Vec<usize> = (0..8).collect();
    assert!(coordinator.complete_extraction(Some(&too_many)).is_err());
    assert!(coordinator.run().is_some());

    let keep: Vec<usize> = (1..8).collect();
    let summary = coordinator
        .complete_extraction(Some(&keep))
        .expect("selection within the limit should extract");
    assert_eq!(summary.extracted.len(), 7);
    assert_eq!(summary.discarded, 1);
    assert!(coordinator.run().is_none());
}

#[test]
fn beaten_blockade_never_rolls_again() {
    let mut coordinator = coordinator();
    coordinator.start_run(STARTER, 1, Some(3)).unwrap();
    coordinator
        .adjust_detection(100.0, "sensor sweep")
        .expect("detection should be adjusted");

    let attempt = coordinator.attempt_extraction(false).unwrap();
    assert_eq!(
        attempt,
        ExtractionAttempt::Blockaded {
            hostile: HostileId::new("interceptor")
        }
    );
    assert!(coordinator.state().in_combat(), "blockade combat starts");
    assert!(coordinator.run().unwrap().is_blockade_combat());

    let outcome = coordinator
        .resolve_combat(&BattleResult::victory(BTreeMap::new()))
        .expect("blockade victory should resolve");
    assert_eq!(outcome.loot.len(), 3);
    assert_eq!(
        coordinator.finalize_victory().unwrap(),
        TransitionTarget::ReturnToMapAutoExtract
    );

    coordinator.adjust_detection(100.0, "still hot").unwrap();
    assert_eq!(coordinator.run().unwrap().extraction_attempts, 1);

    let attempt = coordinator.attempt_extraction(false).unwrap();
    let ExtractionAttempt::Extracted(summary) = attempt else {
        panic!("a beaten blockade must not roll again, got {attempt:?}");
    };
    assert_eq!(summary.extracted.len(), 3);
    assert_eq!(summary.extracted_credits, 30);
    assert_eq!(summary.extracted_ai_cores, 1);

    let profile = coordinator.profile();
    assert_eq!(profile.credits, 30);
    assert_eq!(profile.ai_cores, 1);
    // Hard hostile earns 59 against the skiff, capped at 50 on tier 1.
    assert_eq!(profile.reputation, 50);
}

#[test]
fn returning_to_the_map_after_selection_rolls_again() {
    let mut coordinator = coordinator();
    coordinator.start_run(STARTER, 1, Some(6)).unwrap();
    let items = (0..4).map(|i| salvage("scrap", 5 + i)).collect();
    coordinator.loot_poi(HexCoord::new(2, 0), items).unwrap();

    assert_eq!(
        coordinator.attempt_extraction(false).unwrap(),
        ExtractionAttempt::SelectionRequired {
            limit: 3,
            collected: 4
        }
    );

    // Back to the map instead of choosing: one more fight, then full alert.
    coordinator
        .begin_combat(regular("raider", Difficulty::Normal))
        .unwrap();
    coordinator
        .resolve_combat(&BattleResult::victory(BTreeMap::new()))
        .unwrap();
    coordinator.finalize_victory().unwrap();
    coordinator.adjust_detection(100.0, "alarm").unwrap();
    assert_eq!(coordinator.run().unwrap().collected_loot.len(), 6);

    let attempt = coordinator.attempt_extraction(false).unwrap();
    assert_eq!(
        attempt,
        ExtractionAttempt::Blockaded {
            hostile: HostileId::new("interceptor")
        }
    );
    assert_eq!(coordinator.run().unwrap().extraction_attempts, 2);
}

#[test]
fn clearance_item_bypasses_detection() {
    let mut coordinator = coordinator();
    coordinator.grant_clearance(1);
    coordinator.start_run(STARTER, 1, Some(5)).unwrap();
    coordinator.adjust_detection(100.0, "alarm").unwrap();

    let attempt = coordinator.attempt_extraction(true).unwrap();
    assert!(matches!(attempt, ExtractionAttempt::Extracted(_)));
    assert_eq!(coordinator.profile().clearance_items, 0);
}
