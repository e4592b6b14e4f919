//! Session durability across coordinator restarts.
mod common;

use std::collections::BTreeMap;

use common::{STARTER, oracles, profile, regular};
use extraction_core::{
    BattleResult, CombatPhase, Difficulty, SectionKey, ThreatOracle, TransitionTarget,
};
use extraction_runtime::{
    FileSessionRepository, InMemorySessionRepository, RunCoordinator, SessionRepository,
};

fn build(dir: &std::path::Path) -> RunCoordinator {
    RunCoordinator::builder()
        .oracles(oracles())
        .profile(profile())
        .repository(FileSessionRepository::new(dir).expect("repository dir should be created"))
        .session_id("pilot-1")
        .build()
        .expect("coordinator should build")
}

#[test]
fn staged_victory_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut first = build(dir.path());
    first.start_run(STARTER, 1, Some(12)).unwrap();
    first
        .begin_combat(regular("raider", Difficulty::Normal))
        .unwrap();
    let mut hull = BTreeMap::new();
    hull.insert(SectionKey::new("engines"), 6);
    let outcome = first
        .resolve_combat(&BattleResult::victory(hull))
        .unwrap();
    first.save().expect("session should be saved");

    // ================================================================
    // Restart between resolve and finalize
    // ================================================================
    let mut resumed = build(dir.path());
    assert_eq!(resumed.state(), first.state());
    let combat = resumed.state().combat.as_ref().unwrap();
    assert_eq!(combat.phase, CombatPhase::VictoryPendingLootReveal);

    let left = first.finalize_victory().unwrap();
    let right = resumed.finalize_victory().unwrap();
    assert_eq!(left, TransitionTarget::ResumeRun);
    assert_eq!(left, right);
    assert_eq!(first.state(), resumed.state());
    assert_eq!(resumed.run().unwrap().collected_loot, outcome.loot);
}

#[test]
fn detection_keeps_accumulating_after_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut first = build(dir.path());
    first.start_run(STARTER, 1, Some(12)).unwrap();
    first.adjust_detection(60.0, "jump").unwrap();
    first.save().unwrap();

    let mut resumed = build(dir.path());
    assert_eq!(resumed.run().unwrap().detection_level, 60.0);
    assert_eq!(resumed.oracles().threat().current_level(), 60.0);
    assert_eq!(resumed.adjust_detection(10.0, "scan").unwrap(), 70.0);

    // Restoring a hub-side snapshot clears the tracker.
    let hub = RunCoordinator::builder()
        .oracles(oracles())
        .build()
        .unwrap()
        .snapshot()
        .unwrap();
    resumed.restore(&hub).unwrap();
    assert_eq!(resumed.oracles().threat().current_level(), 0.0);
}

#[test]
fn tampered_snapshot_is_rejected() {
    let coordinator = RunCoordinator::builder()
        .oracles(oracles())
        .build()
        .unwrap();
    let mut snapshot = coordinator.snapshot().unwrap();
    if let Some(byte) = snapshot.bytes.first_mut() {
        *byte ^= 0xff;
    }

    let mut other = RunCoordinator::builder()
        .oracles(oracles())
        .build()
        .unwrap();
    assert!(other.restore(&snapshot).is_err());
}

#[test]
fn default_profile_owns_every_loadout() {
    let coordinator = RunCoordinator::builder()
        .oracles(oracles())
        .build()
        .unwrap();
    let slots: Vec<u32> = coordinator.profile().ship_slots.keys().copied().collect();
    assert_eq!(slots, vec![0, 1]);
}

#[test]
fn memory_repository_round_trips_sessions() {
    let repository = InMemorySessionRepository::new();
    let coordinator = RunCoordinator::builder()
        .oracles(oracles())
        .profile(profile())
        .build()
        .unwrap();

    let snapshot = coordinator.snapshot().unwrap();
    repository.save("pilot-2", &snapshot).unwrap();
    assert!(repository.exists("pilot-2"));
    assert_eq!(repository.load("pilot-2").unwrap(), Some(snapshot));
    assert_eq!(repository.list_sessions().unwrap(), vec!["pilot-2".to_owned()]);

    repository.delete("pilot-2").unwrap();
    assert!(repository.load("pilot-2").unwrap().is_none());
}
