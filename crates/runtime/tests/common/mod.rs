//! Shared in-memory fixtures for coordinator scenarios.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use extraction_content::{BlueprintEntry, CardEntry, LootTables, SalvageEntry};
use extraction_core::{
    BlueprintId, BossConfig, BossId, BossReward, CombatEncounterDescriptor, DamageRange, DeckId,
    Difficulty, Encounter, HostileId, HostileProfile, Lane, Loadout, LootItem, LootSource,
    PlayerProfile, Rarity, SectionKey, ShipSection, ShipSections, state::ShipSlot,
};
use extraction_runtime::{
    EventBus, HostileOracleImpl, LoadoutOracleImpl, LootOracleImpl, OracleManager,
    ReputationOracleImpl, RunCoordinator, ThreatTracker,
};

pub const STARTER: u32 = 0;
pub const CORSAIR: u32 = 1;

pub fn hostile(id: &str, difficulty: Difficulty, damage: Option<DamageRange>) -> HostileProfile {
    HostileProfile {
        id: HostileId::new(id),
        deck: DeckId::new(format!("{id}_deck")),
        difficulty,
        damage,
    }
}

pub fn hostiles() -> HostileOracleImpl {
    let mut oracle = HostileOracleImpl::new();
    oracle.add_hostile(hostile("raider", Difficulty::Normal, Some(DamageRange::new(1, 2))));
    oracle.add_hostile(hostile(
        "interceptor",
        Difficulty::Hard,
        Some(DamageRange::new(2, 4)),
    ));
    oracle.add_hostile(hostile("blockade_warden", Difficulty::Hard, None));
    oracle.set_roster(1, vec![HostileId::new("interceptor")]);
    oracle.add_boss(BossConfig {
        id: BossId::new("dreadnought"),
        difficulty: Difficulty::Elite,
        first_time: BossReward {
            credits: 500,
            ai_cores: 3,
            reputation: 100,
        },
        repeat: BossReward {
            credits: 100,
            ai_cores: 1,
            reputation: 20,
        },
    });
    oracle
}

/// Single-entry pools so every roll is predictable.
pub fn loot_tables() -> LootTables {
    let mut tables = LootTables {
        salvage: vec![SalvageEntry {
            id: "scrap".to_owned(),
            name: "Scrap Plating".to_owned(),
            base_credits: 20,
        }],
        ..LootTables::default()
    };
    for deck in ["raider_deck", "interceptor_deck", "blockade_warden_deck"] {
        tables.decks.insert(
            DeckId::new(deck),
            vec![CardEntry {
                card_id: format!("{deck}_card"),
                name: "Salvaged Card".to_owned(),
                rarity: Rarity::Common,
            }],
        );
    }
    tables.blueprints.insert(
        "drone".to_owned(),
        vec![BlueprintEntry {
            id: BlueprintId::new("wasp"),
            blueprint_type: "drone".to_owned(),
            rarity: Rarity::Common,
            payload: "interceptor".to_owned(),
        }],
    );
    tables
}

fn sections(keys: &[&str], max_hull: u32) -> ShipSections {
    keys.iter()
        .map(|key| (SectionKey::new(*key), ShipSection::new(max_hull, Lane::Middle)))
        .collect()
}

pub fn loadouts() -> LoadoutOracleImpl {
    let mut loadouts = BTreeMap::new();
    loadouts.insert(
        STARTER,
        Loadout {
            name: "Starter Skiff".to_owned(),
            sections: sections(&["bridge", "engines", "power_cell"], 10),
            value: 10,
        },
    );
    loadouts.insert(
        CORSAIR,
        Loadout {
            name: "Corsair".to_owned(),
            sections: sections(&["bridge", "cargo_bay", "engines", "power_cell"], 12),
            value: 40,
        },
    );
    LoadoutOracleImpl::new(loadouts)
}

pub fn oracles() -> OracleManager {
    let hostiles = Arc::new(hostiles());
    OracleManager::new(
        Arc::new(LootOracleImpl::new(loot_tables(), 11)),
        Arc::new(ThreatTracker::new()),
        Arc::new(ReputationOracleImpl::new(Arc::clone(&hostiles))),
        hostiles,
        Arc::new(loadouts()),
        EventBus::new(),
    )
}

pub fn profile() -> PlayerProfile {
    let mut profile = PlayerProfile::new();
    profile.ship_slots.insert(CORSAIR, ShipSlot::default());
    profile
}

pub fn coordinator_with(profile: PlayerProfile) -> RunCoordinator {
    RunCoordinator::builder()
        .oracles(oracles())
        .profile(profile)
        .build()
        .expect("coordinator should build from in-memory oracles")
}

pub fn coordinator() -> RunCoordinator {
    coordinator_with(profile())
}

pub fn regular(ai_id: &str, difficulty: Difficulty) -> CombatEncounterDescriptor {
    CombatEncounterDescriptor::new(
        Encounter::Regular {
            ai_id: HostileId::new(ai_id),
        },
        1,
        difficulty,
    )
}

pub fn salvage(id: &str, credits: u64) -> LootItem {
    LootItem::salvage(id, id, credits, LootSource::PoiLoot)
}

pub fn card(id: &str) -> LootItem {
    LootItem::card(id, id, Rarity::Common, LootSource::PoiLoot)
}
