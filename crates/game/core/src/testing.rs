//! In-memory collaborators for unit tests.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use crate::config::RunConfig;
use crate::env::{
    BlueprintDraw, BossConfig, BossReward, Difficulty, HostileOracle, HostileProfile, Loadout,
    LoadoutOracle, LootOracle, MissionEvent, MissionOracle, ReputationAward, ReputationOracle,
    RunEnv, ThreatOracle,
};
use crate::escape::DamageRange;
use crate::state::{
    BlueprintId, BossId, DeckId, HostileId, Lane, LootItem, LootKind, LootSource, PlayerProfile,
    Rarity, ShipSection, ShipSections, ShipSlot,
};

pub struct FakeLoot {
    pub salvage: Vec<LootItem>,
    /// `None` reports the category as exhausted.
    pub blueprint: Option<LootItem>,
}

impl LootOracle for FakeLoot {
    fn generate_salvage(&self, _: &DeckId, _: u8, _: Difficulty) -> Vec<LootItem> {
        self.salvage.clone()
    }

    fn generate_blueprint(&self, _: &str, _: u8, _: &BTreeSet<BlueprintId>) -> BlueprintDraw {
        match &self.blueprint {
            Some(item) => BlueprintDraw::Granted(item.clone()),
            None => BlueprintDraw::Exhausted,
        }
    }
}

#[derive(Default)]
pub struct FakeThreat {
    level: Mutex<f64>,
    pub resets: Mutex<u32>,
}

impl FakeThreat {
    pub fn set(&self, level: f64) {
        if let Ok(mut current) = self.level.lock() {
            *current = level;
        }
    }

    pub fn reset_count(&self) -> u32 {
        self.resets.lock().map_or(0, |count| *count)
    }
}

impl ThreatOracle for FakeThreat {
    fn current_level(&self) -> f64 {
        self.level.lock().map_or(0.0, |level| *level)
    }

    fn adjust_level(&self, delta: f64, _: &str) {
        if let Ok(mut level) = self.level.lock() {
            *level = (*level + delta).clamp(0.0, 100.0);
        }
    }

    fn reset_tracking(&self) {
        self.set(0.0);
        if let Ok(mut count) = self.resets.lock() {
            *count += 1;
        }
    }
}

pub struct FakeReputation {
    pub bonus: u32,
    pub per_combat: u32,
}

impl ReputationOracle for FakeReputation {
    fn extraction_bonus(&self) -> u32 {
        self.bonus
    }

    fn compute_combat_reputation(&self, _: u32, _: &HostileId, tier_cap: u32) -> ReputationAward {
        ReputationAward {
            earned: self.per_combat.min(tier_cap),
            was_capped: self.per_combat > tier_cap,
        }
    }
}

#[derive(Default)]
pub struct RecordingMission {
    events: Mutex<Vec<MissionEvent>>,
}

impl RecordingMission {
    pub fn events(&self) -> Vec<MissionEvent> {
        self.events.lock().map_or_else(|_| Vec::new(), |events| events.clone())
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.events().iter().map(MissionEvent::kind).collect()
    }
}

impl MissionOracle for RecordingMission {
    fn record(&self, event: MissionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

pub struct FakeHostiles {
    pub roster: Vec<HostileId>,
    pub hostiles: BTreeMap<HostileId, HostileProfile>,
    pub bosses: BTreeMap<BossId, BossConfig>,
}

impl HostileOracle for FakeHostiles {
    fn high_threat_roster(&self, _: u8) -> Vec<HostileId> {
        self.roster.clone()
    }

    fn hostile(&self, id: &HostileId) -> Option<HostileProfile> {
        self.hostiles.get(id).cloned()
    }

    fn boss(&self, id: &BossId) -> Option<BossConfig> {
        self.bosses.get(id).cloned()
    }
}

pub struct FakeLoadouts {
    pub loadouts: BTreeMap<u32, Loadout>,
}

impl LoadoutOracle for FakeLoadouts {
    fn loadout(&self, ship_slot: u32) -> Option<Loadout> {
        self.loadouts.get(&ship_slot).cloned()
    }
}

fn hostile(id: &str, difficulty: Difficulty, damage: DamageRange) -> (HostileId, HostileProfile) {
    let profile = HostileProfile {
        id: HostileId::new(id),
        deck: DeckId::new(format!("{id}_deck")),
        difficulty,
        damage: Some(damage),
    };
    (profile.id.clone(), profile)
}

fn sections(max_hull: u32) -> ShipSections {
    let mut sections = ShipSections::new();
    sections.insert("bridge".into(), ShipSection::new(max_hull, Lane::Left));
    sections.insert("power_cell".into(), ShipSection::new(max_hull, Lane::Middle));
    sections.insert("drone_hub".into(), ShipSection::new(max_hull, Lane::Right));
    sections
}

pub fn blueprint(id: &str) -> LootItem {
    LootItem::new(
        LootKind::Blueprint {
            blueprint_id: BlueprintId::new(id),
            blueprint_type: "drone".into(),
            rarity: Rarity::Rare,
            payload: String::new(),
        },
        LootSource::BlueprintPoi,
    )
}

/// One of each collaborator with small, predictable data.
pub struct Fakes {
    pub config: RunConfig,
    pub loot: FakeLoot,
    pub threat: FakeThreat,
    pub reputation: FakeReputation,
    pub mission: RecordingMission,
    pub hostiles: FakeHostiles,
    pub loadouts: FakeLoadouts,
}

impl Fakes {
    pub fn new() -> Self {
        let loot = FakeLoot {
            salvage: vec![
                LootItem::salvage("scrap", "Scrap", 40, LootSource::CombatSalvage),
                LootItem::ai_cores(1, LootSource::CombatSalvage),
            ],
            blueprint: Some(blueprint("wasp")),
        };

        let hostiles = FakeHostiles {
            roster: vec![HostileId::new("interceptor")],
            hostiles: [
                hostile("raider", Difficulty::Normal, DamageRange::new(1, 2)),
                hostile("interceptor", Difficulty::Hard, DamageRange::new(2, 4)),
                hostile("juggernaut", Difficulty::Elite, DamageRange::fixed(300)),
            ]
            .into_iter()
            .collect(),
            bosses: [(
                BossId::new("dreadnought"),
                BossConfig {
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
                },
            )]
            .into_iter()
            .collect(),
        };

        let loadouts = FakeLoadouts {
            loadouts: [
                (
                    0,
                    Loadout {
                        name: "Starter".into(),
                        sections: sections(10),
                        value: 10,
                    },
                ),
                (
                    1,
                    Loadout {
                        name: "Corsair".into(),
                        sections: sections(12),
                        value: 40,
                    },
                ),
            ]
            .into_iter()
            .collect(),
        };

        Self {
            config: RunConfig::new(),
            loot,
            threat: FakeThreat::default(),
            reputation: FakeReputation {
                bonus: 2,
                per_combat: 30,
            },
            mission: RecordingMission::default(),
            hostiles,
            loadouts,
        }
    }

    pub fn env(&self) -> RunEnv<'_> {
        RunEnv::with_all(
            &self.loot,
            &self.threat,
            &self.reputation,
            &self.mission,
            &self.hostiles,
            &self.loadouts,
        )
    }

    /// Profile owning the starter slot and custom slot 1.
    pub fn profile(&self) -> PlayerProfile {
        let mut profile = PlayerProfile::new();
        profile.ship_slots.insert(1, ShipSlot::default());
        profile
    }
}
