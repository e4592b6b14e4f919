//! The live run record.

use std::collections::BTreeSet;

use bitflags::bitflags;

use super::ship::{aggregate_hull, damaged_section_count};
use super::{HexCoord, Interruptions, LootItem, ShipSections};
use crate::config::RunConfig;

bitflags! {
    /// Durable guard flags on a run.
    ///
    /// Both flags outlive the combat descriptor they are derived from, so the
    /// outcome resolver and the extraction flow can rely on them after the
    /// descriptor has been cleared.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct RunFlags: u8 {
        /// The in-flight combat is a blockade at the extraction boundary.
        const BLOCKADE_COMBAT  = 1 << 0;
        /// A blockade was already beaten this run; never roll again.
        const BLOCKADE_CLEARED = 1 << 1;
        /// The extraction gate was passed; only loot selection remains.
        /// Revoked by any further map activity.
        const EXTRACTION_CLEARED = 1 << 2;
    }
}

/// Upper bound of the detection percentage.
pub const MAX_DETECTION: f64 = 100.0;

/// The single live run, from map entry to extraction or MIA.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunRecord {
    /// Seed of the procedurally generated map.
    pub map_seed: u64,
    /// Ship slot the run was launched with (0 = starter loadout).
    pub ship_slot: u32,
    pub map_tier: u8,
    /// Detection percentage in `[0, 100]`.
    pub detection_level: f64,
    pub hull: u32,
    pub max_hull: u32,
    pub sections: ShipSections,
    /// Insertion order is display order; never deduplicated.
    pub collected_loot: Vec<LootItem>,
    pub credits_earned: u64,
    pub ai_cores_earned: u32,
    pub combats_won: u32,
    pub combats_lost: u32,
    pub combat_reputation_earned: u32,
    /// Extraction rolls made so far; mixes into the per-attempt roll seed.
    pub extraction_attempts: u32,
    pub looted_poi_coords: BTreeSet<HexCoord>,
    pub fled_poi_coords: BTreeSet<HexCoord>,
    pub interruptions: Interruptions,
    pub flags: RunFlags,
}

impl RunRecord {
    /// Creates a fresh run at full hull with zero detection.
    pub fn new(map_seed: u64, ship_slot: u32, map_tier: u8, sections: ShipSections) -> Self {
        let mut sections = sections;
        sections.values_mut().for_each(|section| section.repair());
        let (hull, max_hull) = aggregate_hull(&sections);

        Self {
            map_seed,
            ship_slot,
            map_tier,
            detection_level: 0.0,
            hull,
            max_hull,
            sections,
            collected_loot: Vec::new(),
            credits_earned: 0,
            ai_cores_earned: 0,
            combats_won: 0,
            combats_lost: 0,
            combat_reputation_earned: 0,
            extraction_attempts: 0,
            looted_poi_coords: BTreeSet::new(),
            fled_poi_coords: BTreeSet::new(),
            interruptions: Interruptions::new(),
            flags: RunFlags::empty(),
        }
    }

    pub fn is_starter(&self) -> bool {
        RunConfig::is_starter_slot(self.ship_slot)
    }

    /// Recomputes aggregate hull from the sections.
    pub fn refresh_hull(&mut self) {
        let (hull, max_hull) = aggregate_hull(&self.sections);
        self.hull = hull;
        self.max_hull = max_hull;
    }

    pub fn damaged_sections(&self) -> u32 {
        damaged_section_count(&self.sections)
    }

    /// Records a looted PoI. Returns `false` if it was already looted.
    pub fn record_looted(&mut self, coord: HexCoord) -> bool {
        self.looted_poi_coords.insert(coord)
    }

    /// Records a PoI the player fled from. Returns `false` if already recorded.
    pub fn record_fled(&mut self, coord: HexCoord) -> bool {
        self.fled_poi_coords.insert(coord)
    }

    pub fn set_detection(&mut self, level: f64) {
        self.detection_level = level.clamp(0.0, MAX_DETECTION);
    }

    pub fn is_blockade_combat(&self) -> bool {
        self.flags.contains(RunFlags::BLOCKADE_COMBAT)
    }

    pub fn blockade_cleared(&self) -> bool {
        self.flags.contains(RunFlags::BLOCKADE_CLEARED)
    }

    /// Revokes a passed extraction gate once the run returns to the map.
    /// A beaten blockade is unaffected.
    pub fn reopen_gate(&mut self) {
        self.flags.remove(RunFlags::EXTRACTION_CLEARED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Lane, SectionKey, ShipSection};

    fn run() -> RunRecord {
        let mut sections = ShipSections::new();
        sections.insert("bridge".into(), ShipSection::new(10, Lane::Left).at_hull(2));
        sections.insert("drone_hub".into(), ShipSection::new(6, Lane::Right));
        RunRecord::new(7, 0, 1, sections)
    }

    #[test]
    fn new_run_starts_at_full_hull() {
        let run = run();
        assert_eq!((run.hull, run.max_hull), (16, 16));
        assert_eq!(run.detection_level, 0.0);
        assert!(run.is_starter());
        assert_eq!(run.damaged_sections(), 0);
    }

    #[test]
    fn looting_same_coordinate_twice_is_idempotent() {
        let mut run = run();
        assert!(run.record_looted(HexCoord::new(3, 4)));
        assert!(!run.record_looted(HexCoord::new(3, 4)));
        assert_eq!(run.looted_poi_coords.len(), 1);

        assert!(run.record_fled(HexCoord::new(0, 1)));
        assert!(!run.record_fled(HexCoord::new(0, 1)));
        assert_eq!(run.fled_poi_coords.len(), 1);
    }

    #[test]
    fn detection_is_clamped() {
        let mut run = run();
        run.set_detection(140.0);
        assert_eq!(run.detection_level, MAX_DETECTION);
        run.set_detection(-3.0);
        assert_eq!(run.detection_level, 0.0);
    }

    #[test]
    fn refresh_hull_tracks_section_changes() {
        let mut run = run();
        if let Some(section) = run.sections.get_mut(&SectionKey::new("bridge")) {
            section.apply_damage(7);
        }
        run.refresh_hull();
        assert_eq!(run.hull, 9);
        assert_eq!(run.damaged_sections(), 1);
    }
}
