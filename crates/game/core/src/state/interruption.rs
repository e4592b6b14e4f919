//! Pending sub-states that interrupt the normal map flow.
//!
//! A run can carry several interruptions at once (a PoI ambush preserves its
//! PoI loot while a blueprint waits to be accepted), but never two of the same
//! kind. [`Interruptions`] stores at most one entry per [`InterruptionKind`].

use arrayvec::ArrayVec;

use super::{HexCoord, LootItem};

/// Reward attached to a point of interest.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PoiRewardType {
    /// Regular salvage.
    #[default]
    Standard,
    /// A drone blueprint drawn from `category` on victory.
    DroneBlueprint { category: String },
}

impl PoiRewardType {
    pub fn blueprint_category(&self) -> Option<&str> {
        match self {
            Self::DroneBlueprint { category } => Some(category),
            Self::Standard => None,
        }
    }
}

/// Combat that interrupted a PoI visit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoiCombat {
    pub coord: HexCoord,
    /// Combat was triggered from the incremental salvage screen; PoI loot is
    /// then presented separately instead of merged into combat salvage.
    pub from_salvage: bool,
    /// Waypoints the player still had queued when the combat began.
    pub remaining_waypoints: Vec<HexCoord>,
    pub reward: PoiRewardType,
}

/// How far an incremental salvage had progressed when it was interrupted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SalvageProgress {
    pub revealed: u32,
    pub total: u32,
}

/// PoI loot generated before a combat, waiting to be offered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingSalvage {
    pub loot: Vec<LootItem>,
    pub progress: Option<SalvageProgress>,
}

/// Blueprint won from a drone-blueprint PoI, revealed in its own step.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingBlueprint {
    pub blueprint: LootItem,
    pub coord: Option<HexCoord>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum InterruptionKind {
    PoiCombat,
    Salvage,
    BlockadeExtraction,
    BlueprintReward,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Interruption {
    PoiCombat(PoiCombat),
    Salvage(PendingSalvage),
    /// A blockade was cleared; extraction triggers on return to the map.
    BlockadeExtraction,
    BlueprintReward(PendingBlueprint),
}

impl Interruption {
    pub const fn kind(&self) -> InterruptionKind {
        match self {
            Self::PoiCombat(_) => InterruptionKind::PoiCombat,
            Self::Salvage(_) => InterruptionKind::Salvage,
            Self::BlockadeExtraction => InterruptionKind::BlockadeExtraction,
            Self::BlueprintReward(_) => InterruptionKind::BlueprintReward,
        }
    }
}

const KIND_COUNT: usize = 4;

/// At most one interruption per kind, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interruptions {
    slots: ArrayVec<Interruption, KIND_COUNT>,
}

impl Interruptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn contains(&self, kind: InterruptionKind) -> bool {
        self.slots.iter().any(|slot| slot.kind() == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interruption> {
        self.slots.iter()
    }

    /// Inserts an interruption, returning the one of the same kind it replaced.
    pub fn insert(&mut self, interruption: Interruption) -> Option<Interruption> {
        let replaced = self.take(interruption.kind());
        // One slot per kind, so a free slot always exists after `take`.
        self.slots.push(interruption);
        replaced
    }

    pub fn take(&mut self, kind: InterruptionKind) -> Option<Interruption> {
        let index = self.slots.iter().position(|slot| slot.kind() == kind)?;
        Some(self.slots.remove(index))
    }

    pub fn poi_combat(&self) -> Option<&PoiCombat> {
        self.slots.iter().find_map(|slot| match slot {
            Interruption::PoiCombat(poi) => Some(poi),
            _ => None,
        })
    }

    pub fn salvage(&self) -> Option<&PendingSalvage> {
        self.slots.iter().find_map(|slot| match slot {
            Interruption::Salvage(salvage) => Some(salvage),
            _ => None,
        })
    }

    pub fn blueprint(&self) -> Option<&PendingBlueprint> {
        self.slots.iter().find_map(|slot| match slot {
            Interruption::BlueprintReward(blueprint) => Some(blueprint),
            _ => None,
        })
    }

    pub fn take_poi_combat(&mut self) -> Option<PoiCombat> {
        match self.take(InterruptionKind::PoiCombat)? {
            Interruption::PoiCombat(poi) => Some(poi),
            _ => None,
        }
    }

    pub fn take_salvage(&mut self) -> Option<PendingSalvage> {
        match self.take(InterruptionKind::Salvage)? {
            Interruption::Salvage(salvage) => Some(salvage),
            _ => None,
        }
    }

    pub fn take_blueprint(&mut self) -> Option<PendingBlueprint> {
        match self.take(InterruptionKind::BlueprintReward)? {
            Interruption::BlueprintReward(blueprint) => Some(blueprint),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LootSource;
    use strum::IntoEnumIterator;

    fn poi(from_salvage: bool) -> Interruption {
        Interruption::PoiCombat(PoiCombat {
            coord: HexCoord::new(1, 2),
            from_salvage,
            remaining_waypoints: vec![HexCoord::new(2, 2), HexCoord::new(3, 2)],
            reward: PoiRewardType::Standard,
        })
    }

    #[test]
    fn insert_replaces_same_kind() {
        let mut pending = Interruptions::new();
        assert!(pending.insert(poi(false)).is_none());
        let replaced = pending.insert(poi(true));
        assert_eq!(replaced, Some(poi(false)));
        assert_eq!(pending.len(), 1);
        assert!(pending.poi_combat().unwrap().from_salvage);
    }

    #[test]
    fn every_kind_fits_at_once() {
        let mut pending = Interruptions::new();
        pending.insert(poi(false));
        pending.insert(Interruption::Salvage(PendingSalvage::default()));
        pending.insert(Interruption::BlockadeExtraction);
        pending.insert(Interruption::BlueprintReward(PendingBlueprint {
            blueprint: LootItem::ai_cores(1, LootSource::BlueprintPoi),
            coord: None,
        }));
        for kind in InterruptionKind::iter() {
            assert!(pending.contains(kind), "missing {kind}");
        }
    }

    #[test]
    fn take_removes_only_requested_kind() {
        let mut pending = Interruptions::new();
        pending.insert(poi(false));
        pending.insert(Interruption::BlockadeExtraction);

        assert!(pending.take(InterruptionKind::BlockadeExtraction).is_some());
        assert!(pending.take(InterruptionKind::BlockadeExtraction).is_none());
        let poi = pending.take_poi_combat().unwrap();
        assert_eq!(poi.remaining_waypoints.len(), 2);
        assert!(pending.is_empty());
    }
}
