//! Per-section hull bookkeeping.

use std::collections::BTreeMap;

use super::SectionKey;
use crate::config::RunConfig;

/// Lane a ship section occupies in combat.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Lane {
    Left,
    #[default]
    Middle,
    Right,
}

/// Hull state of one ship section.
///
/// Invariant: `hull <= max_hull`. A section is damaged when
/// `hull <= damaged_threshold`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipSection {
    hull: u32,
    max_hull: u32,
    damaged_threshold: u32,
    lane: Lane,
}

impl ShipSection {
    /// Creates a section at full hull with the default damaged threshold.
    pub const fn new(max_hull: u32, lane: Lane) -> Self {
        Self::with_threshold(max_hull, RunConfig::DEFAULT_DAMAGED_THRESHOLD, lane)
    }

    pub const fn with_threshold(max_hull: u32, damaged_threshold: u32, lane: Lane) -> Self {
        Self {
            hull: max_hull,
            max_hull,
            damaged_threshold,
            lane,
        }
    }

    /// Returns a copy with hull set, clamped to `[0, max_hull]`.
    #[must_use]
    pub fn at_hull(mut self, hull: u32) -> Self {
        self.set_hull(hull);
        self
    }

    pub const fn hull(&self) -> u32 {
        self.hull
    }

    pub const fn max_hull(&self) -> u32 {
        self.max_hull
    }

    pub const fn damaged_threshold(&self) -> u32 {
        self.damaged_threshold
    }

    pub const fn lane(&self) -> Lane {
        self.lane
    }

    pub const fn is_damaged(&self) -> bool {
        self.hull <= self.damaged_threshold
    }

    pub fn set_hull(&mut self, hull: u32) {
        self.hull = hull.min(self.max_hull);
    }

    /// Removes `points` of hull, flooring at zero.
    pub fn apply_damage(&mut self, points: u32) {
        self.hull = self.hull.saturating_sub(points);
    }

    /// Restores the section to full hull.
    pub fn repair(&mut self) {
        self.hull = self.max_hull;
    }
}

/// Sections keyed for deterministic iteration.
pub type ShipSections = BTreeMap<SectionKey, ShipSection>;

/// Aggregate `(hull, max_hull)` across all sections.
pub fn aggregate_hull(sections: &ShipSections) -> (u32, u32) {
    sections.values().fold((0, 0), |(hull, max), section| {
        (hull + section.hull(), max + section.max_hull())
    })
}

/// Number of sections currently at or below their damaged threshold.
pub fn damaged_section_count(sections: &ShipSections) -> u32 {
    sections.values().filter(|section| section.is_damaged()).count() as u32
}
