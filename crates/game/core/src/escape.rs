//! Escape damage distribution.
//!
//! A failed evasion rolls one total damage value inside the hostile's range
//! and applies it as single-point hits, each hit landing on an independently
//! chosen section.

use crate::env::SeededRng;
use crate::state::{RunRecord, SectionKey, ShipSections};

/// Inclusive `[min, max]` total damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRange {
    pub min: u32,
    pub max: u32,
}

impl DamageRange {
    /// Creates a range; swapped bounds are normalized.
    pub const fn new(min: u32, max: u32) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub const fn fixed(amount: u32) -> Self {
        Self::new(amount, amount)
    }
}

/// Everything a presentation layer needs to replay an escape.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EscapeOutcome {
    pub sections_before: ShipSections,
    pub sections_after: ShipSections,
    /// Section hit by each damage point, in roll order.
    pub hits: Vec<SectionKey>,
    pub total_damage: u32,
    /// Every section ended at or below its damaged threshold.
    pub destroyed: bool,
}

impl EscapeOutcome {
    /// Writes the damaged sections and recomputed hull back into the run.
    pub fn apply_to(&self, run: &mut RunRecord) {
        run.sections = self.sections_after.clone();
        run.refresh_hull();
    }
}

/// Rolls and distributes escape damage.
///
/// The same `rng` state always yields the same total, hit sequence, and
/// destroyed verdict.
pub fn resolve_escape(
    sections: &ShipSections,
    damage: DamageRange,
    rng: &mut SeededRng,
) -> EscapeOutcome {
    let keys: Vec<&SectionKey> = sections.keys().collect();
    let total_damage = rng.range_inclusive(damage.min, damage.max);

    let mut after = sections.clone();
    let mut hits = Vec::with_capacity(total_damage as usize);

    if !keys.is_empty() {
        for _ in 0..total_damage {
            let key = keys[rng.index(keys.len())];
            if let Some(section) = after.get_mut(key) {
                section.apply_damage(1);
            }
            hits.push(key.clone());
        }
    }

    let destroyed = !after.is_empty() && after.values().all(|section| section.is_damaged());

    EscapeOutcome {
        sections_before: sections.clone(),
        sections_after: after,
        hits,
        total_damage,
        destroyed,
    }
}

/// Pessimistic warning check for the UI.
///
/// Assumes the maximum damage lands on a single section and reports whether
/// any such placement leaves every section damaged.
pub fn could_destroy(sections: &ShipSections, damage: DamageRange) -> bool {
    if sections.is_empty() {
        return false;
    }

    let already_damaged = sections.values().filter(|s| s.is_damaged()).count();
    let total = sections.len();

    if already_damaged == total {
        return true;
    }
    if already_damaged + 1 < total {
        return false;
    }

    // Exactly one healthy section left: can the whole roll knock it down?
    sections
        .values()
        .filter(|section| !section.is_damaged())
        .any(|section| section.hull().saturating_sub(damage.max) <= section.damaged_threshold())
}
