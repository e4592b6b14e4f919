//! Extraction capacity.

use crate::config::RunConfig;
use crate::state::{RunRecord, ShipSections, damaged_section_count};

/// Loot items the player may keep on extraction.
///
/// `base + reputation_bonus - damaged_sections`, floored at zero. The bonus
/// only applies to custom loadouts.
pub fn extraction_limit(
    ship_slot: u32,
    sections: &ShipSections,
    reputation_bonus: u32,
    config: &RunConfig,
) -> u32 {
    let (base, bonus) = if RunConfig::is_starter_slot(ship_slot) {
        (config.starter_extraction_limit, 0)
    } else {
        (config.custom_extraction_limit, reputation_bonus)
    };
    (base + bonus).saturating_sub(damaged_section_count(sections))
}

/// [`extraction_limit`] for a live run.
pub fn run_extraction_limit(run: &RunRecord, reputation_bonus: u32, config: &RunConfig) -> u32 {
    extraction_limit(run.ship_slot, &run.sections, reputation_bonus, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Lane, SectionKey, ShipSection};

    fn ship(damaged: usize, total: usize) -> ShipSections {
        (0..total)
            .map(|i| {
                let hull = if i < damaged { 2 } else { 10 };
                (
                    SectionKey::new(format!("section_{i}")),
                    ShipSection::new(10, Lane::Middle).at_hull(hull),
                )
            })
            .collect()
    }

    #[test]
    fn starter_ignores_reputation_bonus() {
        let config = RunConfig::new();
        assert_eq!(extraction_limit(0, &ship(0, 3), 5, &config), 3);
        assert_eq!(extraction_limit(0, &ship(1, 3), 5, &config), 2);
    }

    #[test]
    fn custom_adds_bonus_and_subtracts_damage() {
        let config = RunConfig::new();
        assert_eq!(extraction_limit(2, &ship(1, 3), 2, &config), 7);
    }

    #[test]
    fn never_negative_and_pure() {
        let config = RunConfig::new();
        let wrecked = ship(5, 5);
        assert_eq!(extraction_limit(0, &wrecked, 0, &config), 0);
        assert_eq!(
            extraction_limit(3, &wrecked, 1, &config),
            extraction_limit(3, &wrecked, 1, &config)
        );
        assert_eq!(extraction_limit(3, &wrecked, 1, &config), 2);
    }
}
