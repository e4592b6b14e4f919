use crate::escape::DamageRange;
use crate::state::HostileId;

/// Run tuning constants and tunable parameters.
///
/// Every field has a default so content files only need to list overrides.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    /// Loot items the starter loadout (slot 0) may extract.
    pub starter_extraction_limit: u32,
    /// Loot items any custom loadout may extract before reputation bonus.
    pub custom_extraction_limit: u32,
    /// Threshold applied to sections that do not declare their own.
    pub default_damaged_threshold: u32,
    /// Escape damage used when a hostile defines no damage profile.
    pub default_escape_damage: DamageRange,
    /// Per-combat reputation cap, indexed by `tier - 1`. Tiers past the end
    /// reuse the last entry.
    pub combat_reputation_caps: Vec<u32>,
    /// Hostile that intercepts when a tier's high-threat roster is empty.
    pub fallback_blockade_hostile: HostileId,
    /// Drones are damaged on return when hull is below this percentage of max.
    pub drone_damage_hull_percent: u8,
    /// Credits per map tier granted when a blueprint category is exhausted.
    pub exhausted_blueprint_bonus_per_tier: u64,
}

impl RunConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STARTER_EXTRACTION_LIMIT: u32 = 3;
    pub const DEFAULT_CUSTOM_EXTRACTION_LIMIT: u32 = 6;
    pub const DEFAULT_DAMAGED_THRESHOLD: u32 = 4;
    pub const DEFAULT_DRONE_DAMAGE_HULL_PERCENT: u8 = 50;
    pub const DEFAULT_EXHAUSTED_BLUEPRINT_BONUS: u64 = 50;
    pub const FALLBACK_BLOCKADE_HOSTILE: &'static str = "blockade_warden";

    /// Ship slot reserved for the starter loadout.
    pub const STARTER_SHIP_SLOT: u32 = 0;

    pub fn new() -> Self {
        Self {
            starter_extraction_limit: Self::DEFAULT_STARTER_EXTRACTION_LIMIT,
            custom_extraction_limit: Self::DEFAULT_CUSTOM_EXTRACTION_LIMIT,
            default_damaged_threshold: Self::DEFAULT_DAMAGED_THRESHOLD,
            default_escape_damage: DamageRange::new(2, 2),
            combat_reputation_caps: vec![50, 100, 150],
            fallback_blockade_hostile: HostileId::new(Self::FALLBACK_BLOCKADE_HOSTILE),
            drone_damage_hull_percent: Self::DEFAULT_DRONE_DAMAGE_HULL_PERCENT,
            exhausted_blueprint_bonus_per_tier: Self::DEFAULT_EXHAUSTED_BLUEPRINT_BONUS,
        }
    }

    /// Per-combat reputation cap for a map tier.
    pub fn reputation_cap(&self, tier: u8) -> u32 {
        let index = usize::from(tier.max(1)) - 1;
        self.combat_reputation_caps
            .get(index)
            .or_else(|| self.combat_reputation_caps.last())
            .copied()
            .unwrap_or(0)
    }

    /// Bonus credits substituted for an exhausted blueprint category.
    pub fn exhausted_blueprint_bonus(&self, tier: u8) -> u64 {
        self.exhausted_blueprint_bonus_per_tier * u64::from(tier.max(1))
    }

    pub fn is_starter_slot(ship_slot: u32) -> bool {
        ship_slot == Self::STARTER_SHIP_SLOT
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new()
    }
}
