//! Hostile and boss definitions.

use crate::escape::DamageRange;
use crate::state::{BossId, DeckId, HostileId};

/// Difficulty band of an opponent; parameterizes salvage generation.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Elite,
}

/// Static description of a hostile AI.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HostileProfile {
    pub id: HostileId,
    pub deck: DeckId,
    pub difficulty: Difficulty,
    /// Escape damage; `None` falls back to the configured default.
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: Option<DamageRange>,
}

/// Rewards paid directly into the profile after a boss victory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BossReward {
    pub credits: u64,
    pub ai_cores: u32,
    pub reputation: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossConfig {
    pub id: BossId,
    pub difficulty: Difficulty,
    /// Paid the first time this boss is beaten.
    pub first_time: BossReward,
    /// Paid on every later victory.
    pub repeat: BossReward,
}

impl BossConfig {
    pub fn reward(&self, first_victory: bool) -> BossReward {
        if first_victory {
            self.first_time
        } else {
            self.repeat
        }
    }
}

/// Provides hostile rosters, hostile profiles, and boss configuration.
pub trait HostileOracle: Send + Sync {
    /// Hostiles eligible to intercept an extraction at `tier`. May be empty.
    fn high_threat_roster(&self, tier: u8) -> Vec<HostileId>;

    fn hostile(&self, id: &HostileId) -> Option<HostileProfile>;

    fn boss(&self, id: &BossId) -> Option<BossConfig>;
}
