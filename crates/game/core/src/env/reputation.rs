//! Reputation collaborator.

use crate::state::HostileId;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReputationAward {
    pub earned: u32,
    pub was_capped: bool,
}

pub trait ReputationOracle: Send + Sync {
    /// Extra extraction capacity granted to custom loadouts.
    fn extraction_bonus(&self) -> u32;

    /// Reputation for beating `hostile` with a loadout worth `loadout_value`,
    /// never above `tier_cap`.
    fn compute_combat_reputation(
        &self,
        loadout_value: u32,
        hostile: &HostileId,
        tier_cap: u32,
    ) -> ReputationAward;
}
