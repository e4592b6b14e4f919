//! Reputation rules implementing [`extraction_core::ReputationOracle`].
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use extraction_core::{Difficulty, HostileId, HostileOracle, ReputationAward, ReputationOracle};

use super::HostileOracleImpl;

/// Reputation derived from hostile difficulty and the player's standing.
///
/// The extraction bonus follows the profile's total reputation, which the
/// coordinator mirrors in through [`ReputationOracleImpl::sync_standing`].
pub struct ReputationOracleImpl {
    hostiles: Arc<HostileOracleImpl>,
    standing: AtomicU64,
}

impl ReputationOracleImpl {
    /// Reputation needed per point of extraction bonus.
    pub const REPUTATION_PER_BONUS: u64 = 100;
    pub const MAX_EXTRACTION_BONUS: u32 = 4;

    pub fn new(hostiles: Arc<HostileOracleImpl>) -> Self {
        Self {
            hostiles,
            standing: AtomicU64::new(0),
        }
    }

    pub fn sync_standing(&self, reputation: u64) {
        self.standing.store(reputation, Ordering::Relaxed);
    }

    fn base_reputation(difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => 10,
            Difficulty::Normal => 25,
            Difficulty::Hard => 60,
            Difficulty::Elite => 120,
        }
    }
}

impl ReputationOracle for ReputationOracleImpl {
    fn extraction_bonus(&self) -> u32 {
        let bonus = self.standing.load(Ordering::Relaxed) / Self::REPUTATION_PER_BONUS;
        u32::try_from(bonus)
            .unwrap_or(u32::MAX)
            .min(Self::MAX_EXTRACTION_BONUS)
    }

    /// Stronger loadouts earn less: every 10 points of loadout value shave a
    /// point off, never below one.
    fn compute_combat_reputation(
        &self,
        loadout_value: u32,
        hostile: &HostileId,
        tier_cap: u32,
    ) -> ReputationAward {
        let difficulty = self
            .hostiles
            .hostile(hostile)
            .map(|profile| profile.difficulty)
            .unwrap_or_default();
        let raw = Self::base_reputation(difficulty)
            .saturating_sub(loadout_value / 10)
            .max(1);

        ReputationAward {
            earned: raw.min(tier_cap),
            was_capped: raw > tier_cap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extraction_core::{DeckId, HostileProfile};

    fn oracle() -> ReputationOracleImpl {
        let mut hostiles = HostileOracleImpl::new();
        hostiles.add_hostile(HostileProfile {
            id: HostileId::new("juggernaut"),
            deck: DeckId::new("juggernaut_deck"),
            difficulty: Difficulty::Elite,
            damage: None,
        });
        ReputationOracleImpl::new(Arc::new(hostiles))
    }

    #[test]
    fn extraction_bonus_tracks_standing() {
        let oracle = oracle();
        assert_eq!(oracle.extraction_bonus(), 0);
        oracle.sync_standing(250);
        assert_eq!(oracle.extraction_bonus(), 2);
        oracle.sync_standing(u64::MAX);
        assert_eq!(oracle.extraction_bonus(), ReputationOracleImpl::MAX_EXTRACTION_BONUS);
    }

    #[test]
    fn combat_reputation_is_capped() {
        let oracle = oracle();
        let award = oracle.compute_combat_reputation(40, &HostileId::new("juggernaut"), 50);
        assert_eq!(award, ReputationAward { earned: 50, was_capped: true });

        let award = oracle.compute_combat_reputation(40, &HostileId::new("juggernaut"), 500);
        assert_eq!(award, ReputationAward { earned: 116, was_capped: false });
    }

    #[test]
    fn unknown_hostile_uses_default_difficulty() {
        let oracle = oracle();
        let award = oracle.compute_combat_reputation(500, &HostileId::new("ghost"), 100);
        assert_eq!(award.earned, 1);
        assert!(!award.was_capped);
    }
}
