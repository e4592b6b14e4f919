//! Blockade decision at the extraction boundary.

use crate::env::{HostileOracle, SeededRng};
use crate::state::{HostileId, PlayerProfile};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GateDecision {
    /// Extraction may proceed. `bypassed` is set when a clearance item was
    /// spent instead of rolling.
    Clear { bypassed: bool },
    /// A hostile intercepts.
    Blocked { hostile: HostileId },
}

impl GateDecision {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }
}

/// Detection is a direct percentage chance of interception.
pub struct DetectionGate<'a, H: HostileOracle + ?Sized> {
    hostiles: &'a H,
    fallback: &'a HostileId,
}

impl<'a, H: HostileOracle + ?Sized> DetectionGate<'a, H> {
    pub fn new(hostiles: &'a H, fallback: &'a HostileId) -> Self {
        Self { hostiles, fallback }
    }

    /// One uniform draw in `[0, 100)`; blocked iff the draw is below
    /// `detection`.
    pub fn attempt_extraction(
        &self,
        detection: f64,
        tier: u8,
        rng: &mut SeededRng,
    ) -> GateDecision {
        if rng.percent() >= detection {
            return GateDecision::Clear { bypassed: false };
        }
        GateDecision::Blocked {
            hostile: self.pick_hostile(tier, rng),
        }
    }

    /// Spends a clearance item if one is available, skipping the draw;
    /// otherwise falls through to [`Self::attempt_extraction`].
    pub fn attempt_with_clearance(
        &self,
        profile: &mut PlayerProfile,
        detection: f64,
        tier: u8,
        rng: &mut SeededRng,
    ) -> GateDecision {
        if profile.consume_clearance() {
            return GateDecision::Clear { bypassed: true };
        }
        self.attempt_extraction(detection, tier, rng)
    }

    fn pick_hostile(&self, tier: u8, rng: &mut SeededRng) -> HostileId {
        let roster = self.hostiles.high_threat_roster(tier);
        if roster.is_empty() {
            return self.fallback.clone();
        }
        roster[rng.index(roster.len())].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fakes;

    #[test]
    fn blocked_rate_tracks_detection() {
        let fakes = Fakes::new();
        let fallback = HostileId::new("warden");
        let gate = DetectionGate::new(&fakes.hostiles, &fallback);

        for detection in [0.0, 25.0, 60.0, 100.0] {
            let mut rng = SeededRng::new(2024);
            let trials = 20_000;
            let blocked = (0..trials)
                .filter(|_| gate.attempt_extraction(detection, 1, &mut rng).is_blocked())
                .count();
            let rate = blocked as f64 / trials as f64 * 100.0;
            assert!((rate - detection).abs() < 1.5, "{detection}: {rate}");
        }
    }

    #[test]
    fn empty_roster_falls_back() {
        let mut fakes = Fakes::new();
        fakes.hostiles.roster.clear();
        let fallback = HostileId::new("warden");
        let gate = DetectionGate::new(&fakes.hostiles, &fallback);

        let decision = gate.attempt_extraction(100.0, 2, &mut SeededRng::new(1));
        assert_eq!(decision, GateDecision::Blocked { hostile: fallback });
    }

    #[test]
    fn clearance_skips_the_draw() {
        let fakes = Fakes::new();
        let fallback = HostileId::new("warden");
        let gate = DetectionGate::new(&fakes.hostiles, &fallback);
        let mut profile = fakes.profile();
        profile.clearance_items = 1;
        let mut rng = SeededRng::new(8);
        let untouched = rng;

        let decision = gate.attempt_with_clearance(&mut profile, 100.0, 1, &mut rng);
        assert_eq!(decision, GateDecision::Clear { bypassed: true });
        assert_eq!(rng, untouched);
        assert_eq!(profile.clearance_items, 0);

        // None left: the probabilistic check runs.
        let decision = gate.attempt_with_clearance(&mut profile, 100.0, 1, &mut rng);
        assert!(decision.is_blocked());
    }
}
