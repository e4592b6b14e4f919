//! Collaborator seams.
//!
//! Loot tables, detection tracking, reputation, telemetry, hostile data, and
//! ship loadouts are supplied from outside through these traits. The [`Env`]
//! aggregate bundles them so the rules reach everything without ambient
//! globals, and tests substitute plain in-memory fakes.
mod error;
mod hostiles;
mod loadouts;
mod loot;
mod mission;
mod reputation;
mod rng;
mod threat;

pub use error::OracleError;
pub use hostiles::{BossConfig, BossReward, Difficulty, HostileOracle, HostileProfile};
pub use loadouts::{Loadout, LoadoutOracle};
pub use loot::{BlueprintDraw, LootOracle};
pub use mission::{MissionEvent, MissionOracle};
pub use reputation::{ReputationAward, ReputationOracle};
pub use rng::{SeededRng, derive_seed};
pub use threat::ThreatOracle;

use crate::state::{BossId, HostileId};

/// Aggregates the collaborators used by the lifecycle, resolver, and
/// extraction flow.
///
/// Only references are held, so the aggregate is `Copy` regardless of the
/// oracle types.
pub struct Env<'a, L, T, R, M, H, S>
where
    L: LootOracle + ?Sized,
    T: ThreatOracle + ?Sized,
    R: ReputationOracle + ?Sized,
    M: MissionOracle + ?Sized,
    H: HostileOracle + ?Sized,
    S: LoadoutOracle + ?Sized,
{
    loot: Option<&'a L>,
    threat: Option<&'a T>,
    reputation: Option<&'a R>,
    mission: Option<&'a M>,
    hostiles: Option<&'a H>,
    loadouts: Option<&'a S>,
}

pub type RunEnv<'a> = Env<
    'a,
    dyn LootOracle + 'a,
    dyn ThreatOracle + 'a,
    dyn ReputationOracle + 'a,
    dyn MissionOracle + 'a,
    dyn HostileOracle + 'a,
    dyn LoadoutOracle + 'a,
>;

impl<'a, L, T, R, M, H, S> Env<'a, L, T, R, M, H, S>
where
    L: LootOracle + ?Sized,
    T: ThreatOracle + ?Sized,
    R: ReputationOracle + ?Sized,
    M: MissionOracle + ?Sized,
    H: HostileOracle + ?Sized,
    S: LoadoutOracle + ?Sized,
{
    pub fn new(
        loot: Option<&'a L>,
        threat: Option<&'a T>,
        reputation: Option<&'a R>,
        mission: Option<&'a M>,
        hostiles: Option<&'a H>,
        loadouts: Option<&'a S>,
    ) -> Self {
        Self {
            loot,
            threat,
            reputation,
            mission,
            hostiles,
            loadouts,
        }
    }

    pub fn with_all(
        loot: &'a L,
        threat: &'a T,
        reputation: &'a R,
        mission: &'a M,
        hostiles: &'a H,
        loadouts: &'a S,
    ) -> Self {
        Self::new(
            Some(loot),
            Some(threat),
            Some(reputation),
            Some(mission),
            Some(hostiles),
            Some(loadouts),
        )
    }

    pub fn empty() -> Self {
        Self {
            loot: None,
            threat: None,
            reputation: None,
            mission: None,
            hostiles: None,
            loadouts: None,
        }
    }

    /// Returns the LootOracle, or an error if not available.
    pub fn loot(&self) -> Result<&'a L, OracleError> {
        self.loot.ok_or(OracleError::LootNotAvailable)
    }

    /// Returns the ThreatOracle, or an error if not available.
    pub fn threat(&self) -> Result<&'a T, OracleError> {
        self.threat.ok_or(OracleError::ThreatNotAvailable)
    }

    /// Returns the ReputationOracle, or an error if not available.
    pub fn reputation(&self) -> Result<&'a R, OracleError> {
        self.reputation.ok_or(OracleError::ReputationNotAvailable)
    }

    /// Returns the HostileOracle, or an error if not available.
    pub fn hostiles(&self) -> Result<&'a H, OracleError> {
        self.hostiles.ok_or(OracleError::HostilesNotAvailable)
    }

    /// Returns the LoadoutOracle, or an error if not available.
    pub fn loadouts(&self) -> Result<&'a S, OracleError> {
        self.loadouts.ok_or(OracleError::LoadoutsNotAvailable)
    }

    /// Publishes a telemetry event. Without a mission oracle the event is
    /// dropped.
    pub fn record(&self, event: MissionEvent) {
        if let Some(mission) = self.mission {
            mission.record(event);
        }
    }

    pub fn hostile(&self, id: &HostileId) -> Result<HostileProfile, OracleError> {
        self.hostiles()?
            .hostile(id)
            .ok_or_else(|| OracleError::UnknownHostile(id.clone()))
    }

    pub fn boss(&self, id: &BossId) -> Result<BossConfig, OracleError> {
        self.hostiles()?
            .boss(id)
            .ok_or_else(|| OracleError::UnknownBoss(id.clone()))
    }

    pub fn loadout(&self, ship_slot: u32) -> Result<Loadout, OracleError> {
        self.loadouts()?
            .loadout(ship_slot)
            .ok_or(OracleError::UnknownShipSlot(ship_slot))
    }
}

impl<L, T, R, M, H, S> Clone for Env<'_, L, T, R, M, H, S>
where
    L: LootOracle + ?Sized,
    T: ThreatOracle + ?Sized,
    R: ReputationOracle + ?Sized,
    M: MissionOracle + ?Sized,
    H: HostileOracle + ?Sized,
    S: LoadoutOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<L, T, R, M, H, S> Copy for Env<'_, L, T, R, M, H, S>
where
    L: LootOracle + ?Sized,
    T: ThreatOracle + ?Sized,
    R: ReputationOracle + ?Sized,
    M: MissionOracle + ?Sized,
    H: HostileOracle + ?Sized,
    S: LoadoutOracle + ?Sized,
{
}

impl<'a, L, T, R, M, H, S> Default for Env<'a, L, T, R, M, H, S>
where
    L: LootOracle + ?Sized,
    T: ThreatOracle + ?Sized,
    R: ReputationOracle + ?Sized,
    M: MissionOracle + ?Sized,
    H: HostileOracle + ?Sized,
    S: LoadoutOracle + ?Sized,
{
    fn default() -> Self {
        Self::empty()
    }
}
