//! Runtime implementations of the extraction-core collaborator traits.
//!
//! Static content (hostiles, bosses, loadouts, drop tables) is loaded once
//! and shared behind `Arc`s. The threat tracker and reputation standing are
//! the only interior-mutable pieces; session state itself lives in the
//! coordinator.
mod hostiles;
mod loadouts;
mod loot;
mod reputation;
mod threat;

use std::sync::Arc;

use extraction_content::ContentFactory;
use extraction_core::{RunConfig, RunEnv};

use crate::error::{Result, RuntimeError};
use crate::events::EventBus;

pub use hostiles::HostileOracleImpl;
pub use loadouts::LoadoutOracleImpl;
pub use loot::LootOracleImpl;
pub use reputation::ReputationOracleImpl;
pub use threat::ThreatTracker;

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) loot: Arc<LootOracleImpl>,
    pub(crate) threat: Arc<ThreatTracker>,
    pub(crate) reputation: Arc<ReputationOracleImpl>,
    pub(crate) hostiles: Arc<HostileOracleImpl>,
    pub(crate) loadouts: Arc<LoadoutOracleImpl>,
    pub(crate) events: EventBus,
}

impl OracleManager {
    /// Creates a new oracle manager
    pub fn new(
        loot: Arc<LootOracleImpl>,
        threat: Arc<ThreatTracker>,
        reputation: Arc<ReputationOracleImpl>,
        hostiles: Arc<HostileOracleImpl>,
        loadouts: Arc<LoadoutOracleImpl>,
        events: EventBus,
    ) -> Self {
        Self {
            loot,
            threat,
            reputation,
            hostiles,
            loadouts,
            events,
        }
    }

    /// Builds every oracle from a content directory.
    ///
    /// Returns the loaded run configuration alongside, since loadouts depend
    /// on its default damaged threshold.
    pub fn from_content(
        factory: &ContentFactory,
        loot_seed: u64,
        events: EventBus,
    ) -> Result<(Self, RunConfig)> {
        let config = factory.load_config().map_err(RuntimeError::Content)?;
        let catalog = factory.load_hostiles().map_err(RuntimeError::Content)?;
        let bosses = factory.load_bosses().map_err(RuntimeError::Content)?;
        let loadouts = factory
            .load_loadouts(&config)
            .map_err(RuntimeError::Content)?;
        let tables = factory.load_loot().map_err(RuntimeError::Content)?;

        let hostiles = Arc::new(HostileOracleImpl::from_content(catalog, bosses));
        let manager = Self::new(
            Arc::new(LootOracleImpl::new(tables, loot_seed)),
            Arc::new(ThreatTracker::new()),
            Arc::new(ReputationOracleImpl::new(Arc::clone(&hostiles))),
            hostiles,
            Arc::new(LoadoutOracleImpl::new(loadouts)),
            events,
        );
        Ok((manager, config))
    }

    /// Borrows every oracle as the environment the rules run against.
    pub fn as_run_env(&self) -> RunEnv<'_> {
        RunEnv::with_all(
            self.loot.as_ref(),
            self.threat.as_ref(),
            self.reputation.as_ref(),
            &self.events,
            self.hostiles.as_ref(),
            self.loadouts.as_ref(),
        )
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn threat(&self) -> &ThreatTracker {
        &self.threat
    }

    pub fn reputation(&self) -> &ReputationOracleImpl {
        &self.reputation
    }

    pub fn loadouts(&self) -> &LoadoutOracleImpl {
        &self.loadouts
    }
}
