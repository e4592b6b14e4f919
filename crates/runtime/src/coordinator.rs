//! Run lifecycle coordinator.
//!
//! The coordinator owns the session state, the run configuration, and the
//! oracle implementations, and exposes every lifecycle operation as a single
//! method call. Rules live in extraction-core; this layer adds seeding,
//! logging, telemetry wiring, and persistence.

use chrono::Utc;
use tokio::sync::broadcast;

use extraction_content::ContentFactory;
use extraction_core::{
    BattleResult, BossId, CombatEncounterDescriptor, CombatOutcomeResolver, CombatPhase,
    EscapeReport, ExtractionAttempt, ExtractionSummary, FailureSummary, HexCoord, HostileId,
    InterruptionKind, LifecycleError, LootItem, OutcomeDescriptor, PendingSalvage, PlayerProfile,
    PoiCombat, RunConfig, RunRecord, SessionSnapshot, SessionState, ThreatOracle,
    TransitionTarget, extraction, lifecycle,
};

use crate::error::{Result, RuntimeError};
use crate::events::{EventBus, MissionRecord};
use crate::oracle::OracleManager;
use crate::repository::SessionRepository;

/// Coordinator settings that are not part of the rules configuration.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Key the session is saved under.
    pub session_id: String,
    pub event_buffer_size: usize,
    /// Seed of the loot oracle; random when absent.
    pub loot_seed: Option<u64>,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            session_id: "default".to_owned(),
            event_buffer_size: 100,
            loot_seed: None,
        }
    }
}

/// Drives one player's session through runs, combats, and extractions.
pub struct RunCoordinator {
    state: SessionState,
    config: RunConfig,
    oracles: OracleManager,
    repository: Option<Box<dyn SessionRepository>>,
    session_id: String,
}

impl RunCoordinator {
    /// Create a new coordinator builder
    pub fn builder() -> RunCoordinatorBuilder {
        RunCoordinatorBuilder::new()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.state.profile
    }

    pub fn run(&self) -> Option<&RunRecord> {
        self.state.run.as_ref()
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn oracles(&self) -> &OracleManager {
        &self.oracles
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Subscribe to mission telemetry.
    pub fn subscribe(&self) -> broadcast::Receiver<MissionRecord> {
        self.oracles.events().subscribe()
    }

    pub fn events(&self) -> &EventBus {
        self.oracles.events()
    }

    /// Grants clearance items to the profile.
    pub fn grant_clearance(&mut self, count: u32) {
        self.state.profile.clearance_items += count;
    }

    fn sync_standing(&self) {
        self.oracles
            .reputation()
            .sync_standing(self.state.profile.reputation);
    }

    /// Re-seeds the stateful oracles after the session was replaced.
    fn sync_oracles(&self) {
        self.sync_standing();
        match &self.state.run {
            Some(run) => self.oracles.threat().set_level(run.detection_level),
            None => self.oracles.threat().reset_tracking(),
        }
    }

    fn log_refusal(operation: &str, err: &LifecycleError) {
        match err {
            LifecycleError::Terminating => {
                tracing::warn!(operation, "refused: run termination in progress");
            }
            LifecycleError::CombatInProgress => {
                tracing::warn!(operation, "refused: a combat is already in progress");
            }
            other => tracing::warn!(operation, error = %other, "refused"),
        }
    }

    // ===== run creation and map-side mutations =====

    /// Starts a run with the loadout in `ship_slot`.
    ///
    /// Returns the map seed, drawn at random when none is supplied.
    pub fn start_run(&mut self, ship_slot: u32, tier: u8, seed: Option<u64>) -> Result<u64> {
        let map_seed = seed.unwrap_or_else(rand::random);
        let env = self.oracles.as_run_env();
        lifecycle::start_run(&mut self.state, ship_slot, tier, map_seed, &env).inspect_err(
            |err| Self::log_refusal("start_run", err),
        )?;

        if let Some(run) = &self.state.run {
            tracing::info!(
                ship_slot,
                tier = run.map_tier,
                map_seed,
                hull = run.hull,
                "run started"
            );
        }
        Ok(map_seed)
    }

    /// Loots a PoI. Returns `false` when the coordinate was already looted.
    pub fn loot_poi(&mut self, coord: HexCoord, items: Vec<LootItem>) -> Result<bool> {
        let count = items.len();
        let looted = lifecycle::loot_poi(&mut self.state, coord, items)?;
        if looted {
            tracing::debug!(%coord, items = count, "poi looted");
        } else {
            tracing::debug!(%coord, "poi already looted; nothing collected");
        }
        Ok(looted)
    }

    pub fn adjust_detection(&mut self, delta: f64, reason: &str) -> Result<f64> {
        let env = self.oracles.as_run_env();
        let level = lifecycle::adjust_detection(&mut self.state, delta, reason, &env)?;
        tracing::debug!(delta, level, reason, "detection mirrored into run");
        Ok(level)
    }

    // ===== combat initiation =====

    fn log_discarded(discarded: &[InterruptionKind]) {
        if !discarded.is_empty() {
            let kinds: Vec<String> = discarded.iter().map(ToString::to_string).collect();
            tracing::warn!(?kinds, "stale interruptions discarded before combat");
        }
    }

    pub fn begin_combat(&mut self, descriptor: CombatEncounterDescriptor) -> Result<()> {
        let blockade = descriptor.is_blockade();
        let discarded = lifecycle::begin_combat(&mut self.state, descriptor)
            .inspect_err(|err| Self::log_refusal("begin_combat", err))?;
        Self::log_discarded(&discarded);
        tracing::debug!(blockade, "combat started");
        Ok(())
    }

    /// Records the interrupted PoI and its pending loot, then begins combat.
    pub fn interrupt_poi_with_combat(
        &mut self,
        poi: PoiCombat,
        pending: PendingSalvage,
        descriptor: CombatEncounterDescriptor,
    ) -> Result<()> {
        let coord = poi.coord;
        let from_salvage = poi.from_salvage;
        let pending_items = pending.loot.len();
        let discarded =
            lifecycle::interrupt_poi_with_combat(&mut self.state, poi, pending, descriptor)
                .inspect_err(|err| Self::log_refusal("interrupt_poi_with_combat", err))?;
        Self::log_discarded(&discarded);
        tracing::debug!(
            %coord,
            from_salvage,
            pending_items,
            "poi interrupted by combat; interruption preserved"
        );
        Ok(())
    }

    pub fn begin_boss_combat(&mut self, boss_id: BossId, ship_slot: u32) -> Result<()> {
        let env = self.oracles.as_run_env();
        lifecycle::begin_boss_combat(&mut self.state, boss_id.clone(), ship_slot, &env)
            .inspect_err(|err| Self::log_refusal("begin_boss_combat", err))?;
        tracing::info!(
            boss = %boss_id,
            ship_slot,
            attempts = self.state.profile.boss_progress.total_attempts,
            "boss combat started"
        );
        Ok(())
    }

    // ===== combat resolution =====

    pub fn resolve_combat(&mut self, battle: &BattleResult) -> Result<OutcomeDescriptor> {
        let env = self.oracles.as_run_env();
        let resolver = CombatOutcomeResolver::new(env, &self.config);
        let outcome = resolver.resolve(&mut self.state, battle)?;

        match outcome.transition {
            Some(TransitionTarget::MissingInAction { reason }) => {
                tracing::info!(
                    %reason,
                    starter = outcome.is_starter_deck,
                    "combat lost; run terminated as missing in action"
                );
            }
            _ if outcome.is_boss_reward() => {
                tracing::debug!(hull = outcome.hull, "boss reward staged");
            }
            _ => {
                tracing::debug!(
                    items = outcome.loot.len(),
                    hull = outcome.hull,
                    message = %outcome.message,
                    "victory loot staged"
                );
            }
        }
        Ok(outcome)
    }

    pub fn finalize_victory(&mut self) -> Result<TransitionTarget> {
        let boss = self
            .state
            .combat
            .as_ref()
            .and_then(|combat| combat.boss.clone());
        let env = self.oracles.as_run_env();
        let resolver = CombatOutcomeResolver::new(env, &self.config);
        let transition = resolver.finalize_victory(&mut self.state)?;

        if let Some(boss) = boss {
            self.sync_standing();
            tracing::info!(
                boss = %boss,
                victories = self.state.profile.boss_progress.total_victories,
                credits = self.state.profile.credits,
                "boss defeated"
            );
        } else {
            tracing::debug!(?transition, "victory finalized");
        }
        Ok(transition)
    }

    pub fn accept_blueprint(&mut self) -> Result<TransitionTarget> {
        let env = self.oracles.as_run_env();
        let resolver = CombatOutcomeResolver::new(env, &self.config);
        let transition = resolver.accept_blueprint(&mut self.state)?;
        tracing::debug!(?transition, "blueprint accepted");
        Ok(transition)
    }

    pub fn take_pending_salvage(&mut self) -> Result<Option<PendingSalvage>> {
        let pending = lifecycle::take_pending_salvage(&mut self.state)?;
        if let Some(pending) = &pending {
            tracing::debug!(items = pending.loot.len(), "preserved poi salvage handed back");
        }
        Ok(pending)
    }

    pub fn resume_poi(&mut self) -> Result<Option<PoiCombat>> {
        Ok(lifecycle::resume_poi(&mut self.state)?)
    }

    /// Escapes from the current combat.
    ///
    /// Without a seed the roll is seeded from the wall clock.
    pub fn escape(&mut self, hostile: &HostileId, seed: Option<u64>) -> Result<EscapeReport> {
        let seed = seed.unwrap_or_else(|| Utc::now().timestamp_micros().unsigned_abs());
        let env = self.oracles.as_run_env();
        let report = lifecycle::escape(&mut self.state, hostile, None, seed, &env, &self.config)?;

        match &report.failure {
            Some(failure) => tracing::info!(
                hostile = %hostile,
                damage = report.outcome.total_damage,
                ship_slot = failure.ship_slot,
                "escape destroyed the ship; run terminated as missing in action"
            ),
            None => tracing::debug!(
                hostile = %hostile,
                damage = report.outcome.total_damage,
                seed,
                "escaped"
            ),
        }
        Ok(report)
    }

    /// Escapes from whatever hostile the current combat is against.
    pub fn escape_current(&mut self, seed: Option<u64>) -> Result<EscapeReport> {
        let combat = self.state.combat.as_ref().ok_or(RuntimeError::NoCombat)?;
        let hostile = combat.hostile.clone().ok_or(RuntimeError::NoHostile)?;
        self.escape(&hostile, seed)
    }

    // ===== extraction =====

    /// Current extraction capacity of the live run.
    pub fn extraction_limit(&self) -> Result<u32> {
        let run = self
            .state
            .run
            .as_ref()
            .ok_or(LifecycleError::NoActiveRun)?;
        let env = self.oracles.as_run_env();
        Ok(extraction::current_limit(run, &env, &self.config)?)
    }

    /// Attempts to extract.
    ///
    /// A blueprint still waiting for acceptance is accepted first. A blocked
    /// attempt starts the blockade combat before returning.
    pub fn attempt_extraction(&mut self, use_clearance: bool) -> Result<ExtractionAttempt> {
        let pending_blueprint = self
            .state
            .combat
            .as_ref()
            .is_some_and(|combat| combat.phase == CombatPhase::VictoryPendingBlueprint);
        if pending_blueprint {
            tracing::warn!("blueprint still pending at extraction; accepting it first");
            self.accept_blueprint()?;
        }

        self.sync_standing();
        let env = self.oracles.as_run_env();
        let attempt =
            extraction::attempt_extraction(&mut self.state, use_clearance, &env, &self.config)?;

        match &attempt {
            ExtractionAttempt::Blockaded { hostile } => {
                let run = self
                    .state
                    .run
                    .as_ref()
                    .ok_or(LifecycleError::NoActiveRun)?;
                tracing::debug!(
                    hostile = %hostile,
                    detection = run.detection_level,
                    attempts = run.extraction_attempts,
                    "blockade roll failed"
                );
                let descriptor = extraction::blockade_descriptor(hostile.clone(), run, &env)?;
                lifecycle::begin_combat(&mut self.state, descriptor).map_err(|err| {
                    Self::log_refusal("blockade", &err);
                    RuntimeError::BlockadeNotStarted(hostile.clone())
                })?;
                tracing::info!(hostile = %hostile, "extraction blockaded; combat started");
            }
            ExtractionAttempt::SelectionRequired { limit, collected } => {
                tracing::debug!(limit, collected, "extraction cleared; selection required");
            }
            ExtractionAttempt::Extracted(summary) => self.log_extracted(summary),
        }
        Ok(attempt)
    }

    /// Completes an extraction that required a loot selection.
    pub fn complete_extraction(
        &mut self,
        selection: Option<&[usize]>,
    ) -> Result<ExtractionSummary> {
        let env = self.oracles.as_run_env();
        let summary =
            extraction::complete_extraction(&mut self.state, selection, &env, &self.config)?;
        self.log_extracted(&summary);
        Ok(summary)
    }

    fn log_extracted(&self, summary: &ExtractionSummary) {
        self.sync_standing();
        tracing::info!(
            ship_slot = summary.ship_slot,
            items = summary.extracted.len(),
            discarded = summary.discarded,
            credits = summary.extracted_credits,
            reputation = summary.reputation_earned,
            drones_damaged = summary.drones_damaged,
            "extraction complete"
        );
    }

    // ===== failure termination =====

    /// Abandons the run as missing in action.
    ///
    /// A second call while termination is in flight, or with nothing to
    /// abandon, returns `None`.
    pub fn abandon_run(&mut self) -> Option<FailureSummary> {
        let env = self.oracles.as_run_env();
        let summary = lifecycle::abandon(&mut self.state, &env);
        match &summary {
            Some(summary) => tracing::info!(
                ship_slot = summary.ship_slot,
                forfeited = summary.forfeited_items,
                slot_lost = summary.slot_lost,
                "run abandoned; missing in action"
            ),
            None => tracing::debug!("abandon ignored; nothing to terminate"),
        }
        summary
    }

    /// Lowers the termination guard once the hub is reached.
    pub fn return_to_hub(&mut self) -> bool {
        let returned = lifecycle::return_to_hub(&mut self.state);
        if !returned {
            tracing::warn!("return to hub refused while a run or combat is live");
        }
        returned
    }

    // ===== persistence =====

    pub fn snapshot(&self) -> Result<SessionSnapshot> {
        Ok(SessionSnapshot::capture(&self.state)?)
    }

    /// Replaces the session with a verified snapshot.
    pub fn restore(&mut self, snapshot: &SessionSnapshot) -> Result<()> {
        self.state = snapshot.restore()?;
        self.sync_oracles();
        tracing::info!(
            session = %self.session_id,
            active_run = self.state.has_active_run(),
            in_combat = self.state.in_combat(),
            "session restored"
        );
        Ok(())
    }

    /// Saves the session to the configured repository. Without one this is
    /// a no-op.
    pub fn save(&self) -> Result<()> {
        let Some(repository) = &self.repository else {
            return Ok(());
        };
        repository.save(&self.session_id, &self.snapshot()?)?;
        tracing::debug!(session = %self.session_id, "session saved");
        Ok(())
    }
}

/// Builder for [`RunCoordinator`].
pub struct RunCoordinatorBuilder {
    settings: CoordinatorConfig,
    config: Option<RunConfig>,
    profile: Option<PlayerProfile>,
    state: Option<SessionState>,
    oracles: Option<OracleManager>,
    content: Option<ContentFactory>,
    repository: Option<Box<dyn SessionRepository>>,
}

impl RunCoordinatorBuilder {
    fn new() -> Self {
        Self {
            settings: CoordinatorConfig::default(),
            config: None,
            profile: None,
            state: None,
            oracles: None,
            content: None,
            repository: None,
        }
    }

    /// Override coordinator settings
    pub fn settings(mut self, settings: CoordinatorConfig) -> Self {
        self.settings = settings;
        self
    }

    /// Override the run configuration loaded from content
    pub fn config(mut self, config: RunConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load oracles and configuration from a content directory
    pub fn content(mut self, factory: ContentFactory) -> Self {
        self.content = Some(factory);
        self
    }

    /// Use prebuilt oracles instead of loading content
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Start from an existing profile
    pub fn profile(mut self, profile: PlayerProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Start from a full session state
    pub fn initial_state(mut self, state: SessionState) -> Self {
        self.state = Some(state);
        self
    }

    /// Persist sessions here; an existing session under the same id is
    /// resumed on build
    pub fn repository(mut self, repository: impl SessionRepository + 'static) -> Self {
        self.repository = Some(Box::new(repository));
        self
    }

    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.settings.session_id = session_id.into();
        self
    }

    pub fn loot_seed(mut self, seed: u64) -> Self {
        self.settings.loot_seed = Some(seed);
        self
    }

    /// A fresh profile owning every configured loadout.
    fn default_profile(oracles: &OracleManager) -> PlayerProfile {
        let mut profile = PlayerProfile::new();
        for slot in oracles.loadouts().slots() {
            profile.ship_slots.entry(slot).or_default();
        }
        profile
    }

    /// Build the coordinator
    pub fn build(self) -> Result<RunCoordinator> {
        let (oracles, loaded_config) = match (self.oracles, &self.content) {
            (Some(oracles), _) => (oracles, RunConfig::default()),
            (None, Some(factory)) => {
                let seed = self.settings.loot_seed.unwrap_or_else(rand::random);
                let events = EventBus::with_capacity(self.settings.event_buffer_size);
                let (oracles, config) = OracleManager::from_content(factory, seed, events)?;
                tracing::debug!(data_dir = %factory.data_dir().display(), "content loaded");
                (oracles, config)
            }
            (None, None) => return Err(RuntimeError::MissingContent),
        };
        let config = self.config.unwrap_or(loaded_config);

        let resumed = match &self.repository {
            Some(repository) => repository
                .load(&self.settings.session_id)?
                .map(|snapshot| snapshot.restore())
                .transpose()?,
            None => None,
        };
        let was_resumed = resumed.is_some();
        let state = match (resumed, self.state, self.profile) {
            (Some(state), _, _) | (None, Some(state), _) => state,
            (None, None, Some(profile)) => SessionState::new(profile),
            (None, None, None) => SessionState::new(Self::default_profile(&oracles)),
        };

        let coordinator = RunCoordinator {
            state,
            config,
            oracles,
            repository: self.repository,
            session_id: self.settings.session_id,
        };
        coordinator.sync_oracles();
        if was_resumed {
            tracing::info!(session = %coordinator.session_id, "session resumed from repository");
        }
        Ok(coordinator)
    }
}
