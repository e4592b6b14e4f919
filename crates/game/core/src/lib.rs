//! Deterministic rules for the extraction run lifecycle.
//!
//! `extraction-core` owns the state machine that sits between the map,
//! the battle engine, and the hub: starting and terminating runs, resolving
//! combat outcomes into staged rewards, the extraction gate and capacity
//! limit, and escapes. Every operation takes the [`SessionState`] by
//! mutable reference and reaches collaborators only through [`RunEnv`], so
//! the runtime and offline tools drive the same rules.
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod escape;
pub mod extraction;
pub mod lifecycle;
pub mod state;

#[cfg(test)]
mod testing;

pub use combat::{
    BattleResult, CombatContext, CombatEncounterDescriptor, CombatOutcomeResolver, CombatPhase,
    Encounter, FailureReason, Outcome, OutcomeDescriptor, ResolveError, StagedReward,
    TransitionTarget, Winner,
};
pub use config::RunConfig;
pub use env::{
    BlueprintDraw, BossConfig, BossReward, Difficulty, Env, HostileOracle, HostileProfile, Loadout,
    LoadoutOracle, LootOracle, MissionEvent, MissionOracle, OracleError, ReputationAward,
    ReputationOracle, RunEnv, SeededRng, ThreatOracle, derive_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use escape::{DamageRange, EscapeOutcome, could_destroy, resolve_escape};
pub use extraction::{
    DetectionGate, ExtractionAttempt, ExtractionError, ExtractionSummary, GateDecision,
    attempt_extraction, blockade_descriptor, complete_extraction, current_limit, extraction_limit,
};
pub use lifecycle::{
    EscapeReport, FailureSummary, LifecycleError, abandon, adjust_detection, begin_boss_combat,
    begin_combat, escape, interrupt_poi_with_combat, loot_poi, resume_poi, return_to_hub,
    start_run, take_pending_salvage, terminate_failure,
};
pub use state::{
    BlueprintId, BossId, DeckId, HexCoord, HostileId, Interruption, InterruptionKind, Lane,
    LootItem, LootKind, LootSource, PendingBlueprint, PendingSalvage, PlayerProfile, PoiCombat,
    PoiRewardType, Rarity, RunFlags, RunRecord, SectionKey, SessionState, ShipSection,
    ShipSections, ShipSlotStatus,
};
#[cfg(feature = "serde")]
pub use state::snapshot::{SessionSnapshot, SnapshotError};
