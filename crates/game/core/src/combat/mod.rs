//! Combat outcome resolution.
//!
//! The battle itself is fought elsewhere; this module turns its winner signal
//! into loot, reputation, profile mutations, and a transition target.
//!
//! # Flow
//!
//! - `resolve`: stages the reward (or terminates on defeat)
//! - `finalize_victory`: banks the staged reward once acknowledged
//! - `accept_blueprint`: collects a pending drone blueprint
//!
//! Every intermediate step is stored in [`SessionState`](crate::state::SessionState),
//! never in locals, so a restart between two calls resumes the same branch.
mod encounter;
mod error;
mod outcome;
mod resolver;

pub use encounter::{
    BattleResult, CombatContext, CombatEncounterDescriptor, CombatPhase, Encounter, StagedReward,
    Winner,
};
pub use error::ResolveError;
pub use outcome::{FailureReason, Outcome, OutcomeDescriptor, TransitionTarget};
pub use resolver::CombatOutcomeResolver;
