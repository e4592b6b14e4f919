//! Runtime orchestration for the extraction run lifecycle.
//!
//! This crate wires the extraction-core rules to loaded content, a telemetry
//! bus, and session persistence. Consumers embed [`RunCoordinator`] to start
//! runs, resolve combats, extract, and subscribe to mission events.
//!
//! Modules are organized by responsibility:
//! - [`coordinator`] hosts the coordinator and its builder
//! - [`oracle`] implements the collaborator traits over static content
//! - [`events`] provides the broadcast telemetry bus
//! - [`repository`] stores session snapshots durably
pub mod coordinator;
pub mod error;
pub mod events;
pub mod oracle;
pub mod repository;

pub use coordinator::{CoordinatorConfig, RunCoordinator, RunCoordinatorBuilder};
pub use error::{Result, RuntimeError};
pub use events::{EventBus, MissionRecord};
pub use oracle::{
    HostileOracleImpl, LoadoutOracleImpl, LootOracleImpl, OracleManager, ReputationOracleImpl,
    ThreatTracker,
};
pub use repository::{
    FileSessionRepository, InMemorySessionRepository, RepositoryError, SessionRepository,
};
