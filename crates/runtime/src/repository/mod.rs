//! Durable storage for session snapshots.
//!
//! The rules stage intermediate outcomes in [`extraction_core::SessionState`]
//! between two calls; repositories make that state survive a restart.
mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSessionRepository;
pub use memory::InMemorySessionRepository;
pub use traits::SessionRepository;
