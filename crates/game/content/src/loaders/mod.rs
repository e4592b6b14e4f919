//! Content loaders for reading run data from files.
//!
//! Each loader turns one RON/TOML file into the values a runtime oracle is
//! built from.

pub mod bosses;
pub mod config;
pub mod factory;
pub mod hostiles;
pub mod loadouts;
pub mod loot;

pub use bosses::BossLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use hostiles::{HostileCatalog, HostileLoader};
pub use loadouts::{LoadoutLoader, SectionSpec};
pub use loot::{BlueprintEntry, CardEntry, LootLoader, LootTables, SalvageEntry};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

#[cfg(test)]
pub(crate) fn write_fixture(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("fixture should be writable");
    path
}
