//! Data-driven content definitions and loaders.
//!
//! This crate reads the static data the run lifecycle is parameterized by:
//! - Run tuning (`config.toml`)
//! - Hostile profiles and per-tier interception rosters (`hostiles.ron`)
//! - Boss encounters and their first-time / repeat rewards (`bosses.ron`)
//! - Ship loadouts per profile slot (`loadouts.ron`)
//! - Salvage and blueprint drop tables (`loot.ron`)
//!
//! Content is consumed by runtime oracles and never appears in session state.
//! All loaders deserialize extraction-core types directly where they exist.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    BlueprintEntry, BossLoader, CardEntry, ConfigLoader, ContentFactory, HostileCatalog,
    HostileLoader, LoadoutLoader, LootLoader, LootTables, SalvageEntry, SectionSpec,
};
