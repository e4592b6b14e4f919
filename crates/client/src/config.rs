//! Simulator configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use extraction_core::RunConfig;

/// Everything the simulator needs to assemble a coordinator and drive a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Content directory; the bundled content when absent.
    pub data_dir: Option<PathBuf>,
    /// Map seed; random when absent.
    pub seed: Option<u64>,
    pub ship_slot: u32,
    pub tier: u8,
    pub session_id: String,
    /// Sessions are saved here when set.
    pub save_data_dir: Option<PathBuf>,
    /// Log file directory in addition to stderr.
    pub log_dir: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            seed: None,
            ship_slot: RunConfig::STARTER_SHIP_SLOT,
            tier: 1,
            session_id: "default".to_owned(),
            save_data_dir: None,
            log_dir: None,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `EXTRACTION_DATA_DIR` - Content directory (default: bundled content)
    /// - `EXTRACTION_SEED` - Map seed (default: random)
    /// - `EXTRACTION_SHIP_SLOT` - Loadout slot to fly (default: 0)
    /// - `EXTRACTION_TIER` - Map tier, at least 1 (default: 1)
    /// - `GAME_SESSION_ID` - Session identifier for save files (default: "default")
    /// - `SAVE_DATA_DIR` - Directory for session saves (default: no persistence)
    /// - `LOG_DIR` - Directory for a log file (default: stderr only)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        config.data_dir = read("EXTRACTION_DATA_DIR").map(PathBuf::from);
        config.seed = read("EXTRACTION_SEED").and_then(|v| v.trim().parse().ok());
        if let Some(slot) = read("EXTRACTION_SHIP_SLOT").and_then(|v| v.trim().parse().ok()) {
            config.ship_slot = slot;
        }
        if let Some(tier) = read("EXTRACTION_TIER").and_then(|v| v.trim().parse::<u8>().ok()) {
            config.tier = tier.max(1);
        }
        if let Some(session_id) = read("GAME_SESSION_ID") {
            config.session_id = session_id;
        }
        config.save_data_dir = read("SAVE_DATA_DIR").map(PathBuf::from);
        config.log_dir = read("LOG_DIR").map(PathBuf::from);

        config
    }
}
