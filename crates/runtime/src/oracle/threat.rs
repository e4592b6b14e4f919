//! Detection tracking implementing [`extraction_core::ThreatOracle`].
use std::sync::{Mutex, PoisonError};

use extraction_core::ThreatOracle;
use extraction_core::state::MAX_DETECTION;

#[derive(Debug, Default)]
struct ThreatState {
    level: f64,
    last_reason: Option<String>,
}

/// In-process detection accumulator clamped to `[0, 100]`.
#[derive(Debug, Default)]
pub struct ThreatTracker {
    state: Mutex<ThreatState>,
}

impl ThreatTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the level from durable run state, e.g. after a restore.
    pub fn set_level(&self, level: f64) {
        let mut state = self.lock();
        state.level = level.clamp(0.0, MAX_DETECTION);
        state.last_reason = None;
    }

    /// Reason given with the most recent adjustment.
    pub fn last_reason(&self) -> Option<String> {
        self.lock().last_reason.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ThreatState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ThreatOracle for ThreatTracker {
    fn current_level(&self) -> f64 {
        self.lock().level
    }

    fn adjust_level(&self, delta: f64, reason: &str) {
        let mut state = self.lock();
        state.level = (state.level + delta).clamp(0.0, MAX_DETECTION);
        state.last_reason = Some(reason.to_owned());
        tracing::debug!(delta, level = state.level, reason, "detection adjusted");
    }

    fn reset_tracking(&self) {
        let mut state = self.lock();
        state.level = 0.0;
        state.last_reason = None;
    }
}
