//! Detection / signal-lock tracking.

/// External threat accumulator.
///
/// Implementations hold their own level; callers mirror it into the run.
pub trait ThreatOracle: Send + Sync {
    /// Current detection percentage in `[0, 100]`.
    fn current_level(&self) -> f64;

    fn adjust_level(&self, delta: f64, reason: &str);

    /// Clears accumulated detection.
    fn reset_tracking(&self);
}
