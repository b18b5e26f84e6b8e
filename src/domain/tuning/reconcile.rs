use serde::Deserialize;

/// Blend tiers for pulling the predicted position toward the authority.
///
/// Empirically tuned; expose for tuning rather than treating as fixed.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReconcileTuning {
    /// Errors up to and including this distance use `fine_blend`.
    pub fine_threshold: f32,

    /// Errors at or beyond this distance snap to the authority.
    pub snap_threshold: f32,

    /// Fraction of the gap closed per call for small errors.
    pub fine_blend: f32,

    /// Fraction of the gap closed per call between the two thresholds.
    pub coarse_blend: f32,
}

impl Default for ReconcileTuning {
    fn default() -> Self {
        Self {
            fine_threshold: 5.0,
            snap_threshold: 50.0,
            fine_blend: 0.3,
            coarse_blend: 0.5,
        }
    }
}
