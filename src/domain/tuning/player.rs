use serde::Deserialize;

/// Gameplay tuning for the locally controlled entity.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Walking speed in units per second.
    pub base_speed: f32,

    /// Sprinting speed in units per second.
    pub sprint_speed: f32,

    /// Velocity multiplier per nominal frame while stunned.
    pub stun_friction: f32,

    /// Frame rate the stun friction was tuned at.
    pub friction_reference_hz: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            base_speed: 200.0,
            sprint_speed: 320.0,
            stun_friction: 0.85,
            friction_reference_hz: 60.0,
        }
    }
}
