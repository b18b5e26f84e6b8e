use serde::Deserialize;

/// Per-viewer light cone.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlashlightTuning {
    /// Maximum perceptible distance in world units.
    pub range: f32,

    /// Full opening angle of the cone in degrees.
    pub cone_degrees: f32,

    /// Ray-march step length for line-of-sight checks.
    pub ray_step: f32,
}

impl Default for FlashlightTuning {
    fn default() -> Self {
        Self {
            range: 450.0,
            cone_degrees: 60.0,
            ray_step: 10.0,
        }
    }
}
