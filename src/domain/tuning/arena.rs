use crate::domain::Obstacle;
use serde::Deserialize;

/// Arena geometry shared by prediction and visibility.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArenaTuning {
    /// Arena width in world units.
    pub width: f32,

    /// Arena height in world units.
    pub height: f32,

    /// Half the side length of an entity's square hit-box.
    pub half_size: f32,

    /// Static obstacle rectangles.
    pub obstacles: Vec<Obstacle>,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            width: 2000.0,
            height: 2000.0,
            half_size: 20.0,
            obstacles: Vec::new(),
        }
    }
}
