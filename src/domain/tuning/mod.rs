// Static gameplay tuning consumed by the pure systems.
//
// Keep this separate from runtime configuration (frame cadence, channel sizes).

pub mod arena;
pub mod flashlight;
pub mod player;
pub mod reconcile;

pub use arena::ArenaTuning;
pub use flashlight::FlashlightTuning;
pub use player::PlayerTuning;
pub use reconcile::ReconcileTuning;

use serde::Deserialize;

/// All tuning tables, loadable from a single TOML document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena: ArenaTuning,
    pub player: PlayerTuning,
    pub flashlight: FlashlightTuning,
    pub reconcile: ReconcileTuning,
}
