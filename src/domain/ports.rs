use crate::domain::LocalEntity;
use crate::domain::systems::interpolation::InterpolatedPeer;
use std::fmt;

// Port for the audio/effects collaborators fed by accepted snapshot events.
pub trait EventSink {
    fn on_hit(&mut self, target_id: u64, attacker_id: u64);
    fn on_death(&mut self, entity_id: u64);
    fn on_pickup_collected(&mut self, pickup_id: u64, collector_id: u64);
    fn on_throw(&mut self, thrower_id: u64, x: f32, y: f32);
    fn on_sound(&mut self, x: f32, y: f32, volume: f32);
    fn on_light_toggle(&mut self, on: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    // The collaborator has no free object to represent another entity.
    PoolExhausted,
    Unavailable,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::PoolExhausted => write!(f, "render pool exhausted"),
            RenderError::Unavailable => write!(f, "render surface unavailable"),
        }
    }
}

impl std::error::Error for RenderError {}

// Port for the rendering collaborator.
pub trait RenderSink {
    fn begin_frame(&mut self) {}
    fn draw_local(&mut self, local: &LocalEntity) -> Result<(), RenderError>;
    fn draw_peer(&mut self, peer: &InterpolatedPeer) -> Result<(), RenderError>;
}
