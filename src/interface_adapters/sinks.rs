// Tracing-backed collaborator sinks used by the headless client.

use crate::domain::systems::interpolation::InterpolatedPeer;
use crate::domain::{EventSink, LocalEntity, RenderError, RenderSink};
use tracing::{debug, trace};

#[derive(Debug, Default)]
pub struct TracingEventSink {
    pub dispatched: u64,
}

impl EventSink for TracingEventSink {
    fn on_hit(&mut self, target_id: u64, attacker_id: u64) {
        self.dispatched += 1;
        debug!(target_id, attacker_id, "hit");
    }

    fn on_death(&mut self, entity_id: u64) {
        self.dispatched += 1;
        debug!(entity_id, "death");
    }

    fn on_pickup_collected(&mut self, pickup_id: u64, collector_id: u64) {
        self.dispatched += 1;
        debug!(pickup_id, collector_id, "pickup collected");
    }

    fn on_throw(&mut self, thrower_id: u64, x: f32, y: f32) {
        self.dispatched += 1;
        debug!(thrower_id, x, y, "throw");
    }

    fn on_sound(&mut self, x: f32, y: f32, volume: f32) {
        self.dispatched += 1;
        trace!(x, y, volume, "ambient sound");
    }

    fn on_light_toggle(&mut self, on: bool) {
        self.dispatched += 1;
        debug!(on, "arena lights toggled");
    }
}

/// Renderer stand-in with a fixed number of peer slots per frame.
#[derive(Debug)]
pub struct TracingRenderSink {
    peer_slots: usize,
    used: usize,
}

impl TracingRenderSink {
    pub fn new(peer_slots: usize) -> Self {
        Self {
            peer_slots,
            used: 0,
        }
    }
}

impl RenderSink for TracingRenderSink {
    fn begin_frame(&mut self) {
        self.used = 0;
    }

    fn draw_local(&mut self, local: &LocalEntity) -> Result<(), RenderError> {
        trace!(x = local.x, y = local.y, facing = local.facing, "draw local");
        Ok(())
    }

    fn draw_peer(&mut self, peer: &InterpolatedPeer) -> Result<(), RenderError> {
        if self.used >= self.peer_slots {
            return Err(RenderError::PoolExhausted);
        }
        self.used += 1;
        trace!(peer_id = peer.id, x = peer.x, y = peer.y, "draw peer");
        Ok(())
    }
}
