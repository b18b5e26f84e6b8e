// Shared fixtures for session and runtime integration tests.
#![allow(dead_code)]

use arena_sync::domain::systems::interpolation::InterpolatedPeer;
use arena_sync::domain::{
    EventSink, LocalEntity, PeerSnapshot, PeerStatus, RenderError, RenderSink, Snapshot,
    SnapshotEvent, Tuning,
};
use arena_sync::use_cases::{ClientSession, SessionSettings};

pub const LOCAL_ID: u64 = 1;

// Build a bare snapshot with no peers or events.
pub fn snapshot(seq: u32) -> Snapshot {
    Snapshot {
        seq,
        peers: Vec::new(),
        projectiles: Vec::new(),
        pickups: Vec::new(),
        events: Vec::new(),
        arena_inset: None,
        time_remaining: None,
    }
}

pub fn peer(id: u64, x: f32, y: f32) -> PeerSnapshot {
    PeerSnapshot {
        id,
        x,
        y,
        facing: 0.0,
        status: PeerStatus {
            health: 3,
            light_on: true,
            ..Default::default()
        },
    }
}

pub fn with_peers(seq: u32, peers: Vec<PeerSnapshot>) -> Snapshot {
    Snapshot {
        peers,
        ..snapshot(seq)
    }
}

pub fn with_events(seq: u32, events: Vec<SnapshotEvent>) -> Snapshot {
    Snapshot {
        events,
        ..snapshot(seq)
    }
}

// Records every dispatched event in order.
#[derive(Debug, Default)]
pub struct RecordingEvents {
    pub log: Vec<String>,
}

impl EventSink for RecordingEvents {
    fn on_hit(&mut self, target_id: u64, attacker_id: u64) {
        self.log.push(format!("hit {target_id} by {attacker_id}"));
    }

    fn on_death(&mut self, entity_id: u64) {
        self.log.push(format!("death {entity_id}"));
    }

    fn on_pickup_collected(&mut self, pickup_id: u64, collector_id: u64) {
        self.log.push(format!("pickup {pickup_id} by {collector_id}"));
    }

    fn on_throw(&mut self, thrower_id: u64, _x: f32, _y: f32) {
        self.log.push(format!("throw {thrower_id}"));
    }

    fn on_sound(&mut self, _x: f32, _y: f32, _volume: f32) {
        self.log.push("sound".to_string());
    }

    fn on_light_toggle(&mut self, on: bool) {
        self.log.push(format!("light {on}"));
    }
}

// Renderer with a fixed pool of peer slots per frame.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub slots: usize,
    pub local: Option<LocalEntity>,
    pub peers: Vec<u64>,
}

impl RecordingRenderer {
    pub fn with_slots(slots: usize) -> Self {
        Self {
            slots,
            ..Default::default()
        }
    }
}

impl RenderSink for RecordingRenderer {
    fn begin_frame(&mut self) {
        self.local = None;
        self.peers.clear();
    }

    fn draw_local(&mut self, local: &LocalEntity) -> Result<(), RenderError> {
        self.local = Some(local.clone());
        Ok(())
    }

    fn draw_peer(&mut self, peer: &InterpolatedPeer) -> Result<(), RenderError> {
        if self.peers.len() >= self.slots {
            return Err(RenderError::PoolExhausted);
        }
        self.peers.push(peer.id);
        Ok(())
    }
}

pub fn session() -> ClientSession<RecordingEvents> {
    session_with(Tuning::default())
}

pub fn session_with(tuning: Tuning) -> ClientSession<RecordingEvents> {
    ClientSession::new(
        SessionSettings {
            local_id: LOCAL_ID,
            interpolation_delay: 0.05,
            tuning,
        },
        RecordingEvents::default(),
    )
}
