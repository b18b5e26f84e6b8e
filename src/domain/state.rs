// Domain-level entity, snapshot and input types for the client core.

/// Authoritative status flags carried per entity. Never predicted locally.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeerStatus {
    pub health: i32,
    pub weapon: i32,
    pub stunned: bool,
    pub invincible: bool,
    pub light_on: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeerSnapshot {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub facing: f32,
    pub status: PeerStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileSnapshot {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickupSnapshot {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub active: bool,
}

/// Discrete events attached to a snapshot. Dispatched once, only when the
/// snapshot carrying them is accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotEvent {
    Hit { target_id: u64, attacker_id: u64 },
    Death { entity_id: u64 },
    PickupCollected { pickup_id: u64, collector_id: u64 },
    Throw { thrower_id: u64, x: f32, y: f32 },
    Sound { x: f32, y: f32, volume: f32 },
    // Arena-wide lights: while on, every entity is perceptible.
    LightToggle { on: bool },
}

/// One authoritative world update. Entity ids are unique (checked at decode).
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub seq: u32,
    pub peers: Vec<PeerSnapshot>,
    pub projectiles: Vec<ProjectileSnapshot>,
    pub pickups: Vec<PickupSnapshot>,
    pub events: Vec<SnapshotEvent>,
    pub arena_inset: Option<f32>,
    pub time_remaining: Option<f32>,
}

impl Snapshot {
    pub fn peer(&self, id: u64) -> Option<&PeerSnapshot> {
        self.peers.iter().find(|p| p.id == id)
    }
}

/// The locally owned, speculatively simulated entity.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalEntity {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub facing: f32,
    pub stunned: bool,
}

impl LocalEntity {
    /// Seeds a local entity from its authoritative record, at rest.
    pub fn seeded_from(peer: &PeerSnapshot) -> Self {
        Self {
            x: peer.x,
            y: peer.y,
            vx: 0.0,
            vy: 0.0,
            facing: peer.facing,
            stunned: peer.status.stunned,
        }
    }
}

/// Input intent sampled from the input collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
    /// Facing angle in radians.
    pub facing: f32,
    pub throw: bool,
    pub toggle_light: bool,
}

/// Static axis-aligned obstacle; `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Obstacle {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }
}
