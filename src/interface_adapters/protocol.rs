// Wire protocol DTOs and their validated conversion into domain records.

use crate::domain::{
    InputIntent, PeerSnapshot, PeerStatus, PickupSnapshot, ProjectileSnapshot, Snapshot,
    SnapshotEvent,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug)]
pub enum ProtocolError {
    Malformed(serde_json::Error),
    MissingSequence,
    DuplicateEntity(u64),
    InvalidRecord { index: usize, reason: &'static str },
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Malformed(e) => write!(f, "malformed message: {e}"),
            ProtocolError::MissingSequence => write!(f, "snapshot has no sequence number"),
            ProtocolError::DuplicateEntity(id) => write!(f, "entity {id} appears twice"),
            ProtocolError::InvalidRecord { index, reason } => {
                write!(f, "entity record {index} invalid: {reason}")
            }
        }
    }
}

impl std::error::Error for ProtocolError {}

impl From<serde_json::Error> for ProtocolError {
    fn from(e: serde_json::Error) -> Self {
        ProtocolError::Malformed(e)
    }
}

/// Messages the authority sends to this client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    // Assigned identity for this connection.
    Identity { player_id: u64 },
    // Authoritative world snapshot.
    Snapshot(SnapshotDto),
}

/// Messages this client sends to the authority.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    Input(InputIntentDto),
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotDto {
    // Optional on the wire so a missing value is reported, not a parse error.
    #[serde(default)]
    pub seq: Option<u32>,
    #[serde(default)]
    pub players: Vec<PeerRecordDto>,
    #[serde(default)]
    pub projectiles: Vec<ProjectileDto>,
    #[serde(default)]
    pub pickups: Vec<PickupDto>,
    #[serde(default)]
    pub events: Vec<EventDto>,
    #[serde(default)]
    pub arena_inset: Option<f32>,
    #[serde(default)]
    pub time_remaining: Option<f32>,
}

/// Per-entity record, either named or in the compact positional layout
/// `[id, x, y, facing, health, weapon, stunned, invincible, light_on]`
/// with 0/1 flags.
#[derive(Debug, Clone)]
pub enum PeerRecordDto {
    Named(NamedPeerDto),
    Positional(PositionalPeerDto),
}

// Dispatch on the JSON shape so a short array never falls back to the named
// layout with defaulted fields.
impl<'de> Deserialize<'de> for PeerRecordDto {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let value = serde_json::Value::deserialize(deserializer)?;
        if value.is_array() {
            PositionalPeerDto::deserialize(value)
                .map(PeerRecordDto::Positional)
                .map_err(D::Error::custom)
        } else if value.is_object() {
            NamedPeerDto::deserialize(value)
                .map(PeerRecordDto::Named)
                .map_err(D::Error::custom)
        } else {
            Err(D::Error::custom("entity record must be an object or an array"))
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedPeerDto {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub facing: f32,
    #[serde(default)]
    pub health: i32,
    #[serde(default)]
    pub weapon: i32,
    #[serde(default)]
    pub stunned: bool,
    #[serde(default)]
    pub invincible: bool,
    #[serde(default)]
    pub light_on: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PositionalPeerDto(
    pub u64,
    pub f32,
    pub f32,
    pub f32,
    pub i32,
    pub i32,
    pub u8,
    pub u8,
    pub u8,
);

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectileDto {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub vx: f32,
    #[serde(default)]
    pub vy: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PickupDto {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventDto {
    Hit { target_id: u64, attacker_id: u64 },
    Death { entity_id: u64 },
    Pickup { pickup_id: u64, collector_id: u64 },
    Throw { thrower_id: u64, x: f32, y: f32 },
    Sound {
        x: f32,
        y: f32,
        #[serde(default = "default_volume")]
        volume: f32,
    },
    Light { on: bool },
}

fn default_volume() -> f32 {
    1.0
}

impl From<EventDto> for SnapshotEvent {
    fn from(event: EventDto) -> Self {
        match event {
            EventDto::Hit {
                target_id,
                attacker_id,
            } => SnapshotEvent::Hit {
                target_id,
                attacker_id,
            },
            EventDto::Death { entity_id } => SnapshotEvent::Death { entity_id },
            EventDto::Pickup {
                pickup_id,
                collector_id,
            } => SnapshotEvent::PickupCollected {
                pickup_id,
                collector_id,
            },
            EventDto::Throw { thrower_id, x, y } => SnapshotEvent::Throw { thrower_id, x, y },
            EventDto::Sound { x, y, volume } => SnapshotEvent::Sound { x, y, volume },
            EventDto::Light { on } => SnapshotEvent::LightToggle { on },
        }
    }
}

fn flag(value: u8, index: usize) -> Result<bool, ProtocolError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(ProtocolError::InvalidRecord {
            index,
            reason: "status flag must be 0 or 1",
        }),
    }
}

impl PeerRecordDto {
    fn into_peer(self, index: usize) -> Result<PeerSnapshot, ProtocolError> {
        let peer = match self {
            PeerRecordDto::Named(p) => PeerSnapshot {
                id: p.id,
                x: p.x,
                y: p.y,
                facing: p.facing,
                status: PeerStatus {
                    health: p.health,
                    weapon: p.weapon,
                    stunned: p.stunned,
                    invincible: p.invincible,
                    light_on: p.light_on,
                },
            },
            PeerRecordDto::Positional(PositionalPeerDto(
                id,
                x,
                y,
                facing,
                health,
                weapon,
                stunned,
                invincible,
                light_on,
            )) => PeerSnapshot {
                id,
                x,
                y,
                facing,
                status: PeerStatus {
                    health,
                    weapon,
                    stunned: flag(stunned, index)?,
                    invincible: flag(invincible, index)?,
                    light_on: flag(light_on, index)?,
                },
            },
        };

        if !(peer.x.is_finite() && peer.y.is_finite() && peer.facing.is_finite()) {
            return Err(ProtocolError::InvalidRecord {
                index,
                reason: "non-finite coordinate",
            });
        }
        Ok(peer)
    }
}

impl TryFrom<SnapshotDto> for Snapshot {
    type Error = ProtocolError;

    fn try_from(dto: SnapshotDto) -> Result<Self, Self::Error> {
        let seq = dto.seq.ok_or(ProtocolError::MissingSequence)?;

        let mut seen = HashSet::with_capacity(dto.players.len());
        let mut peers = Vec::with_capacity(dto.players.len());
        for (index, record) in dto.players.into_iter().enumerate() {
            let peer = record.into_peer(index)?;
            if !seen.insert(peer.id) {
                return Err(ProtocolError::DuplicateEntity(peer.id));
            }
            peers.push(peer);
        }

        Ok(Snapshot {
            seq,
            peers,
            projectiles: dto
                .projectiles
                .into_iter()
                .map(|p| ProjectileSnapshot {
                    id: p.id,
                    x: p.x,
                    y: p.y,
                    vx: p.vx,
                    vy: p.vy,
                })
                .collect(),
            pickups: dto
                .pickups
                .into_iter()
                .map(|p| PickupSnapshot {
                    id: p.id,
                    x: p.x,
                    y: p.y,
                    active: p.active,
                })
                .collect(),
            events: dto.events.into_iter().map(SnapshotEvent::from).collect(),
            arena_inset: dto.arena_inset,
            time_remaining: dto.time_remaining,
        })
    }
}

/// Input intent as exchanged with the input collaborator and the authority.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InputIntentDto {
    #[serde(default)]
    pub up: bool,
    #[serde(default)]
    pub down: bool,
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub sprint: bool,
    #[serde(default)]
    pub facing: f32,
    #[serde(default)]
    pub throw: bool,
    #[serde(default)]
    pub toggle_light: bool,
}

impl From<InputIntentDto> for InputIntent {
    fn from(dto: InputIntentDto) -> Self {
        Self {
            up: dto.up,
            down: dto.down,
            left: dto.left,
            right: dto.right,
            sprint: dto.sprint,
            facing: dto.facing,
            throw: dto.throw,
            toggle_light: dto.toggle_light,
        }
    }
}

impl From<&InputIntent> for InputIntentDto {
    fn from(input: &InputIntent) -> Self {
        Self {
            up: input.up,
            down: input.down,
            left: input.left,
            right: input.right,
            sprint: input.sprint,
            facing: input.facing,
            throw: input.throw,
            toggle_light: input.toggle_light,
        }
    }
}

pub fn decode_server_message(text: &str) -> Result<ServerMessage, ProtocolError> {
    Ok(serde_json::from_str(text)?)
}

/// Decodes an input intent; anything but a JSON object is rejected.
pub fn decode_input(text: &str) -> Result<InputIntent, ProtocolError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(ProtocolError::Malformed(serde::de::Error::custom(
            "input intent must be an object",
        )));
    }
    let dto = InputIntentDto::deserialize(value)?;
    Ok(dto.into())
}

pub fn encode_input(input: &InputIntent) -> Result<String, ProtocolError> {
    let msg = ClientMessage::Input(InputIntentDto::from(input));
    Ok(serde_json::to_string(&msg)?)
}
