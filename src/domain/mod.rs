// Domain layer: core entity types, tuning, ports and pure per-frame systems.

pub mod ports;
pub mod state;
pub mod systems;
pub mod tuning;

pub use ports::{EventSink, RenderError, RenderSink};
pub use state::{
    InputIntent, LocalEntity, Obstacle, PeerSnapshot, PeerStatus, PickupSnapshot,
    ProjectileSnapshot, Snapshot, SnapshotEvent,
};
pub use tuning::Tuning;
