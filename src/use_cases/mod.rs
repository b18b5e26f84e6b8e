// Use cases layer: stateful client workflows built on the pure domain systems.

pub mod frame_pump;
pub mod sequencer;
pub mod session;

pub use frame_pump::{Frame, FramePump, FramePumpSettings};
pub use sequencer::{SnapshotSequencer, forward_distance};
pub use session::{ClientSession, PeerView, RenderStats, SessionSettings};
