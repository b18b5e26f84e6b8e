// Sequence-gated snapshot ingestion and the interpolation pair.

use crate::domain::Snapshot;
use tracing::trace;

/// Half of the 2^32 sequence circle.
pub const HALF_SEQUENCE_SPACE: u32 = 1 << 31;

/// Circular distance travelled going forward from `last` to `incoming`.
pub fn forward_distance(last: u32, incoming: u32) -> u32 {
    incoming.wrapping_sub(last)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotSequencer {
    previous: Option<Snapshot>,
    current: Option<Snapshot>,
    // Seconds since `current` was accepted.
    elapsed: f32,
    // Sticky: only overwritten by snapshots that carry an inset.
    current_inset: f32,
}

impl SnapshotSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits `snapshot` unless it is more than half the sequence space behind
    /// the last accepted one. Rejection leaves state untouched; callers must
    /// skip the snapshot's events too.
    pub fn accept(&mut self, snapshot: Snapshot) -> bool {
        if let Some(current) = &self.current {
            let forward = forward_distance(current.seq, snapshot.seq);
            if forward > HALF_SEQUENCE_SPACE {
                trace!(last = current.seq, incoming = snapshot.seq, "stale snapshot dropped");
                return false;
            }
        }

        if let Some(inset) = snapshot.arena_inset {
            self.current_inset = inset;
        }
        self.previous = self.current.replace(snapshot);
        self.elapsed = 0.0;
        true
    }

    /// Accounts frame time against the current snapshot.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// Interpolation factor from previous to current over `delay` seconds.
    pub fn alpha(&self, delay: f32) -> f32 {
        if delay <= 0.0 {
            return 1.0;
        }
        (self.elapsed / delay).clamp(0.0, 1.0)
    }

    pub fn previous(&self) -> Option<&Snapshot> {
        self.previous.as_ref()
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.current.as_ref()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn current_inset(&self) -> f32 {
        self.current_inset
    }

    /// Forgets all snapshots, as after a disconnect.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(seq: u32) -> Snapshot {
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

    #[test]
    fn when_first_snapshot_then_always_accepted() {
        let mut s = SnapshotSequencer::new();
        assert!(s.accept(snap(u32::MAX)));
        assert_eq!(s.current().map(|c| c.seq), Some(u32::MAX));
        assert!(s.previous().is_none());
    }

    #[test]
    fn when_sequence_wraps_forward_then_accepted() {
        let mut s = SnapshotSequencer::new();
        s.accept(snap(4_294_967_290));
        assert!(s.accept(snap(5)));
        assert_eq!(s.previous().map(|p| p.seq), Some(4_294_967_290));
        assert_eq!(s.current().map(|c| c.seq), Some(5));
    }

    #[test]
    fn when_sequence_is_behind_then_rejected() {
        let mut s = SnapshotSequencer::new();
        s.accept(snap(10));
        assert!(!s.accept(snap(3)));
        assert_eq!(s.current().map(|c| c.seq), Some(10));
    }

    #[test]
    fn when_forward_is_exactly_half_then_accepted_and_one_more_rejected() {
        let mut s = SnapshotSequencer::new();
        s.accept(snap(0));
        let mut probe = s.clone();
        assert!(probe.accept(snap(HALF_SEQUENCE_SPACE)));
        assert!(!s.accept(snap(HALF_SEQUENCE_SPACE + 1)));
    }

    #[test]
    fn when_duplicate_then_accepted_and_pair_shifts() {
        let mut s = SnapshotSequencer::new();
        s.accept(snap(8));
        assert!(s.accept(snap(8)));
        assert_eq!(s.previous().map(|p| p.seq), Some(8));
    }

    #[test]
    fn when_rejected_twice_then_state_is_identical() {
        let mut s = SnapshotSequencer::new();
        s.accept(snap(100));
        s.accept(snap(101));
        s.advance(0.02);
        let before = s.clone();
        assert!(!s.accept(snap(50)));
        assert!(!s.accept(snap(51)));
        assert_eq!(s, before);
    }

    #[test]
    fn when_accepted_then_elapsed_resets() {
        let mut s = SnapshotSequencer::new();
        s.accept(snap(1));
        s.advance(0.04);
        assert!((s.alpha(0.05) - 0.8).abs() < 1e-5);
        s.accept(snap(2));
        assert_eq!(s.elapsed(), 0.0);
        s.advance(1.0);
        assert_eq!(s.alpha(0.05), 1.0);
    }

    #[test]
    fn when_inset_absent_then_prior_inset_is_kept() {
        let mut s = SnapshotSequencer::new();
        s.accept(Snapshot {
            arena_inset: Some(40.0),
            ..snap(1)
        });
        s.accept(snap(2));
        assert_eq!(s.current_inset(), 40.0);
        s.accept(Snapshot {
            arena_inset: Some(0.0),
            ..snap(3)
        });
        assert_eq!(s.current_inset(), 0.0);
    }
}
