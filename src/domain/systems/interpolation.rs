use crate::domain::systems::normalize_angle;
use crate::domain::tuning::ArenaTuning;
use crate::domain::{PeerSnapshot, PeerStatus};

/// A remote peer's render pose for the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedPeer {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub facing: f32,
    pub status: PeerStatus,
}

/// Blends a peer from its previous to its current record.
///
/// Peers without a previous record, or that wrapped across the arena between
/// the two, are placed at the current record.
pub fn interpolate_peer(
    prev: Option<&PeerSnapshot>,
    curr: &PeerSnapshot,
    alpha: f32,
    arena: &ArenaTuning,
) -> InterpolatedPeer {
    let at_current = InterpolatedPeer {
        id: curr.id,
        x: curr.x,
        y: curr.y,
        facing: curr.facing,
        status: curr.status,
    };

    let Some(prev) = prev else {
        return at_current;
    };

    let wrapped =
        (curr.x - prev.x).abs() > arena.width / 2.0 || (curr.y - prev.y).abs() > arena.height / 2.0;
    if wrapped {
        return at_current;
    }

    let alpha = alpha.clamp(0.0, 1.0);
    InterpolatedPeer {
        x: lerp(prev.x, curr.x, alpha),
        y: lerp(prev.y, curr.y, alpha),
        facing: lerp_angle(prev.facing, curr.facing, alpha),
        ..at_current
    }
}

pub fn lerp(from: f32, to: f32, alpha: f32) -> f32 {
    from + (to - from) * alpha
}

/// Lerps along the shortest arc.
pub fn lerp_angle(from: f32, to: f32, alpha: f32) -> f32 {
    from + normalize_angle(to - from) * alpha
}
