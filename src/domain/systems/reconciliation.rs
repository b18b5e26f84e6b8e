use crate::domain::tuning::ReconcileTuning;
use crate::domain::{LocalEntity, PeerSnapshot};

/// What reconciliation did to the local entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Correction {
    /// No local entity existed; one was built from the authority.
    Seeded,
    /// Moved `factor` of the way toward the authority.
    Blended { distance: f32, factor: f32 },
    /// Jumped straight to the authoritative position.
    Snapped { distance: f32 },
}

/// Pulls the predicted local entity toward its authoritative record.
///
/// Status flags are copied unconditionally; only position is blended.
pub fn reconcile(
    local: &mut Option<LocalEntity>,
    authority: &PeerSnapshot,
    tuning: &ReconcileTuning,
) -> Correction {
    let Some(e) = local.as_mut() else {
        *local = Some(LocalEntity::seeded_from(authority));
        return Correction::Seeded;
    };

    e.stunned = authority.status.stunned;

    let dx = authority.x - e.x;
    let dy = authority.y - e.y;
    let distance = (dx * dx + dy * dy).sqrt();

    if distance >= tuning.snap_threshold {
        e.x = authority.x;
        e.y = authority.y;
        return Correction::Snapped { distance };
    }

    let factor = if distance <= tuning.fine_threshold {
        tuning.fine_blend
    } else {
        tuning.coarse_blend
    };
    e.x += dx * factor;
    e.y += dy * factor;

    Correction::Blended { distance, factor }
}
