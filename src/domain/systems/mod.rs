// Pure per-frame systems. None of these hold entity state of their own.

pub mod collision;
pub mod interpolation;
pub mod prediction;
pub mod reconciliation;
pub mod visibility;

use std::f32::consts::{PI, TAU};

/// Normalizes an angle difference into `[-PI, PI]`.
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid maps +PI to -PI; keep the sign of the input at the seam.
    if wrapped == -PI && angle > 0.0 { PI } else { wrapped }
}
