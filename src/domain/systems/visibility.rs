use crate::domain::Obstacle;
use crate::domain::systems::collision::point_blocked;
use crate::domain::systems::normalize_angle;
use crate::domain::tuning::FlashlightTuning;

/// The perceiving side of a visibility query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewer {
    pub x: f32,
    pub y: f32,
    pub facing: f32,
    pub light_on: bool,
}

/// Decides whether a target at `(tx, ty)` is perceptible to `viewer` this frame.
///
/// Gates run in order: global override, viewer light, range, cone, then line
/// of sight marched in `ray_step` increments against every obstacle.
pub fn is_visible(
    viewer: &Viewer,
    tx: f32,
    ty: f32,
    global_override: bool,
    light: &FlashlightTuning,
    obstacles: &[Obstacle],
) -> bool {
    if global_override {
        return true;
    }
    if !viewer.light_on {
        return false;
    }

    let dx = tx - viewer.x;
    let dy = ty - viewer.y;
    let distance = (dx * dx + dy * dy).sqrt();
    if distance > light.range {
        return false;
    }
    if distance <= f32::EPSILON {
        // Co-located: no direction to test.
        return true;
    }

    let off_axis = normalize_angle(dy.atan2(dx) - viewer.facing);
    let half_cone = light.cone_degrees.to_radians() / 2.0;
    if off_axis.abs() > half_cone {
        return false;
    }

    line_of_sight(viewer.x, viewer.y, dx, dy, distance, light.ray_step, obstacles)
}

fn line_of_sight(
    ox: f32,
    oy: f32,
    dx: f32,
    dy: f32,
    distance: f32,
    step: f32,
    obstacles: &[Obstacle],
) -> bool {
    if obstacles.is_empty() || step <= 0.0 {
        return true;
    }

    let samples = (distance / step).floor() as u32;
    (1..=samples).all(|i| {
        let t = (i as f32 * step) / distance;
        !point_blocked(ox + dx * t, oy + dy * t, obstacles)
    })
}
