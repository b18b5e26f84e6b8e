use crate::domain::systems::collision::resolve_obstacles;
use crate::domain::tuning::{ArenaTuning, PlayerTuning};
use crate::domain::{InputIntent, LocalEntity};

/// Advances the local entity by one frame of dead reckoning.
///
/// `dt` is expected to be clamped by the frame pump. `arena_inset > 0`
/// selects the shrinking-arena clamp, otherwise the arena wraps.
pub fn predict(
    e: &mut LocalEntity,
    input: &InputIntent,
    dt: f32,
    arena_inset: f32,
    player: &PlayerTuning,
    arena: &ArenaTuning,
) {
    // Facing follows input even while stunned.
    e.facing = input.facing;

    if e.stunned {
        // Friction is tuned per nominal frame; scale it by elapsed frames.
        let decay = player
            .stun_friction
            .powf(dt * player.friction_reference_hz);
        e.vx *= decay;
        e.vy *= decay;
    } else {
        let (vx, vy) = intent_velocity(input, player);
        e.vx = vx;
        e.vy = vy;
    }

    e.x += e.vx * dt;
    e.y += e.vy * dt;

    if arena_inset > 0.0 {
        clamp_to_inset(e, arena_inset, arena);
    } else {
        wrap_entity(e, arena);
    }

    resolve_obstacles(e, arena.half_size, &arena.obstacles);
}

fn intent_velocity(input: &InputIntent, player: &PlayerTuning) -> (f32, f32) {
    // Screen coordinates: +Y is down.
    let dx = (input.right as i8 - input.left as i8) as f32;
    let dy = (input.down as i8 - input.up as i8) as f32;

    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        return (0.0, 0.0);
    }

    let speed = if input.sprint {
        player.sprint_speed
    } else {
        player.base_speed
    };
    (dx / len * speed, dy / len * speed)
}

fn clamp_to_inset(e: &mut LocalEntity, inset: f32, arena: &ArenaTuning) {
    let min = inset + arena.half_size;
    let max_x = arena.width - inset - arena.half_size;
    let max_y = arena.height - inset - arena.half_size;

    if e.x < min {
        e.x = min;
        e.vx = 0.0;
    } else if e.x > max_x {
        e.x = max_x;
        e.vx = 0.0;
    }

    if e.y < min {
        e.y = min;
        e.vy = 0.0;
    } else if e.y > max_y {
        e.y = max_y;
        e.vy = 0.0;
    }
}

// Wrap only once the sprite is fully off-screen, keeping the overshoot.
fn wrap_entity(e: &mut LocalEntity, arena: &ArenaTuning) {
    let h = arena.half_size;
    let span_x = arena.width + 2.0 * h;
    let span_y = arena.height + 2.0 * h;

    if e.x > arena.width + h {
        e.x -= span_x;
    } else if e.x < -h {
        e.x += span_x;
    }

    if e.y > arena.height + h {
        e.y -= span_y;
    } else if e.y < -h {
        e.y += span_y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Obstacle;

    fn at(x: f32, y: f32) -> LocalEntity {
        LocalEntity {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            facing: 0.0,
            stunned: false,
        }
    }

    #[test]
    fn when_moving_right_then_velocity_and_position_follow_base_speed() {
        let mut e = at(100.0, 100.0);
        let input = InputIntent {
            right: true,
            ..Default::default()
        };
        predict(
            &mut e,
            &input,
            0.1,
            0.0,
            &PlayerTuning::default(),
            &ArenaTuning::default(),
        );
        assert_eq!((e.vx, e.vy), (200.0, 0.0));
        assert!((e.x - 120.0).abs() < 1e-4);
        assert_eq!(e.y, 100.0);
    }

    #[test]
    fn when_moving_diagonally_then_speed_is_not_exceeded() {
        let mut e = at(500.0, 500.0);
        let input = InputIntent {
            up: true,
            left: true,
            sprint: true,
            ..Default::default()
        };
        let player = PlayerTuning::default();
        predict(&mut e, &input, 0.016, 0.0, &player, &ArenaTuning::default());
        let speed = (e.vx * e.vx + e.vy * e.vy).sqrt();
        assert!((speed - player.sprint_speed).abs() < 1e-3);
        assert!(e.vx < 0.0 && e.vy < 0.0);
    }

    #[test]
    fn when_opposite_keys_held_then_entity_stays_put() {
        let mut e = at(500.0, 500.0);
        let input = InputIntent {
            left: true,
            right: true,
            ..Default::default()
        };
        predict(
            &mut e,
            &input,
            0.1,
            0.0,
            &PlayerTuning::default(),
            &ArenaTuning::default(),
        );
        assert_eq!((e.x, e.y), (500.0, 500.0));
    }

    #[test]
    fn when_stunned_then_input_is_ignored_and_velocity_decays() {
        let mut e = at(500.0, 500.0);
        e.stunned = true;
        e.vx = 100.0;
        let input = InputIntent {
            down: true,
            facing: 1.0,
            ..Default::default()
        };
        predict(
            &mut e,
            &input,
            1.0 / 60.0,
            0.0,
            &PlayerTuning::default(),
            &ArenaTuning::default(),
        );
        assert!((e.vx - 85.0).abs() < 1e-3);
        assert_eq!(e.vy, 0.0);
        assert_eq!(e.facing, 1.0);
    }

    #[test]
    fn when_stunned_at_half_rate_then_decay_matches_two_nominal_frames() {
        let mut e = at(500.0, 500.0);
        e.stunned = true;
        e.vx = 100.0;
        predict(
            &mut e,
            &InputIntent::default(),
            1.0 / 30.0,
            0.0,
            &PlayerTuning::default(),
            &ArenaTuning::default(),
        );
        assert!((e.vx - 100.0 * 0.85 * 0.85).abs() < 1e-2);
    }

    #[test]
    fn when_crossing_right_edge_without_inset_then_wraps_to_small_negative_x() {
        let arena = ArenaTuning::default();
        let mut e = at(arena.width + arena.half_size + 1.0, 500.0);
        predict(
            &mut e,
            &InputIntent::default(),
            0.0,
            0.0,
            &PlayerTuning::default(),
            &arena,
        );
        assert!(e.x < 0.0 && e.x > -arena.half_size);
    }

    #[test]
    fn when_crossing_right_edge_with_inset_then_clamped_and_vx_zeroed() {
        let arena = ArenaTuning::default();
        let mut e = at(arena.width + arena.half_size + 1.0, 500.0);
        let input = InputIntent {
            right: true,
            ..Default::default()
        };
        predict(&mut e, &input, 0.0, 50.0, &PlayerTuning::default(), &arena);
        assert_eq!(e.x, arena.width - 50.0 - arena.half_size);
        assert_eq!(e.vx, 0.0);
    }

    #[test]
    fn when_leaving_top_edge_then_reappears_at_bottom() {
        let arena = ArenaTuning::default();
        let mut e = at(500.0, -arena.half_size - 2.0);
        predict(
            &mut e,
            &InputIntent::default(),
            0.0,
            0.0,
            &PlayerTuning::default(),
            &arena,
        );
        assert!(e.y > arena.height);
    }

    #[test]
    fn when_walking_into_obstacle_then_pushed_back_out() {
        let arena = ArenaTuning {
            obstacles: vec![Obstacle {
                x: 130.0,
                y: 0.0,
                w: 100.0,
                h: 400.0,
            }],
            ..Default::default()
        };
        let mut e = at(100.0, 200.0);
        let input = InputIntent {
            right: true,
            ..Default::default()
        };
        predict(&mut e, &input, 0.1, 0.0, &PlayerTuning::default(), &arena);
        assert!((e.x - (130.0 - arena.half_size)).abs() < 1e-4);
    }
}
