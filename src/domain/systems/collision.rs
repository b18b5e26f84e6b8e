use crate::domain::{LocalEntity, Obstacle};

/// Pushes the entity's hit-box out of every overlapping obstacle.
///
/// Each obstacle is resolved along its axis of least penetration, toward the
/// nearer edge on that axis. Obstacles are checked in order with no
/// broad-phase; counts are expected to stay in the tens.
pub fn resolve_obstacles(e: &mut LocalEntity, half_size: f32, obstacles: &[Obstacle]) {
    for ob in obstacles {
        push_out(e, half_size, ob);
    }
}

fn push_out(e: &mut LocalEntity, half_size: f32, ob: &Obstacle) {
    // Penetration depth past each obstacle edge.
    let from_left = (e.x + half_size) - ob.x;
    let from_right = (ob.x + ob.w) - (e.x - half_size);
    let from_top = (e.y + half_size) - ob.y;
    let from_bottom = (ob.y + ob.h) - (e.y - half_size);

    if from_left <= 0.0 || from_right <= 0.0 || from_top <= 0.0 || from_bottom <= 0.0 {
        return;
    }

    let x_overlap = from_left.min(from_right);
    let y_overlap = from_top.min(from_bottom);

    if x_overlap < y_overlap {
        if from_left < from_right {
            e.x -= from_left;
        } else {
            e.x += from_right;
        }
    } else if from_top < from_bottom {
        e.y -= from_top;
    } else {
        e.y += from_bottom;
    }
}

/// True when any obstacle contains the point.
pub fn point_blocked(px: f32, py: f32, obstacles: &[Obstacle]) -> bool {
    obstacles.iter().any(|ob| ob.contains(px, py))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity_at(x: f32, y: f32) -> LocalEntity {
        LocalEntity {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            facing: 0.0,
            stunned: false,
        }
    }

    const WALL: Obstacle = Obstacle {
        x: 100.0,
        y: 100.0,
        w: 50.0,
        h: 200.0,
    };

    #[test]
    fn when_overlapping_left_edge_slightly_then_pushed_left() {
        // Box spans 85..125 on x: 25 into the wall from the left, deep on y.
        let mut e = entity_at(105.0, 200.0);
        resolve_obstacles(&mut e, 20.0, &[WALL]);
        assert_eq!(e.x, 80.0);
        assert_eq!(e.y, 200.0);
    }

    #[test]
    fn when_overlapping_top_edge_slightly_then_pushed_up() {
        let mut e = entity_at(125.0, 90.0);
        resolve_obstacles(&mut e, 20.0, &[WALL]);
        assert_eq!(e.y, 80.0);
        assert_eq!(e.x, 125.0);
    }

    #[test]
    fn when_closer_to_right_edge_then_pushed_right() {
        let mut e = entity_at(145.0, 200.0);
        resolve_obstacles(&mut e, 20.0, &[WALL]);
        assert_eq!(e.x, 170.0);
    }

    #[test]
    fn when_touching_without_overlap_then_untouched() {
        let mut e = entity_at(80.0, 200.0);
        resolve_obstacles(&mut e, 20.0, &[WALL]);
        assert_eq!(e.x, 80.0);
    }

    #[test]
    fn when_point_inside_obstacle_then_blocked() {
        assert!(point_blocked(120.0, 150.0, &[WALL]));
        assert!(!point_blocked(10.0, 10.0, &[WALL]));
    }
}
