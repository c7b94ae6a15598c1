//! Velocity integration with axis-aligned wall resolution.

use bevy_ecs::{
    query::{With, Without},
    system::{Query, Res},
};
use glam::Vec2;
use tracing::trace;

use crate::{
    map::builder::Map,
    systems::{
        components::{Body, DeltaTime, PlayerControlled, Position, Velocity, WallCollider},
        state::GameStage,
    },
};

/// True when two boxes overlap with non-zero area. Touching edges do not count.
pub fn aabb_overlap(a_center: Vec2, a_half: Vec2, b_center: Vec2, b_half: Vec2) -> bool {
    let gap = (a_center - b_center).abs();
    let reach = a_half + b_half;
    gap.x < reach.x && gap.y < reach.y
}

/// True when a box and a circle overlap, using the closest point on the box.
pub fn aabb_circle_overlap(box_center: Vec2, half_extents: Vec2, circle_center: Vec2, radius: f32) -> bool {
    let closest = circle_center.clamp(box_center - half_extents, box_center + half_extents);
    closest.distance_squared(circle_center) <= radius * radius
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn get(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    fn set(self, v: &mut Vec2, value: f32) {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
        }
    }
}

/// Moves `center` along one axis by `delta`, then pushes it back out of any wall it entered.
fn sweep_axis(center: &mut Vec2, half: Vec2, delta: f32, axis: Axis, walls: &[(Vec2, Vec2)]) {
    if delta == 0.0 {
        return;
    }
    axis.set(center, axis.get(*center) + delta);

    for &(wall_center, wall_half) in walls {
        if !aabb_overlap(*center, half, wall_center, wall_half) {
            continue;
        }

        let flush = if delta > 0.0 {
            axis.get(wall_center) - axis.get(wall_half) - axis.get(half)
        } else {
            axis.get(wall_center) + axis.get(wall_half) + axis.get(half)
        };
        axis.set(center, flush);
    }
}

/// Splits a frame's travel into sub-steps no longer than half the body's smallest extent.
///
/// Travel is first limited to the board size, since anything further is clamped away anyway.
fn sub_steps(step: Vec2, half: Vec2, bounds: Vec2) -> (Vec2, u32) {
    let step = step.clamp(-bounds, bounds);
    let limit = half.min_element().max(1.0);
    let count = (step.abs().max_element() / limit).ceil().max(1.0) as u32;
    (step / count as f32, count)
}

/// Integrates velocity for solid bodies, one axis at a time, then clamps them inside the board.
pub fn physics_system(
    map: Res<Map>,
    delta_time: Res<DeltaTime>,
    stage: Res<GameStage>,
    mut bodies: Query<(&mut Position, &Velocity, &Body), With<PlayerControlled>>,
    walls: Query<(&Position, &Body), (With<WallCollider>, Without<PlayerControlled>)>,
) {
    if stage.is_over() {
        return;
    }

    let wall_boxes: Vec<(Vec2, Vec2)> = walls.iter().map(|(p, b)| (p.0, b.half_extents)).collect();
    let bounds = map.pixel_size().as_vec2();

    for (mut position, velocity, body) in bodies.iter_mut() {
        if velocity.0 == Vec2::ZERO {
            continue;
        }

        let step = velocity.0 * delta_time.seconds;
        if !step.is_finite() {
            continue;
        }
        let mut center = position.0;
        let half = body.half_extents;

        let (increment, count) = sub_steps(step, half, bounds);
        for _ in 0..count {
            sweep_axis(&mut center, half, increment.x, Axis::X, &wall_boxes);
            sweep_axis(&mut center, half, increment.y, Axis::Y, &wall_boxes);
        }
        center = center.clamp(half, (bounds - half).max(half));

        trace!(from = ?position.0, to = ?center, "Body moved");
        position.0 = center;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_boxes_do_not_overlap() {
        let half = Vec2::splat(8.0);
        assert!(!aabb_overlap(Vec2::new(8.0, 8.0), half, Vec2::new(24.0, 8.0), half));
        assert!(aabb_overlap(Vec2::new(8.0, 8.0), half, Vec2::new(23.0, 8.0), half));
    }

    #[test]
    fn test_sweep_stops_flush() {
        let walls = [(Vec2::new(8.0, 24.0), Vec2::splat(8.0))];
        let mut center = Vec2::new(30.0, 24.0);
        sweep_axis(&mut center, Vec2::splat(6.0), -10.0, Axis::X, &walls);
        assert_eq!(center, Vec2::new(22.0, 24.0));
    }

    #[test]
    fn test_sub_steps_bound_travel() {
        let half = Vec2::splat(6.0);
        let bounds = Vec2::new(320.0, 176.0);

        assert_eq!(sub_steps(Vec2::new(-1.5, 0.0), half, bounds), (Vec2::new(-1.5, 0.0), 1));
        assert_eq!(sub_steps(Vec2::new(30.0, 0.0), half, bounds), (Vec2::new(6.0, 0.0), 5));
        assert_eq!(sub_steps(Vec2::new(1.0e9, 0.0), half, bounds).1, 54);
    }

    #[test]
    fn test_circle_overlap_at_corner() {
        let half = Vec2::splat(6.0);
        assert!(aabb_circle_overlap(Vec2::ZERO, half, Vec2::new(7.0, 7.0), 2.0));
        assert!(!aabb_circle_overlap(Vec2::ZERO, half, Vec2::new(8.0, 8.0), 2.0));
    }
}
