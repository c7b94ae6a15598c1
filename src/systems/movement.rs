//! Tweened tile-to-tile movement.

use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;
use bevy_ecs::event::EventWriter;
use bevy_ecs::system::{Query, Res};
use glam::Vec2;

use crate::events::StepCompleted;
use crate::systems::components::{DeltaTime, Position};

/// Per-entity step state: either resting on a tile or sliding between two tile centres.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub enum TileMotion {
    #[default]
    Idle,
    Moving {
        from: Vec2,
        to: Vec2,
        elapsed: f32,
        duration: f32,
    },
}

impl TileMotion {
    pub fn start(from: Vec2, to: Vec2, duration: f32) -> Self {
        TileMotion::Moving {
            from,
            to,
            elapsed: 0.0,
            duration,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, TileMotion::Idle)
    }

    /// Advances the step by `seconds` and returns the interpolated position.
    ///
    /// The second value is true on the tick the step finishes; the state is `Idle` afterwards and
    /// the position is exactly the destination.
    pub fn advance(&mut self, seconds: f32) -> Option<(Vec2, bool)> {
        match self {
            TileMotion::Idle => None,
            TileMotion::Moving {
                from,
                to,
                elapsed,
                duration,
            } => {
                *elapsed += seconds;
                if *duration <= 0.0 || *elapsed >= *duration {
                    let destination = *to;
                    *self = TileMotion::Idle;
                    Some((destination, true))
                } else {
                    let t = *elapsed / *duration;
                    Some((from.lerp(*to, t), false))
                }
            }
        }
    }
}

/// How long one tile step takes for this entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct Movable {
    pub step_duration: f32,
}

/// Advances every in-flight step and reports arrivals.
pub fn tween_system(
    delta_time: Res<DeltaTime>,
    mut movers: Query<(Entity, &mut TileMotion, &mut Position)>,
    mut events: EventWriter<StepCompleted>,
) {
    for (entity, mut motion, mut position) in movers.iter_mut() {
        if let Some((pixel, finished)) = motion.advance(delta_time.seconds) {
            position.0 = pixel;
            if finished {
                events.write(StepCompleted(entity));
            }
        }
    }
}
