use bevy_ecs::{
    event::EventReader,
    query::With,
    resource::Resource,
    system::{Query, Res},
};
use glam::Vec2;
use tracing::{debug, trace};

use crate::{
    events::{GameCommand, GameEvent},
    map::{builder::Map, direction::Direction},
    systems::{
        components::{GridPosition, PlayerControlled, Position, Velocity},
        input::{Bindings, HeldDirections},
        movement::{Movable, TileMotion},
        state::GameStage,
    },
};

/// Starts a one-tile step for each movement command received while the player is at rest.
///
/// Commands that arrive mid-step are dropped, as are steps into walls or off the board.
/// The grid position is committed immediately; the pixel position follows via the tween.
pub fn player_step_system(
    map: Res<Map>,
    stage: Res<GameStage>,
    mut events: EventReader<GameEvent>,
    mut players: Query<(&mut GridPosition, &mut TileMotion, &Position, &Movable), With<PlayerControlled>>,
) {
    for event in events.read() {
        let GameEvent::Command(GameCommand::MovePlayer(direction)) = event else {
            continue;
        };

        if stage.is_over() {
            continue;
        }

        for (mut grid, mut motion, position, movable) in players.iter_mut() {
            if !motion.is_idle() {
                trace!(direction = direction.as_ref(), "Step ignored, player already moving");
                continue;
            }

            let target = grid.0 + direction.as_ivec2();
            if map.is_wall(target) {
                trace!(direction = direction.as_ref(), tile = ?target, "Step blocked");
                continue;
            }

            debug!(from = ?grid.0, to = ?target, "Player step");
            grid.0 = target;
            *motion = TileMotion::start(position.0, Map::tile_center(target), movable.step_duration);
        }
    }
}

/// Resolves held keys into a velocity. Left wins over right and up wins over down.
pub fn held_velocity(held: HeldDirections, speed: f32) -> Vec2 {
    let horizontal = if held.contains(HeldDirections::LEFT) {
        Some(Direction::Left)
    } else if held.contains(HeldDirections::RIGHT) {
        Some(Direction::Right)
    } else {
        None
    };
    let vertical = if held.contains(HeldDirections::UP) {
        Some(Direction::Up)
    } else if held.contains(HeldDirections::DOWN) {
        Some(Direction::Down)
    } else {
        None
    };

    let unit = horizontal
        .into_iter()
        .chain(vertical)
        .fold(Vec2::ZERO, |acc, direction| acc + direction.as_ivec2().as_vec2());
    unit * speed
}

/// Sets the physics player's velocity from whichever direction keys are held this frame.
pub fn player_velocity_system(
    bindings: Res<Bindings>,
    stage: Res<GameStage>,
    speed: Res<PlayerSpeed>,
    mut players: Query<&mut Velocity, With<PlayerControlled>>,
) {
    let velocity = if stage.is_over() {
        Vec2::ZERO
    } else {
        held_velocity(bindings.held(), speed.0)
    };

    for mut current in players.iter_mut() {
        current.0 = velocity;
    }
}

/// Pixels per second for velocity-driven movement.
#[derive(Resource, Debug, Clone, Copy)]
pub struct PlayerSpeed(pub f32);
