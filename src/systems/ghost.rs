use bevy_ecs::system::{Query, Res, ResMut};
use glam::IVec2;
use rand::seq::SliceRandom;
use tracing::{trace, warn};

use crate::{
    map::{builder::Map, direction::Direction},
    systems::{
        components::{Ghost, GridPosition, Position, WanderRng},
        movement::{Movable, TileMotion},
        state::GameStage,
    },
};

/// Picks the first direction in `permutation` whose neighbouring tile is open.
///
/// Reversing is allowed. Returns `None` only when every candidate is blocked.
pub fn choose_direction(current: IVec2, is_wall: impl Fn(IVec2) -> bool, permutation: &[Direction]) -> Option<Direction> {
    permutation
        .iter()
        .copied()
        .find(|direction| !is_wall(current + direction.as_ivec2()))
}

/// Random wander for idle ghosts: shuffle the four directions and take the first open one.
pub fn ghost_wander_system(
    map: Res<Map>,
    stage: Res<GameStage>,
    mut rng: ResMut<WanderRng>,
    mut ghosts: Query<(&Ghost, &mut GridPosition, &mut TileMotion, &Position, &Movable)>,
) {
    if stage.is_over() {
        return;
    }

    for (ghost, mut grid, mut motion, position, movable) in ghosts.iter_mut() {
        if !motion.is_idle() {
            continue;
        }

        let mut permutation = Direction::DIRECTIONS;
        permutation.shuffle(&mut rng.0);

        let Some(direction) = choose_direction(grid.0, |tile| map.is_wall(tile), &permutation) else {
            warn!(ghost = ?ghost, tile = ?grid.0, "Ghost boxed in with no open neighbour");
            continue;
        };

        let target = grid.0 + direction.as_ivec2();
        trace!(ghost = ?ghost, direction = direction.as_ref(), to = ?target, "Ghost step");
        grid.0 = target;
        *motion = TileMotion::start(position.0, Map::tile_center(target), movable.step_duration);
    }
}
