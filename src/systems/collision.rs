use bevy_ecs::event::EventWriter;
use bevy_ecs::query::With;
use bevy_ecs::system::{Query, ResMut};
use glam::Vec2;
use tracing::debug;

use crate::constants::collider::PROXIMITY;
use crate::events::SessionEnded;
use crate::systems::components::{Ghost, GhostCollider, PacmanCollider, Position};
use crate::systems::state::{end_session, GameStage, Outcome};

/// True when two centres are closer than half a tile.
pub fn within_reach(a: Vec2, b: Vec2) -> bool {
    a.distance(b) < PROXIMITY
}

/// Ends the session as a loss as soon as any ghost is within reach of the player.
///
/// Checked every frame against the tweened pixel positions, so contact mid-step counts.
pub fn ghost_collision_system(
    mut stage: ResMut<GameStage>,
    pacman: Query<&Position, With<PacmanCollider>>,
    ghosts: Query<(&Ghost, &Position), With<GhostCollider>>,
    mut events: EventWriter<SessionEnded>,
) {
    if stage.is_over() {
        return;
    }

    for player in pacman.iter() {
        if let Some((ghost, _)) = ghosts.iter().find(|(_, position)| within_reach(player.0, position.0)) {
            debug!(ghost = ?ghost, "Player caught");
            end_session(&mut stage, Outcome::Loss, &mut events);
            return;
        }
    }
}
