use bevy_ecs::{
    entity::Entity,
    event::{EventReader, EventWriter},
    query::With,
    system::{Commands, Query, ResMut},
};
use tracing::{debug, trace};

use crate::{
    constants::collider::PROXIMITY,
    events::{SessionEnded, StepCompleted},
    systems::{
        components::{Body, Collider, EntityType, ItemCollider, PacmanCollider, PelletsRemaining, Position, ScoreResource},
        physics::aabb_circle_overlap,
        state::{end_session, GameStage, Outcome},
    },
};

/// Removes one pellet and applies its score. The last pellet ends the session as a win.
pub fn consume_pellet(
    commands: &mut Commands,
    item: Entity,
    entity_type: EntityType,
    score: &mut ScoreResource,
    remaining: &mut PelletsRemaining,
    stage: &mut GameStage,
    events: &mut EventWriter<SessionEnded>,
) {
    let Some(value) = entity_type.score_value() else {
        return;
    };

    commands.entity(item).despawn();
    score.0 += value;
    remaining.0 = remaining.0.saturating_sub(1);
    trace!(item = ?item, item_type = ?entity_type, score = score.0, remaining = remaining.0, "Pellet consumed");

    if remaining.0 == 0 {
        debug!(score = score.0, "Board cleared");
        end_session(stage, Outcome::Win, events);
    }
}

/// Consumes the pellet under the player each time the player finishes a step.
///
/// Every finished step also checks for a cleared board, so a board without pellets is won on the first move.
#[allow(clippy::too_many_arguments)]
pub fn pellet_pickup_system(
    mut commands: Commands,
    mut step_events: EventReader<StepCompleted>,
    mut score: ResMut<ScoreResource>,
    mut remaining: ResMut<PelletsRemaining>,
    mut stage: ResMut<GameStage>,
    pacman: Query<&Position, With<PacmanCollider>>,
    items: Query<(Entity, &EntityType, &Position), With<ItemCollider>>,
    mut events: EventWriter<SessionEnded>,
) {
    for StepCompleted(entity) in step_events.read() {
        if stage.is_over() {
            return;
        }
        let Ok(player_position) = pacman.get(*entity) else {
            continue;
        };

        let pellet = items
            .iter()
            .find(|(_, _, position)| position.0.distance(player_position.0) < PROXIMITY);
        if let Some((item, entity_type, _)) = pellet {
            consume_pellet(
                &mut commands,
                item,
                *entity_type,
                &mut score,
                &mut remaining,
                &mut stage,
                &mut events,
            );
        }

        if remaining.0 == 0 && !stage.is_over() {
            end_session(&mut stage, Outcome::Win, &mut events);
        }
    }
}

/// Consumes every pellet the player's body touches this frame.
#[allow(clippy::too_many_arguments)]
pub fn pellet_overlap_system(
    mut commands: Commands,
    mut score: ResMut<ScoreResource>,
    mut remaining: ResMut<PelletsRemaining>,
    mut stage: ResMut<GameStage>,
    pacman: Query<(&Position, &Body), With<PacmanCollider>>,
    items: Query<(Entity, &EntityType, &Position, &Collider), With<ItemCollider>>,
    mut events: EventWriter<SessionEnded>,
) {
    for (player_position, body) in pacman.iter() {
        for (item, entity_type, position, collider) in items.iter() {
            if stage.is_over() {
                return;
            }
            if !aabb_circle_overlap(player_position.0, body.half_extents, position.0, collider.radius) {
                continue;
            }
            consume_pellet(
                &mut commands,
                item,
                *entity_type,
                &mut score,
                &mut remaining,
                &mut stage,
                &mut events,
            );
        }
    }
}
