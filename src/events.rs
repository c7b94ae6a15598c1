use bevy_ecs::{entity::Entity, event::Event};

use crate::map::direction::Direction;
use crate::systems::Outcome;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    Exit,
    MovePlayer(Direction),
}

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Command(GameCommand),
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}

/// A tweened entity arrived on its destination tile.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepCompleted(pub Entity);

/// The session reached a terminal state. Written exactly once per session.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionEnded(pub Outcome);
