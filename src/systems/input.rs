use std::collections::HashMap;

use bevy_ecs::{
    event::{EventReader, EventWriter},
    resource::Resource,
    system::ResMut,
};
use bitflags::bitflags;
use smallvec::SmallVec;
use strum_macros::AsRefStr;
use tracing::{debug, trace};

use crate::{
    events::{GameCommand, GameEvent},
    map::direction::Direction,
    systems::components::GlobalState,
};

/// Keys the game understands, independent of the windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
    Escape,
    Q,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down(Key),
    Up(Key),
}

bitflags! {
    /// Movement directions whose keys are currently held.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct HeldDirections: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

impl From<Direction> for HeldDirections {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => HeldDirections::UP,
            Direction::Down => HeldDirections::DOWN,
            Direction::Left => HeldDirections::LEFT,
            Direction::Right => HeldDirections::RIGHT,
        }
    }
}

#[derive(Debug, Clone, Resource)]
pub struct Bindings {
    key_bindings: HashMap<Key, GameCommand>,
    /// Per-key hold state; two keys bound to the same direction are tracked separately.
    held_keys: HashMap<Key, Direction>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut key_bindings = HashMap::new();

        // Player movement
        key_bindings.insert(Key::Up, GameCommand::MovePlayer(Direction::Up));
        key_bindings.insert(Key::W, GameCommand::MovePlayer(Direction::Up));
        key_bindings.insert(Key::Down, GameCommand::MovePlayer(Direction::Down));
        key_bindings.insert(Key::S, GameCommand::MovePlayer(Direction::Down));
        key_bindings.insert(Key::Left, GameCommand::MovePlayer(Direction::Left));
        key_bindings.insert(Key::A, GameCommand::MovePlayer(Direction::Left));
        key_bindings.insert(Key::Right, GameCommand::MovePlayer(Direction::Right));
        key_bindings.insert(Key::D, GameCommand::MovePlayer(Direction::Right));

        key_bindings.insert(Key::Escape, GameCommand::Exit);
        key_bindings.insert(Key::Q, GameCommand::Exit);

        Self {
            key_bindings,
            held_keys: HashMap::new(),
        }
    }
}

impl Bindings {
    pub fn command(&self, key: Key) -> Option<GameCommand> {
        self.key_bindings.get(&key).copied()
    }

    /// Union of every direction with at least one key held.
    pub fn held(&self) -> HeldDirections {
        self.held_keys
            .values()
            .fold(HeldDirections::empty(), |held, direction| held | HeldDirections::from(*direction))
    }
}

/// Key events delivered by the platform layer since the last frame.
#[derive(Resource, Debug, Default)]
pub struct InputQueue(pub Vec<KeyEvent>);

/// Translates raw key events into game commands and updates hold state.
///
/// Every key-down produces its bound command, repeats included. Key-ups only release hold state.
pub fn process_key_events(bindings: &mut Bindings, events: &[KeyEvent]) -> SmallVec<[GameEvent; 4]> {
    let mut out = SmallVec::new();

    for event in events {
        match *event {
            KeyEvent::Down(key) => {
                let Some(command) = bindings.command(key) else {
                    trace!(key = key.as_ref(), "Unbound key pressed");
                    continue;
                };

                if let GameCommand::MovePlayer(direction) = command {
                    bindings.held_keys.insert(key, direction);
                }
                out.push(GameEvent::Command(command));
            }
            KeyEvent::Up(key) => {
                bindings.held_keys.remove(&key);
            }
        }
    }

    out
}

pub fn input_system(mut bindings: ResMut<Bindings>, mut queue: ResMut<InputQueue>, mut writer: EventWriter<GameEvent>) {
    if queue.0.is_empty() {
        return;
    }

    let pending = std::mem::take(&mut queue.0);
    for event in process_key_events(&mut bindings, &pending) {
        writer.write(event);
    }
}

/// Handles commands that apply regardless of the session stage.
pub fn control_system(mut events: EventReader<GameEvent>, mut state: ResMut<GlobalState>) {
    for event in events.read() {
        if let GameEvent::Command(GameCommand::Exit) = event {
            debug!("Exit requested");
            state.exit = true;
        }
    }
}
