#![allow(dead_code)]

use bevy_ecs::{
    event::{EventRegistry, Events},
    world::World,
};
use glam::IVec2;
use pacman_mini::{
    config::{GameConfig, Variant},
    constants::Layout,
    events::{GameEvent, SessionEnded, StepCompleted},
    game::Game,
    map::builder::Map,
    systems::{
        Bindings, DeltaTime, GameStage, Ghost, GlobalState, InputQueue, Key, Outcome, PelletsRemaining, PlayerSpeed,
        ScoreResource,
    },
};

/// A closed room with a single pellet in the far corner.
pub const ROOM: &[&str] = &[
    "#######", //
    "#     #",
    "#     #",
    "#    .#",
    "#######",
];

/// One-tile-high corridor, two tiles long.
pub const SHORT_CORRIDOR: &[&str] = &["####", "#  #", "####"];

/// A corridor with three pellets to the right of the start tile.
pub const PELLET_ROW: &[&str] = &["######", "# ..o#", "######"];

/// An open strip for the physics variant, no pellets.
pub const OPEN_STRIP: &[&str] = &[
    "##########", //
    "#        #",
    "##########",
];

pub const NO_GHOSTS: &[(Ghost, IVec2)] = &[];

pub fn layout(rows: &'static [&'static str], player_start: IVec2, ghost_starts: &'static [(Ghost, IVec2)]) -> Layout {
    Layout {
        rows,
        player_start,
        ghost_starts,
    }
}

pub fn tile_config() -> GameConfig {
    GameConfig {
        variant: Variant::Tile,
        seed: Some(0xC0FFEE),
        ..GameConfig::default()
    }
}

pub fn physics_config() -> GameConfig {
    GameConfig {
        variant: Variant::Physics,
        seed: Some(0xC0FFEE),
        ..GameConfig::default()
    }
}

pub fn tile_game(rows: &'static [&'static str], start: IVec2) -> Game {
    Game::with_layout(&tile_config(), layout(rows, start, NO_GHOSTS)).unwrap()
}

pub fn physics_game(rows: &'static [&'static str], start: IVec2) -> Game {
    Game::with_layout(&physics_config(), layout(rows, start, NO_GHOSTS)).unwrap()
}

/// Runs `frames` ticks of `dt` seconds and returns every session outcome reported along the way.
pub fn run_frames(game: &mut Game, frames: usize, dt: f32) -> Vec<Outcome> {
    let mut outcomes = Vec::new();
    for _ in 0..frames {
        game.tick(dt);
        outcomes.extend(game.take_session_ended());
    }
    outcomes
}

/// Presses and releases `key`, leaving enough frames in between for one full tile step.
pub fn step(game: &mut Game, key: Key) -> Vec<Outcome> {
    game.key_down(key);
    let outcomes = run_frames(game, 2, 0.1);
    game.key_up(key);
    outcomes
}

/// Creates a bare world with the resources the gameplay systems read.
pub fn create_test_world(rows: &[&str]) -> World {
    let mut world = World::new();

    EventRegistry::register_event::<GameEvent>(&mut world);
    EventRegistry::register_event::<StepCompleted>(&mut world);
    EventRegistry::register_event::<SessionEnded>(&mut world);

    world.insert_resource(Map::new(rows).unwrap());
    world.insert_resource(GlobalState { exit: false });
    world.insert_resource(ScoreResource(0));
    world.insert_resource(PelletsRemaining(0));
    world.insert_resource(GameStage::default());
    world.insert_resource(Bindings::default());
    world.insert_resource(InputQueue::default());
    world.insert_resource(DeltaTime { seconds: 0.0 });
    world.insert_resource(PlayerSpeed(100.0));

    world
}

/// Sends a game event directly into the world's event queue
pub fn send_game_event(world: &mut World, event: GameEvent) {
    let mut events = world.resource_mut::<Events<GameEvent>>();
    events.send(event);
}
