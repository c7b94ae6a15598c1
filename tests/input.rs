use bevy_ecs::{event::Events, system::RunSystemOnce};
use pacman_mini::{
    events::{GameCommand, GameEvent},
    map::direction::Direction,
    systems::{control_system, input_system, process_key_events, Bindings, GlobalState, HeldDirections, InputQueue, Key, KeyEvent},
};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

use common::{create_test_world, send_game_event};

#[test]
fn test_arrows_and_wasd_share_directions() {
    let bindings = Bindings::default();
    let pairs = [
        (Key::Up, Key::W, Direction::Up),
        (Key::Down, Key::S, Direction::Down),
        (Key::Left, Key::A, Direction::Left),
        (Key::Right, Key::D, Direction::Right),
    ];

    for (arrow, letter, direction) in pairs {
        assert_eq!(bindings.command(arrow), Some(GameCommand::MovePlayer(direction)));
        assert_eq!(bindings.command(letter), Some(GameCommand::MovePlayer(direction)));
    }
    assert_eq!(bindings.command(Key::Escape), Some(GameCommand::Exit));
    assert_eq!(bindings.command(Key::Q), Some(GameCommand::Exit));
}

#[test]
fn test_every_press_produces_a_command() {
    let mut bindings = Bindings::default();

    let events = process_key_events(
        &mut bindings,
        &[KeyEvent::Down(Key::Right), KeyEvent::Down(Key::Right), KeyEvent::Up(Key::Right)],
    );

    assert_eq!(
        events.to_vec(),
        vec![
            GameEvent::Command(GameCommand::MovePlayer(Direction::Right)),
            GameEvent::Command(GameCommand::MovePlayer(Direction::Right)),
        ]
    );
    assert_that(&bindings.held().is_empty()).is_true();
}

#[test]
fn test_held_directions_track_each_key() {
    let mut bindings = Bindings::default();

    process_key_events(
        &mut bindings,
        &[KeyEvent::Down(Key::Left), KeyEvent::Down(Key::A), KeyEvent::Down(Key::Up)],
    );
    assert_eq!(bindings.held(), HeldDirections::LEFT | HeldDirections::UP);

    process_key_events(&mut bindings, &[KeyEvent::Up(Key::Left), KeyEvent::Up(Key::Up)]);
    assert_eq!(bindings.held(), HeldDirections::LEFT);

    process_key_events(&mut bindings, &[KeyEvent::Up(Key::A)]);
    assert_eq!(bindings.held(), HeldDirections::empty());
}

#[test]
fn test_exit_keys_are_not_held() {
    let mut bindings = Bindings::default();

    let events = process_key_events(&mut bindings, &[KeyEvent::Down(Key::Escape)]);

    assert_eq!(events.to_vec(), vec![GameEvent::Command(GameCommand::Exit)]);
    assert_eq!(bindings.held(), HeldDirections::empty());
}

#[test]
fn test_input_system_drains_queue() {
    let mut world = create_test_world(&["   "]);
    world.resource_mut::<InputQueue>().0.push(KeyEvent::Down(Key::D));

    world.run_system_once(input_system).expect("System should run successfully");

    assert_that(&world.resource::<InputQueue>().0).is_empty();
    let events = world.resource::<Events<GameEvent>>();
    let written: Vec<GameEvent> = events.get_cursor().read(events).copied().collect();
    assert_eq!(
        written,
        vec![GameEvent::Command(GameCommand::MovePlayer(Direction::Right))]
    );
}

#[test]
fn test_control_system_sets_exit() {
    let mut world = create_test_world(&["   "]);
    send_game_event(&mut world, GameEvent::Command(GameCommand::Exit));

    world.run_system_once(control_system).expect("System should run successfully");

    assert_that(&world.resource::<GlobalState>().exit).is_true();
}

#[test]
fn test_control_system_ignores_movement() {
    let mut world = create_test_world(&["   "]);
    send_game_event(&mut world, GameEvent::Command(GameCommand::MovePlayer(Direction::Up)));

    world.run_system_once(control_system).expect("System should run successfully");

    assert_that(&world.resource::<GlobalState>().exit).is_false();
}
