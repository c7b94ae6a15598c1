use bevy_ecs::system::RunSystemOnce;
use glam::IVec2;
use pacman_mini::{
    config::GameConfig,
    constants::{mechanics::GHOST_STEP_DURATION, TILE_LAYOUT},
    game::Game,
    map::{builder::Map, direction::Direction},
    systems::{
        choose_direction, ghost_wander_system, Ghost, GridPosition, Movable, Position, TileMotion, WanderRng,
    },
};
use pretty_assertions::assert_eq;
use rand::{rngs::SmallRng, SeedableRng};
use speculoos::prelude::*;

mod common;

use common::{create_test_world, tile_config};

fn seeded_game(seed: u64) -> Game {
    let config = GameConfig {
        seed: Some(seed),
        ..tile_config()
    };
    Game::new(&config).unwrap()
}

#[test]
fn test_same_seed_same_wander() {
    let mut first = seeded_game(42);
    let mut second = seeded_game(42);

    for _ in 0..40 {
        first.tick(0.05);
        second.tick(0.05);
        assert_eq!(first.ghost_tiles(), second.ghost_tiles());
    }
}

#[test]
fn test_ghosts_never_enter_walls() {
    let mut game = seeded_game(7);

    for _ in 0..60 {
        game.tick(0.05);
        for (ghost, tile) in game.ghost_tiles() {
            assert!(!game.map().is_wall(tile), "{ghost:?} entered wall at {tile:?}");
        }
    }
}

#[test]
fn test_ghosts_start_on_their_tiles() {
    let mut game = seeded_game(1);

    let mut tiles = game.ghost_tiles();
    tiles.sort_by_key(|(_, tile)| (tile.y, tile.x));
    let mut expected = TILE_LAYOUT.ghost_starts.to_vec();
    expected.sort_by_key(|(_, tile)| (tile.y, tile.x));

    assert_eq!(tiles, expected);
}

#[test]
fn test_choose_direction_follows_permutation() {
    let map = Map::new(&["#####", "#   #", "#   #", "#####"]).unwrap();
    let is_wall = |tile: IVec2| map.is_wall(tile);

    let permutation = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];
    assert_eq!(choose_direction(IVec2::new(2, 1), is_wall, &permutation), Some(Direction::Left));

    let permutation = [Direction::Down, Direction::Right, Direction::Left, Direction::Up];
    assert_eq!(choose_direction(IVec2::new(3, 2), is_wall, &permutation), Some(Direction::Left));
}

#[test]
fn test_choose_direction_allows_reversal() {
    let map = Map::new(&["####", "#  #", "####"]).unwrap();

    let choice = choose_direction(IVec2::new(2, 1), |tile| map.is_wall(tile), &Direction::DIRECTIONS);

    assert_eq!(choice, Some(Direction::Left));
}

#[test]
fn test_wander_system_starts_step_for_idle_ghost() {
    let mut world = create_test_world(&["#####", "#   #", "#####"]);
    world.insert_resource(WanderRng(SmallRng::seed_from_u64(3)));
    let start = IVec2::new(2, 1);
    let ghost = world
        .spawn((
            Ghost::Pinky,
            GridPosition(start),
            TileMotion::Idle,
            Position(Map::tile_center(start)),
            Movable {
                step_duration: GHOST_STEP_DURATION,
            },
        ))
        .id();

    world.run_system_once(ghost_wander_system).expect("System should run successfully");

    let grid = world.get::<GridPosition>(ghost).unwrap().0;
    assert_that(&[IVec2::new(1, 1), IVec2::new(3, 1)].contains(&grid)).is_true();
    assert_that(&world.get::<TileMotion>(ghost).unwrap().is_idle()).is_false();
}

#[test]
fn test_wander_system_leaves_moving_ghost_alone() {
    let mut world = create_test_world(&["#####", "#   #", "#####"]);
    world.insert_resource(WanderRng(SmallRng::seed_from_u64(3)));
    let start = IVec2::new(2, 1);
    let motion = TileMotion::start(Map::tile_center(start), Map::tile_center(IVec2::new(3, 1)), 0.2);
    let ghost = world
        .spawn((
            Ghost::Inky,
            GridPosition(IVec2::new(3, 1)),
            motion,
            Position(Map::tile_center(start)),
            Movable { step_duration: 0.2 },
        ))
        .id();

    world.run_system_once(ghost_wander_system).expect("System should run successfully");

    assert_eq!(world.get::<GridPosition>(ghost).unwrap().0, IVec2::new(3, 1));
    assert_eq!(*world.get::<TileMotion>(ghost).unwrap(), motion);
}
