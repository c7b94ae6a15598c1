//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::IVec2;

use crate::systems::Ghost;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of each tile, in pixels.
pub const TILE_SIZE: u32 = 16;

/// Height of the HUD strip drawn under the board in the tile variant, in pixels.
pub const HUD_HEIGHT: u32 = 32;

/// The integer zoom applied to the window.
pub const SCALE: u32 = 2;

/// Points awarded for any pellet, large or small.
pub const PELLET_SCORE: u32 = 10;

/// Countdown length for the tile variant, in seconds.
pub const TIME_LIMIT: u32 = 60;

pub mod mechanics {
    /// Seconds the player takes to slide from one tile to the next.
    pub const PLAYER_STEP_DURATION: f32 = 0.150;
    /// Seconds a ghost takes to slide from one tile to the next.
    pub const GHOST_STEP_DURATION: f32 = 0.200;
    /// Velocity magnitude per axis for the physics variant, in pixels per second.
    pub const PLAYER_SPEED: f32 = 100.0;
}

pub mod collider {
    use super::TILE_SIZE;

    /// Centre-to-centre distance under which two tile-variant entities overlap.
    pub const PROXIMITY: f32 = TILE_SIZE as f32 / 2.0;
    /// Radius of the tile-variant player and ghost circles.
    pub const ACTOR_RADIUS: f32 = TILE_SIZE as f32 / 2.0;
    pub const PELLET_RADIUS: f32 = 2.0;
    pub const POWER_PELLET_RADIUS: f32 = 4.0;
    /// Edge length of the physics-variant player body; smaller than a tile so it fits corridors.
    pub const PLAYER_BODY_SIZE: f32 = 12.0;
}

pub mod ui {
    pub const WIN_TEXT: &str = "YOU WIN!";
    pub const LOSS_TEXT: &str = "GAME OVER";
    pub const SCORE_PREFIX: &str = "SCORE: ";
    pub const TIME_PREFIX: &str = "TIME: ";
}

/// An enum representing the different types of tiles on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapTile {
    /// An empty floor tile.
    Empty,
    /// A wall tile.
    Wall,
    /// A regular pellet.
    Pellet,
    /// A large pellet. Worth the same as a regular one.
    PowerPellet,
}

/// Everything needed to build a session's board: rows plus spawn tiles.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub rows: &'static [&'static str],
    pub player_start: IVec2,
    pub ghost_starts: &'static [(Ghost, IVec2)],
}

/// Board for the tile variant.
///
/// Row 8 ends in an extra pellet so every row is 28 tiles wide.
pub const TILE_BOARD: [&str; 15] = [
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#o#  #.#   #.##.#   #.#  #o#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "####.##.###########.##.#####",
    "####.##...........#.##.#####",
    "#......###########.........#",
    "####.##...........#.##.#####",
    "####.##.###########.##.#####",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#o...#.....#....#.....#...o#",
    "############################",
];

pub const TILE_LAYOUT: Layout = Layout {
    rows: &TILE_BOARD,
    player_start: IVec2::new(1, 1),
    ghost_starts: &[
        (Ghost::Blinky, IVec2::new(13, 7)),
        (Ghost::Pinky, IVec2::new(14, 7)),
        (Ghost::Clyde, IVec2::new(13, 9)),
        (Ghost::Inky, IVec2::new(14, 9)),
    ],
};

/// Board for the physics variant. The player starts on the bare floor at (1, 1).
pub const PHYSICS_BOARD: [&str; 11] = [
    "####################",
    "#  ......#.........#",
    "#.##.###.#.###.###.#",
    "#o#..............#o#",
    "#.#.####.##.####.#.#",
    "#..................#",
    "#.####.##..##.####.#",
    "#......#....#......#",
    "#.####.#.##.#.####.#",
    "#o................o#",
    "####################",
];

pub const PHYSICS_LAYOUT: Layout = Layout {
    rows: &PHYSICS_BOARD,
    player_start: IVec2::new(1, 1),
    ghost_starts: &[],
};
