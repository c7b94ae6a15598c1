//! Map construction and tile queries.

use bevy_ecs::resource::Resource;
use glam::{IVec2, UVec2, Vec2};
use tracing::debug;

use crate::constants::{MapTile, TILE_SIZE};
use crate::error::{GameResult, MapError};
use crate::map::parser::MapTileParser;

/// The immutable board for one session.
///
/// Coordinates outside the board count as walls, so callers never need a separate bounds check
/// before asking whether a tile can be entered.
#[derive(Resource, Debug, Clone)]
pub struct Map {
    tiles: Vec<MapTile>,
    size: UVec2,
}

impl Map {
    /// Creates a new `Map` from raw board rows.
    ///
    /// # Errors
    ///
    /// Propagates `ParseError` for empty or non-rectangular boards and unknown characters.
    pub fn new(rows: &[&str]) -> GameResult<Map> {
        let parsed = MapTileParser::parse_board(rows)?;
        debug!(width = parsed.size.x, height = parsed.size.y, "Parsed board");
        Ok(Map {
            tiles: parsed.tiles,
            size: parsed.size,
        })
    }

    /// Board size in tiles.
    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// Board size in pixels.
    pub fn pixel_size(&self) -> UVec2 {
        self.size * TILE_SIZE
    }

    /// Returns the tile at `position`, or `None` when it lies outside the board.
    pub fn tile(&self, position: IVec2) -> Option<MapTile> {
        if position.x < 0 || position.y < 0 || position.x >= self.size.x as i32 || position.y >= self.size.y as i32 {
            return None;
        }
        let index = position.y as usize * self.size.x as usize + position.x as usize;
        self.tiles.get(index).copied()
    }

    /// True for wall tiles and anything off the board.
    pub fn is_wall(&self, position: IVec2) -> bool {
        !matches!(
            self.tile(position),
            Some(MapTile::Empty | MapTile::Pellet | MapTile::PowerPellet)
        )
    }

    /// Iterates every tile with its coordinate, row by row.
    pub fn iter_tiles(&self) -> impl Iterator<Item = (IVec2, MapTile)> + '_ {
        let width = self.size.x as usize;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, tile)| (IVec2::new((i % width) as i32, (i / width) as i32), *tile))
    }

    /// Ensures an entity may be spawned on `position`.
    pub fn check_spawn(&self, position: IVec2) -> Result<(), MapError> {
        if self.is_wall(position) {
            return Err(MapError::InvalidSpawn {
                x: position.x,
                y: position.y,
            });
        }
        Ok(())
    }

    /// The pixel centre of a tile: `tile * TILE_SIZE + TILE_SIZE / 2`.
    pub fn tile_center(position: IVec2) -> Vec2 {
        (position * TILE_SIZE as i32).as_vec2() + Vec2::splat(TILE_SIZE as f32 / 2.0)
    }
}
