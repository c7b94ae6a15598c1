//! Map parsing functionality for converting raw board layouts into structured data.

use crate::constants::MapTile;
use crate::error::ParseError;
use glam::UVec2;

/// Tiles of a parsed board, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMap {
    pub tiles: Vec<MapTile>,
    /// Board size in tiles (columns, rows).
    pub size: UVec2,
}

/// Parser for converting raw board layouts into structured map data.
pub struct MapTileParser;

impl MapTileParser {
    /// Converts a board character into its tile: walls (`#`), pellets (`.` and `o`)
    /// and bare floor (` `).
    ///
    /// Returns `None` for any character outside that vocabulary.
    pub fn parse_character(c: char) -> Option<MapTile> {
        match c {
            '#' => Some(MapTile::Wall),
            '.' => Some(MapTile::Pellet),
            'o' => Some(MapTile::PowerPellet),
            ' ' => Some(MapTile::Empty),
            _ => None,
        }
    }

    /// Parses a raw board layout into structured map data.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Empty` when there are no rows or the first row is blank,
    /// `ParseError::RaggedRow` when a row's width differs from the first row's, and
    /// `ParseError::UnknownCharacter` for characters outside the board vocabulary.
    pub fn parse_board(rows: &[&str]) -> Result<ParsedMap, ParseError> {
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(ParseError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(ParseError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }

            for (x, character) in row.chars().enumerate() {
                let tile = Self::parse_character(character).ok_or(ParseError::UnknownCharacter {
                    character,
                    row: y,
                    column: x,
                })?;
                tiles.push(tile);
            }
        }

        Ok(ParsedMap {
            tiles,
            size: UVec2::new(width as u32, rows.len() as u32),
        })
    }
}
