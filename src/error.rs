//! Centralized error types for the game.
//!
//! Gameplay itself never fails: blocked moves are ignored and the two terminal
//! outcomes are ordinary states. These types cover construction of a session and
//! the desktop front end.

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Map error: {0}")]
    Map(#[from] MapError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("SDL error: {0}")]
    Sdl(String),
}

/// Error type for board parsing operations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown character {character:?} at row {row}, column {column}")]
    UnknownCharacter { character: char, row: usize, column: usize },

    #[error("Row {row} is {found} tiles wide, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },

    #[error("Board has no tiles")]
    Empty,
}

/// Errors related to map operations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MapError {
    #[error("Spawn tile ({x}, {y}) is a wall or outside the board")]
    InvalidSpawn { x: i32, y: i32 },
}

/// Errors raised while reading the command line.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown argument: {0}")]
    UnknownArgument(String),

    #[error("Missing value for {0}")]
    MissingValue(&'static str),

    #[error("Invalid value {value:?} for {flag}")]
    InvalidValue { flag: &'static str, value: String },
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
