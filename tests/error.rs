use glam::IVec2;
use pacman_mini::{
    config::GameConfig,
    constants::Layout,
    error::{ConfigError, GameError, MapError, ParseError},
    game::Game,
};
use speculoos::prelude::*;

#[test]
fn test_game_error_from_parse_error() {
    let error: GameError = ParseError::Empty.into();
    assert!(matches!(error, GameError::MapParse(ParseError::Empty)));
}

#[test]
fn test_game_error_from_map_error() {
    let error: GameError = MapError::InvalidSpawn { x: 1, y: 2 }.into();
    assert!(matches!(error, GameError::Map(MapError::InvalidSpawn { x: 1, y: 2 })));
}

#[test]
fn test_game_error_from_config_error() {
    let error: GameError = ConfigError::MissingValue("--seed").into();
    assert!(matches!(error, GameError::Config(ConfigError::MissingValue("--seed"))));
}

#[test]
fn test_error_messages() {
    let error = GameError::from(ParseError::UnknownCharacter {
        character: 'X',
        row: 2,
        column: 5,
    });
    assert_eq!(error.to_string(), "Map parsing error: Unknown character 'X' at row 2, column 5");

    let error = GameError::from(MapError::InvalidSpawn { x: 0, y: 3 });
    assert_eq!(
        error.to_string(),
        "Map error: Spawn tile (0, 3) is a wall or outside the board"
    );

    let error = GameError::Sdl("no display".to_string());
    assert_eq!(error.to_string(), "SDL error: no display");
}

#[test]
fn test_spawn_in_wall_fails_construction() {
    let layout = Layout {
        rows: &["####", "#  #", "####"],
        player_start: IVec2::ZERO,
        ghost_starts: &[],
    };

    let result = Game::with_layout(&GameConfig::default(), layout);

    assert_that(&matches!(result, Err(GameError::Map(MapError::InvalidSpawn { x: 0, y: 0 })))).is_true();
}

#[test]
fn test_ragged_board_fails_construction() {
    let layout = Layout {
        rows: &["####", "#  ", "####"],
        player_start: IVec2::new(1, 1),
        ghost_starts: &[],
    };

    let result = Game::with_layout(&GameConfig::default(), layout);

    assert_that(&matches!(result, Err(GameError::MapParse(ParseError::RaggedRow { .. })))).is_true();
}
