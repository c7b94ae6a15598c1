use std::str::FromStr;

use glam::UVec2;
use pacman_mini::{
    config::{GameConfig, Variant},
    constants::{PHYSICS_BOARD, TILE_BOARD},
    error::ConfigError,
    map::builder::Map,
};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

#[test]
fn test_defaults() {
    let config = GameConfig::from_args(Vec::<String>::new()).unwrap();

    assert_eq!(config, GameConfig::default());
    assert_eq!(config.variant, Variant::Tile);
    assert_eq!(config.time_limit, 60);
    assert_eq!(config.player_speed, 100.0);
    assert_that(&config.seed).is_none();
    assert_that(&config.debug).is_false();
}

#[test]
fn test_all_flags() {
    let config = GameConfig::from_args([
        "--variant", "physics", "--seed", "99", "--time", "30", "--speed", "80.5", "--debug",
    ])
    .unwrap();

    assert_eq!(
        config,
        GameConfig {
            variant: Variant::Physics,
            seed: Some(99),
            time_limit: 30,
            player_speed: 80.5,
            debug: true,
        }
    );
}

#[test]
fn test_unknown_flag() {
    let result = GameConfig::from_args(["--turbo"]);
    assert_eq!(result, Err(ConfigError::UnknownArgument("--turbo".to_string())));
}

#[test]
fn test_missing_value() {
    let result = GameConfig::from_args(["--seed"]);
    assert_eq!(result, Err(ConfigError::MissingValue("--seed")));
}

#[test]
fn test_invalid_values() {
    assert_eq!(
        GameConfig::from_args(["--variant", "maze"]),
        Err(ConfigError::InvalidValue {
            flag: "--variant",
            value: "maze".to_string()
        })
    );
    assert_eq!(
        GameConfig::from_args(["--time", "-5"]),
        Err(ConfigError::InvalidValue {
            flag: "--time",
            value: "-5".to_string()
        })
    );
    assert_eq!(
        GameConfig::from_args(["--speed", "-1"]),
        Err(ConfigError::InvalidValue {
            flag: "--speed",
            value: "-1".to_string()
        })
    );
}

#[test]
fn test_variant_names() {
    assert_eq!(Variant::from_str("tile"), Ok(Variant::Tile));
    assert_eq!(Variant::from_str("physics"), Ok(Variant::Physics));
    assert_that(&Variant::from_str("Tile")).is_err();
    assert_eq!(Variant::Physics.to_string(), "physics");
    assert_eq!(Variant::Tile.as_ref(), "tile");
}

#[test]
fn test_viewport_sizes() {
    let tile_map = Map::new(&TILE_BOARD).unwrap();
    let physics_map = Map::new(&PHYSICS_BOARD).unwrap();

    assert_eq!(Variant::Tile.viewport_size(&tile_map), UVec2::new(28 * 16, 15 * 16 + 32));
    assert_eq!(Variant::Physics.viewport_size(&physics_map), UVec2::new(20 * 16, 11 * 16));
}
