//! Runtime settings for a session, read from the command line.

use std::str::FromStr;

use glam::UVec2;
use strum_macros::{AsRefStr, Display, EnumString};

use crate::constants::{self, Layout, HUD_HEIGHT, PHYSICS_LAYOUT, TILE_LAYOUT};
use crate::error::ConfigError;
use crate::map::builder::Map;

/// Which rule set drives the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Variant {
    /// Discrete tile steps, wandering ghosts and a countdown.
    #[default]
    Tile,
    /// Held-key velocity with wall push-out. No ghosts, no clock.
    Physics,
}

impl Variant {
    /// Unscaled window size: the board, plus the HUD strip below it in the tile variant.
    pub fn viewport_size(self, map: &Map) -> UVec2 {
        let board = map.pixel_size();
        match self {
            Variant::Tile => UVec2::new(board.x, board.y + HUD_HEIGHT),
            Variant::Physics => board,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub variant: Variant,
    /// Fixed seed for ghost wander; seeded from the OS when absent.
    pub seed: Option<u64>,
    /// Countdown length in seconds (tile variant).
    pub time_limit: u32,
    /// Player speed in pixels per second (physics variant).
    pub player_speed: f32,
    /// Draw collider outlines over the scene.
    pub debug: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            seed: None,
            time_limit: constants::TIME_LIMIT,
            player_speed: constants::mechanics::PLAYER_SPEED,
            debug: false,
        }
    }
}

fn parse_value<T: FromStr>(flag: &'static str, value: Option<String>) -> Result<T, ConfigError> {
    let value = value.ok_or(ConfigError::MissingValue(flag))?;
    value.parse().map_err(|_| ConfigError::InvalidValue { flag, value })
}

impl GameConfig {
    /// Builds a config from command-line arguments, excluding the program name.
    ///
    /// Accepts `--variant <tile|physics>`, `--seed <u64>`, `--time <seconds>`,
    /// `--speed <px/s>` and `--debug`. Anything else is rejected.
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = GameConfig::default();
        let mut args = args.into_iter().map(|arg| arg.as_ref().to_owned());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--variant" => config.variant = parse_value("--variant", args.next())?,
                "--seed" => config.seed = Some(parse_value("--seed", args.next())?),
                "--time" => config.time_limit = parse_value("--time", args.next())?,
                "--speed" => {
                    let value = args.next();
                    let speed: f32 = parse_value("--speed", value.clone())?;
                    if !speed.is_finite() || speed < 0.0 {
                        return Err(ConfigError::InvalidValue {
                            flag: "--speed",
                            value: value.unwrap_or_default(),
                        });
                    }
                    config.player_speed = speed;
                }
                "--debug" => config.debug = true,
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }

        Ok(config)
    }

    /// The board and spawn tiles for this variant.
    pub fn layout(&self) -> Layout {
        match self.variant {
            Variant::Tile => TILE_LAYOUT,
            Variant::Physics => PHYSICS_LAYOUT,
        }
    }
}
