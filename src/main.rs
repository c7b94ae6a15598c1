use std::env;

use anyhow::Context;
use tracing::info;

use pacman_mini::{app::App, config::GameConfig, constants::LOOP_TIME, logging};

/// The main entry point of the application.
///
/// Reads the command line, initializes logging, opens the window and runs the frame loop
/// until the player quits.
fn main() -> anyhow::Result<()> {
    logging::setup_logging();

    let config = GameConfig::from_args(env::args().skip(1)).context("Could not parse arguments")?;
    let mut app = App::new(&config).context("Could not create app")?;

    info!(loop_time = ?LOOP_TIME, variant = config.variant.as_ref(), "Starting game loop");
    while app.run() {}

    Ok(())
}
