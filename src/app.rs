use std::time::{Duration, Instant};

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::render::Canvas;
use sdl2::video::Window;
use sdl2::{EventPump, Sdl};
use tracing::{debug, info, trace, warn};

use crate::config::GameConfig;
use crate::constants::{LOOP_TIME, SCALE};
use crate::error::{GameError, GameResult};
use crate::formatter;
use crate::game::Game;
use crate::render;
use crate::systems::Key;

/// Maps SDL keycodes onto the keys the game binds.
fn map_keycode(keycode: Keycode) -> Option<Key> {
    match keycode {
        Keycode::Up => Some(Key::Up),
        Keycode::Down => Some(Key::Down),
        Keycode::Left => Some(Key::Left),
        Keycode::Right => Some(Key::Right),
        Keycode::W => Some(Key::W),
        Keycode::A => Some(Key::A),
        Keycode::S => Some(Key::S),
        Keycode::D => Some(Key::D),
        Keycode::Escape => Some(Key::Escape),
        Keycode::Q => Some(Key::Q),
        _ => None,
    }
}

/// Main application wrapper that manages SDL initialization, window lifecycle, and the game loop.
pub struct App {
    pub game: Game,
    canvas: Canvas<Window>,
    event_pump: EventPump,
    last_tick: Instant,
    // Keep SDL alive for the app lifetime
    _sdl_context: Sdl,
}

impl App {
    /// Initializes SDL, opens a window sized to the board, and builds the session.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Sdl` if any SDL initialization step fails, or propagates
    /// errors from `Game::new()`.
    pub fn new(config: &GameConfig) -> GameResult<Self> {
        let game = Game::new(config)?;
        let viewport = game.viewport_size();

        info!("Initializing SDL2 application");
        let sdl_context = sdl2::init().map_err(GameError::Sdl)?;
        let video_subsystem = sdl_context.video().map_err(GameError::Sdl)?;
        let event_pump = sdl_context.event_pump().map_err(GameError::Sdl)?;

        trace!(
            width = viewport.x * SCALE,
            height = viewport.y * SCALE,
            scale = SCALE,
            "Creating game window"
        );
        let window = video_subsystem
            .window("Pac-Man", viewport.x * SCALE, viewport.y * SCALE)
            .position_centered()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;

        let mut canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        canvas
            .set_logical_size(viewport.x, viewport.y)
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        debug!(renderer_info = ?canvas.info(), "Canvas renderer initialized");

        info!("Application initialization completed successfully");
        Ok(App {
            game,
            canvas,
            event_pump,
            last_tick: Instant::now(),
            _sdl_context: sdl_context,
        })
    }

    /// Forwards window events to the game. Returns false when the window was closed.
    fn handle_events(&mut self) -> bool {
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => return false,
                Event::KeyDown {
                    keycode: Some(keycode),
                    repeat,
                    ..
                } => {
                    if let Some(key) = map_keycode(keycode) {
                        trace!(key = key.as_ref(), repeat, "Key down");
                        self.game.key_down(key);
                    }
                }
                Event::KeyUp {
                    keycode: Some(keycode), ..
                } => {
                    if let Some(key) = map_keycode(keycode) {
                        self.game.key_up(key);
                    }
                }
                _ => {}
            }
        }
        true
    }

    /// Executes a single frame: input, one game tick, drawing, then sleep for the rest of `LOOP_TIME`.
    ///
    /// # Returns
    ///
    /// `true` if the game should continue running, `false` if the game requested exit.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();
        let dt = self.last_tick.elapsed().as_secs_f32();
        self.last_tick = start;

        formatter::advance_frame();

        if !self.handle_events() {
            info!("Window closed");
            return false;
        }

        let exit = self.game.tick(dt);

        if let Some(outcome) = self.game.take_session_ended() {
            info!(
                outcome = outcome.message(),
                score = self.game.score(),
                pellets_remaining = self.game.pellets_remaining(),
                time_remaining = ?self.game.time_remaining(),
                "Session finished"
            );
        }

        if exit {
            info!("Exit requested");
            return false;
        }

        if let Err(e) = render::render_scene(&mut self.canvas, &mut self.game) {
            warn!(error = %e, "Failed to render frame");
        }
        self.canvas.present();

        let elapsed = start.elapsed();
        if elapsed < LOOP_TIME {
            let time = LOOP_TIME.saturating_sub(elapsed);
            if time != Duration::ZERO {
                spin_sleep::sleep(time);
            }
        } else {
            warn!(frame_time = ?elapsed, budget = ?LOOP_TIME, "Frame over budget");
        }

        true
    }
}
