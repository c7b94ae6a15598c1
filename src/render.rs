//! Draws the scene with SDL2_gfx primitives. No textures or font files are needed.

use bevy_ecs::world::World;
use glam::Vec2;
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;

use crate::config::Variant;
use crate::error::{GameError, GameResult};
use crate::game::Game;
use crate::systems::{Body, Collider, DebugState, HudText, Position, Renderable, Rgb, Shape};

/// Width and height of one glyph in the SDL2_gfx built-in font.
const GLYPH_SIZE: i16 = 8;
const TEXT_MARGIN: i16 = 4;

const DEBUG_COLOR: Color = Color::RGB(0x00, 0xff, 0x00);
const TEXT_COLOR: Color = Color::RGB(0xff, 0xff, 0xff);
const BANNER_COLOR: Color = Color::RGB(0xff, 0xff, 0x00);

impl From<Rgb> for Color {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        Color::RGB(r, g, b)
    }
}

fn sdl_err(e: String) -> GameError {
    GameError::Sdl(e)
}

/// Clears the canvas and draws the whole frame. Does not present.
pub fn render_scene(canvas: &mut Canvas<Window>, game: &mut Game) -> GameResult<()> {
    canvas.set_draw_color(Color::BLACK);
    canvas.clear();

    draw_entities(canvas, &mut game.world)?;

    if game.world.resource::<DebugState>().enabled {
        draw_colliders(canvas, &mut game.world)?;
    }

    let board = game.map().pixel_size();
    draw_hud(canvas, game.hud(), board.x as i16, board.y as i16, game.variant() == Variant::Tile)
}

fn draw_entities(canvas: &mut Canvas<Window>, world: &mut World) -> GameResult<()> {
    let mut query = world.query::<(&Position, &Renderable)>();
    let mut renderables: Vec<(Vec2, Renderable)> = query.iter(world).map(|(p, r)| (p.0, *r)).collect();
    renderables.sort_by_key(|(_, renderable)| renderable.layer);

    for (center, renderable) in renderables {
        let color = Color::from(renderable.color);
        match renderable.shape {
            Shape::Circle { radius } => {
                canvas
                    .filled_circle(center.x as i16, center.y as i16, radius as i16, color)
                    .map_err(sdl_err)?;
            }
            Shape::Rect { size } => {
                let min = center - size / 2.0;
                let max = center + size / 2.0 - Vec2::ONE;
                canvas
                    .box_(min.x as i16, min.y as i16, max.x as i16, max.y as i16, color)
                    .map_err(sdl_err)?;
            }
        }
    }
    Ok(())
}

/// Outlines every circle collider and solid body.
fn draw_colliders(canvas: &mut Canvas<Window>, world: &mut World) -> GameResult<()> {
    let mut circles = world.query::<(&Position, &Collider)>();
    for (position, collider) in circles.iter(world) {
        canvas
            .circle(
                position.0.x as i16,
                position.0.y as i16,
                collider.radius as i16,
                DEBUG_COLOR,
            )
            .map_err(sdl_err)?;
    }

    let mut boxes = world.query::<(&Position, &Body)>();
    for (position, body) in boxes.iter(world) {
        let min = position.0 - body.half_extents;
        let max = position.0 + body.half_extents - Vec2::ONE;
        canvas
            .rectangle(min.x as i16, min.y as i16, max.x as i16, max.y as i16, DEBUG_COLOR)
            .map_err(sdl_err)?;
    }
    Ok(())
}

fn text_width(text: &str) -> i16 {
    text.len() as i16 * GLYPH_SIZE
}

/// Score and clock go in the strip under the board when there is one, otherwise top-left.
fn draw_hud(canvas: &mut Canvas<Window>, hud: &HudText, board_w: i16, board_h: i16, has_strip: bool) -> GameResult<()> {
    let text_y = if has_strip { board_h + TEXT_MARGIN } else { TEXT_MARGIN };
    canvas
        .string(TEXT_MARGIN, text_y, &hud.score, TEXT_COLOR)
        .map_err(sdl_err)?;

    if let Some(timer) = &hud.timer {
        let x = board_w - TEXT_MARGIN - text_width(timer);
        canvas.string(x, text_y, timer, TEXT_COLOR).map_err(sdl_err)?;
    }

    if let Some(banner) = hud.banner {
        let x = (board_w - text_width(banner)) / 2;
        let y = (board_h - GLYPH_SIZE) / 2;
        canvas
            .box_(x - 4, y - 4, x + text_width(banner) + 3, y + GLYPH_SIZE + 3, Color::BLACK)
            .map_err(sdl_err)?;
        canvas.string(x, y, banner, BANNER_COLOR).map_err(sdl_err)?;
    }
    Ok(())
}
