use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use glam::{IVec2, Vec2};
use rand::rngs::SmallRng;

use crate::constants::PELLET_SCORE;
use crate::systems::movement::{Movable, TileMotion};

/// A tag component for entities that are controlled by the player.
#[derive(Default, Component)]
pub struct PlayerControlled;

/// A tag component denoting the type of entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Player,
    Ghost,
    Wall,
    Pellet,
    PowerPellet,
}

impl EntityType {
    pub fn score_value(&self) -> Option<u32> {
        match self {
            EntityType::Pellet | EntityType::PowerPellet => Some(PELLET_SCORE),
            _ => None,
        }
    }
}

/// The four wandering ghosts, named for their colours.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ghost {
    Blinky,
    Pinky,
    Clyde,
    Inky,
}

impl Ghost {
    pub const fn color(self) -> Rgb {
        match self {
            Ghost::Blinky => Rgb(0xff, 0x00, 0x00),
            Ghost::Pinky => Rgb(0xff, 0xb8, 0xff),
            Ghost::Clyde => Rgb(0xff, 0xb8, 0x47),
            Ghost::Inky => Rgb(0x00, 0xff, 0xff),
        }
    }
}

/// Pixel-space centre of an entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec2);

/// The tile an entity occupies, or is committed to while a step is in flight.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition(pub IVec2);

/// Pixels per second, used by the physics variant.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity(pub Vec2);

/// Circular extent used for centre-distance checks.
#[derive(Component, Debug, Clone, Copy)]
pub struct Collider {
    pub radius: f32,
}

/// Axis-aligned box centred on the entity's `Position`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub half_extents: Vec2,
}

impl Body {
    pub fn square(size: f32) -> Self {
        Self {
            half_extents: Vec2::splat(size / 2.0),
        }
    }
}

/// Marker components for collision filtering
#[derive(Component)]
pub struct PacmanCollider;

#[derive(Component)]
pub struct GhostCollider;

#[derive(Component)]
pub struct ItemCollider;

#[derive(Component)]
pub struct WallCollider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WALL: Rgb = Rgb(0x00, 0x00, 0xff);
    pub const PELLET: Rgb = Rgb(0xff, 0xff, 0xff);
    pub const PLAYER: Rgb = Rgb(0xff, 0xff, 0x00);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    Rect { size: Vec2 },
}

/// How an entity is drawn. Lower layers are drawn first.
#[derive(Component, Debug, Clone, Copy)]
pub struct Renderable {
    pub shape: Shape,
    pub color: Rgb,
    pub layer: u8,
}

#[derive(Bundle)]
pub struct WallBundle {
    pub position: Position,
    pub body: Body,
    pub sprite: Renderable,
    pub entity_type: EntityType,
    pub wall_collider: WallCollider,
}

#[derive(Bundle)]
pub struct ItemBundle {
    pub position: Position,
    pub sprite: Renderable,
    pub entity_type: EntityType,
    pub collider: Collider,
    pub item_collider: ItemCollider,
}

/// Player for the tile variant: steps between tiles.
#[derive(Bundle)]
pub struct StepPlayerBundle {
    pub player: PlayerControlled,
    pub position: Position,
    pub grid_position: GridPosition,
    pub motion: TileMotion,
    pub movable: Movable,
    pub sprite: Renderable,
    pub entity_type: EntityType,
    pub collider: Collider,
    pub pacman_collider: PacmanCollider,
}

/// Player for the physics variant: velocity plus a solid body.
#[derive(Bundle)]
pub struct PhysicsPlayerBundle {
    pub player: PlayerControlled,
    pub position: Position,
    pub velocity: Velocity,
    pub body: Body,
    pub sprite: Renderable,
    pub entity_type: EntityType,
    pub pacman_collider: PacmanCollider,
}

#[derive(Bundle)]
pub struct GhostBundle {
    pub ghost: Ghost,
    pub position: Position,
    pub grid_position: GridPosition,
    pub motion: TileMotion,
    pub movable: Movable,
    pub sprite: Renderable,
    pub entity_type: EntityType,
    pub collider: Collider,
    pub ghost_collider: GhostCollider,
}

#[derive(Resource)]
pub struct GlobalState {
    pub exit: bool,
}

#[derive(Resource, Debug, Default)]
pub struct ScoreResource(pub u32);

/// Number of pellets still on the board.
#[derive(Resource, Debug, Default)]
pub struct PelletsRemaining(pub usize);

#[derive(Resource, Debug, Clone, Copy)]
pub struct DeltaTime {
    /// Floating-point delta time in seconds
    pub seconds: f32,
}

/// Random source for ghost wandering. Seeded once per session.
#[derive(Resource)]
pub struct WanderRng(pub SmallRng);

/// Draw collider outlines on top of the scene.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct DebugState {
    pub enabled: bool,
}
