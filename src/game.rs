//! This module contains the main game logic and state.

use bevy_ecs::event::{EventCursor, EventRegistry, Events};
use bevy_ecs::query::With;
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::world::World;
use glam::{IVec2, UVec2, Vec2};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info, trace};

use crate::config::{GameConfig, Variant};
use crate::constants::{self, collider, mechanics, Layout, MapTile};
use crate::error::GameResult;
use crate::events::{GameEvent, SessionEnded, StepCompleted};
use crate::map::builder::Map;
use crate::systems::{
    self, session_active, Bindings, Body, Collider, Countdown, DebugState, DeltaTime, EntityType, GameStage, Ghost,
    GhostBundle, GhostCollider, GlobalState, GridPosition, HudText, InputQueue, ItemBundle, ItemCollider, Key, KeyEvent,
    Movable, Outcome, PacmanCollider, PelletsRemaining, PhysicsPlayerBundle, PlayerControlled, PlayerSpeed, Position,
    Renderable, Rgb, ScoreResource, Shape, StepPlayerBundle, TileMotion, Velocity, WallBundle, WallCollider, WanderRng,
};

/// System set for all gameplay systems to ensure they run after input processing
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum GameplaySet {
    /// Translating key events into commands, and acting on them
    Input,
    /// Movement: tweens, wander, velocity integration
    Update,
    /// Consequences of movement: pellets, ghost contact, the clock
    Respond,
}

/// One session of the game: an ECS `World` holding the board, entities and resources,
/// and the `Schedule` that advances it by one frame.
///
/// Headless; a front end feeds it key events and delta time and reads back the scene.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
    variant: Variant,
    session_cursor: EventCursor<SessionEnded>,
}

impl Game {
    /// Builds a session on the board that ships with the configured variant.
    ///
    /// # Errors
    ///
    /// Returns `GameError` if the board fails to parse or a spawn tile is not open floor.
    pub fn new(config: &GameConfig) -> GameResult<Game> {
        Self::with_layout(config, config.layout())
    }

    /// Builds a session on an arbitrary board.
    pub fn with_layout(config: &GameConfig, layout: Layout) -> GameResult<Game> {
        info!(variant = config.variant.as_ref(), seed = ?config.seed, "Starting game initialization");

        let map = Map::new(layout.rows)?;
        map.check_spawn(layout.player_start)?;
        if config.variant == Variant::Tile {
            for (ghost, start) in layout.ghost_starts {
                trace!(ghost = ?ghost, start = ?start, "Validating ghost spawn");
                map.check_spawn(*start)?;
            }
        }

        debug!("Initializing ECS world and system schedule");
        let mut world = World::default();
        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);

        Self::setup_ecs(&mut world);
        Self::insert_resources(&mut world, config, map);
        Self::configure_schedule(&mut schedule, config.variant);

        info!("Spawning game entities");
        Self::spawn_walls(&mut world);
        let pellets = Self::spawn_items(&mut world);
        world.insert_resource(PelletsRemaining(pellets));

        match config.variant {
            Variant::Tile => {
                Self::spawn_step_player(&mut world, layout.player_start);
                Self::spawn_ghosts(&mut world, layout.ghost_starts);
            }
            Variant::Physics => Self::spawn_physics_player(&mut world, layout.player_start),
        }

        let session_cursor = world.resource::<Events<SessionEnded>>().get_cursor();

        info!(pellets, "Game initialization completed successfully");
        Ok(Game {
            world,
            schedule,
            variant: config.variant,
            session_cursor,
        })
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<GameEvent>(world);
        EventRegistry::register_event::<StepCompleted>(world);
        EventRegistry::register_event::<SessionEnded>(world);
    }

    fn insert_resources(world: &mut World, config: &GameConfig, map: Map) {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        world.insert_resource(map);
        world.insert_resource(GlobalState { exit: false });
        world.insert_resource(ScoreResource(0));
        world.insert_resource(GameStage::default());
        world.insert_resource(Bindings::default());
        world.insert_resource(InputQueue::default());
        world.insert_resource(DeltaTime { seconds: 0.0 });
        world.insert_resource(DebugState { enabled: config.debug });
        world.insert_resource(HudText::default());
        world.insert_resource(WanderRng(rng));
        world.insert_resource(PlayerSpeed(config.player_speed));

        if config.variant == Variant::Tile {
            world.insert_resource(Countdown::new(config.time_limit));
        }
    }

    fn configure_schedule(schedule: &mut Schedule, variant: Variant) {
        let input_systems = (systems::input_system, systems::control_system).chain();

        match variant {
            Variant::Tile => {
                schedule.add_systems((
                    (input_systems, systems::player_step_system)
                        .chain()
                        .in_set(GameplaySet::Input),
                    (systems::ghost_wander_system, systems::tween_system)
                        .chain()
                        .in_set(GameplaySet::Update),
                    (
                        systems::pellet_pickup_system,
                        systems::ghost_collision_system,
                        systems::countdown_system,
                    )
                        .chain()
                        .in_set(GameplaySet::Respond),
                ));
            }
            Variant::Physics => {
                schedule.add_systems((
                    input_systems.in_set(GameplaySet::Input),
                    (systems::player_velocity_system, systems::physics_system)
                        .chain()
                        .in_set(GameplaySet::Update),
                    systems::pellet_overlap_system.in_set(GameplaySet::Respond),
                ));
            }
        }

        schedule
            .add_systems(systems::hud_system.after(GameplaySet::Respond))
            .configure_sets(
                (
                    GameplaySet::Input,
                    GameplaySet::Update.run_if(session_active),
                    GameplaySet::Respond.run_if(session_active),
                )
                    .chain(),
            );
    }

    fn spawn_walls(world: &mut World) {
        let walls: Vec<IVec2> = world
            .resource::<Map>()
            .iter_tiles()
            .filter(|(_, tile)| *tile == MapTile::Wall)
            .map(|(position, _)| position)
            .collect();

        debug!(wall_count = walls.len(), "Spawning walls");
        let size = constants::TILE_SIZE as f32;
        for tile in walls {
            world.spawn(WallBundle {
                position: Position(Map::tile_center(tile)),
                body: Body::square(size),
                sprite: Renderable {
                    shape: Shape::Rect { size: Vec2::splat(size) },
                    color: Rgb::WALL,
                    layer: 0,
                },
                entity_type: EntityType::Wall,
                wall_collider: WallCollider,
            });
        }
    }

    /// Spawns one item per pellet tile and returns how many were placed.
    fn spawn_items(world: &mut World) -> usize {
        let items: Vec<(IVec2, EntityType, f32)> = world
            .resource::<Map>()
            .iter_tiles()
            .filter_map(|(position, tile)| match tile {
                MapTile::Pellet => Some((position, EntityType::Pellet, collider::PELLET_RADIUS)),
                MapTile::PowerPellet => Some((position, EntityType::PowerPellet, collider::POWER_PELLET_RADIUS)),
                _ => None,
            })
            .collect();

        info!(
            pellet_count = items.iter().filter(|(_, t, _)| *t == EntityType::Pellet).count(),
            power_pellet_count = items.iter().filter(|(_, t, _)| *t == EntityType::PowerPellet).count(),
            "Spawning collectible items"
        );

        for (tile, item_type, radius) in &items {
            world.spawn(ItemBundle {
                position: Position(Map::tile_center(*tile)),
                sprite: Renderable {
                    shape: Shape::Circle { radius: *radius },
                    color: Rgb::PELLET,
                    layer: 1,
                },
                entity_type: *item_type,
                collider: Collider { radius: *radius },
                item_collider: ItemCollider,
            });
        }
        items.len()
    }

    fn spawn_step_player(world: &mut World, start: IVec2) {
        let entity = world
            .spawn(StepPlayerBundle {
                player: PlayerControlled,
                position: Position(Map::tile_center(start)),
                grid_position: GridPosition(start),
                motion: TileMotion::Idle,
                movable: Movable {
                    step_duration: mechanics::PLAYER_STEP_DURATION,
                },
                sprite: Renderable {
                    shape: Shape::Circle {
                        radius: collider::ACTOR_RADIUS,
                    },
                    color: Rgb::PLAYER,
                    layer: 3,
                },
                entity_type: EntityType::Player,
                collider: Collider {
                    radius: collider::ACTOR_RADIUS,
                },
                pacman_collider: PacmanCollider,
            })
            .id();
        debug!(entity = ?entity, start = ?start, "Spawned player");
    }

    fn spawn_physics_player(world: &mut World, start: IVec2) {
        let size = collider::PLAYER_BODY_SIZE;
        let entity = world
            .spawn(PhysicsPlayerBundle {
                player: PlayerControlled,
                position: Position(Map::tile_center(start)),
                velocity: Velocity::default(),
                body: Body::square(size),
                sprite: Renderable {
                    shape: Shape::Rect { size: Vec2::splat(size) },
                    color: Rgb::PLAYER,
                    layer: 3,
                },
                entity_type: EntityType::Player,
                pacman_collider: PacmanCollider,
            })
            .id();
        debug!(entity = ?entity, start = ?start, "Spawned physics player");
    }

    fn spawn_ghosts(world: &mut World, starts: &[(Ghost, IVec2)]) {
        for (ghost, start) in starts {
            let entity = world
                .spawn(GhostBundle {
                    ghost: *ghost,
                    position: Position(Map::tile_center(*start)),
                    grid_position: GridPosition(*start),
                    motion: TileMotion::Idle,
                    movable: Movable {
                        step_duration: mechanics::GHOST_STEP_DURATION,
                    },
                    sprite: Renderable {
                        shape: Shape::Circle {
                            radius: collider::ACTOR_RADIUS,
                        },
                        color: ghost.color(),
                        layer: 2,
                    },
                    entity_type: EntityType::Ghost,
                    collider: Collider {
                        radius: collider::ACTOR_RADIUS,
                    },
                    ghost_collider: GhostCollider,
                })
                .id();
            trace!(ghost = ?ghost, entity = ?entity, start = ?start, "Spawned ghost entity");
        }
        info!(ghost_count = starts.len(), "All ghost entities spawned successfully");
    }

    /// Queues a key press for the next frame.
    pub fn key_down(&mut self, key: Key) {
        self.world.resource_mut::<InputQueue>().0.push(KeyEvent::Down(key));
    }

    /// Queues a key release for the next frame.
    pub fn key_up(&mut self, key: Key) {
        self.world.resource_mut::<InputQueue>().0.push(KeyEvent::Up(key));
    }

    /// Executes one frame of game logic.
    ///
    /// # Arguments
    ///
    /// * `dt` - Frame delta time in seconds
    ///
    /// # Returns
    ///
    /// `true` if the game should terminate (exit command received), `false` to continue
    pub fn tick(&mut self, dt: f32) -> bool {
        self.world.insert_resource(DeltaTime { seconds: dt });
        self.schedule.run(&mut self.world);

        self.world.resource_mut::<Events<GameEvent>>().update();
        self.world.resource_mut::<Events<StepCompleted>>().update();
        self.world.resource_mut::<Events<SessionEnded>>().update();

        self.world.resource::<GlobalState>().exit
    }

    /// Returns the outcome if the session ended since the last call.
    ///
    /// Must be polled at least once per frame; events are dropped after two frames.
    pub fn take_session_ended(&mut self) -> Option<Outcome> {
        let events = self.world.resource::<Events<SessionEnded>>();
        self.session_cursor.read(events).last().map(|SessionEnded(outcome)| *outcome)
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn map(&self) -> &Map {
        self.world.resource::<Map>()
    }

    pub fn stage(&self) -> GameStage {
        *self.world.resource::<GameStage>()
    }

    pub fn score(&self) -> u32 {
        self.world.resource::<ScoreResource>().0
    }

    pub fn pellets_remaining(&self) -> usize {
        self.world.resource::<PelletsRemaining>().0
    }

    /// Seconds left on the clock; `None` for sessions without one.
    pub fn time_remaining(&self) -> Option<u32> {
        self.world.get_resource::<Countdown>().map(|countdown| countdown.remaining)
    }

    pub fn hud(&self) -> &HudText {
        self.world.resource::<HudText>()
    }

    /// Window size before scaling.
    pub fn viewport_size(&self) -> UVec2 {
        self.variant.viewport_size(self.map())
    }

    /// The player's pixel centre.
    pub fn player_position(&mut self) -> Option<Vec2> {
        let mut query = self.world.query_filtered::<&Position, With<PlayerControlled>>();
        query.single(&self.world).ok().map(|position| position.0)
    }

    /// The player's committed tile. `None` in the physics variant.
    pub fn player_tile(&mut self) -> Option<IVec2> {
        let mut query = self.world.query_filtered::<&GridPosition, With<PlayerControlled>>();
        query.single(&self.world).ok().map(|grid| grid.0)
    }

    /// Every ghost's committed tile.
    pub fn ghost_tiles(&mut self) -> Vec<(Ghost, IVec2)> {
        let mut query = self.world.query::<(&Ghost, &GridPosition)>();
        query.iter(&self.world).map(|(ghost, grid)| (*ghost, grid.0)).collect()
    }
}
