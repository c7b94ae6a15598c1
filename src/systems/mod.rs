//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components, systems,
//! and resources.

pub mod collision;
pub mod components;
pub mod ghost;
pub mod hud;
pub mod input;
pub mod item;
pub mod movement;
pub mod physics;
pub mod player;
pub mod state;

pub use self::collision::*;
pub use self::components::*;
pub use self::ghost::*;
pub use self::hud::*;
pub use self::input::*;
pub use self::item::*;
pub use self::movement::*;
pub use self::physics::*;
pub use self::player::*;
pub use self::state::*;
