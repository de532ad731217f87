//! Player module - player entity, intent, and attacks.

mod components;
mod control;
mod plugin;

pub use components::*;
pub use control::{player_bundle, spawn_player};
pub use plugin::PlayerPlugin;
