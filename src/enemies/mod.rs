//! Enemies module - enemy entities, perception, and spawning.

pub mod ai;
mod components;
pub mod data;
mod plugin;
mod spawning;

pub use ai::decide;
pub use components::*;
pub use data::{AttackVariantConfig, EnemyDefinition, EnemyRegistry};
pub use plugin::EnemyPlugin;
pub use spawning::{enemy_bundle, spawn_enemy};
