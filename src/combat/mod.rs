//! Combat module - health, attacks and damage resolution.

mod components;
pub mod health;
mod plugin;
pub mod resolver;
mod systems;

pub use components::*;
pub use health::{DamageOutcome, Damageable, Health, HealthConfig, Regeneration};
pub use plugin::CombatPlugin;
pub use resolver::{resolve_attack, Hit, Target};
