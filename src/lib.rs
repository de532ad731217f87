//! Skirmish Core - the combat and state core of a top-down action game.
//!
//! Headless: nothing here draws, plays sounds or polls devices. Actors are
//! driven by intents, and everything the outside world needs to know leaves
//! as events.
//!
//! # Architecture
//!
//! The crate is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Global events, system ordering, errors, data files, RNG
//! - **Actor**: Timed-state machine, animation requests, displacement
//! - **Combat**: Health, invincibility, attack resolution, death
//! - **Enemies**: Enemy definitions, perception and attacks
//! - **Player**: Player intent and attacks
//! - **World**: Scene-exit triggers

pub mod actor;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod player;
pub mod world;

use bevy::prelude::*;

/// Main plugin that adds all sub-plugins.
pub struct SkirmishPlugin;

impl Plugin for SkirmishPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Shared actor systems
            .add_plugins(actor::ActorPlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)

            // World systems
            .add_plugins(world::WorldPlugin);
    }
}
