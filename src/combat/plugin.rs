//! Combat plugin - health, attacks and damage.

use bevy::prelude::*;

use super::systems;

/// Combat plugin - handles all combat systems.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Setup combat systems
        systems::setup_combat_systems(app);
    }
}
