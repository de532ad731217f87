//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::data::{load_enemy_definitions, EnemyRegistry};
use crate::actor::step_action_machines;
use crate::core::SimulationSet;

/// Enemy plugin - handles enemy definitions, perception and attacks.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<EnemyRegistry>()
            // Load definitions once at startup
            .add_systems(Startup, load_enemy_definitions)
            // Perception picks the intent before the state machines step
            .add_systems(
                Update,
                (ai::acquire_target, ai::perceive)
                    .chain()
                    .in_set(SimulationSet::Perception),
            )
            // Strikes are read right after the machines report them
            .add_systems(
                Update,
                ai::enemy_strikes
                    .after(step_action_machines)
                    .in_set(SimulationSet::Action),
            )
            .add_systems(Update, ai::sync_ai_state.in_set(SimulationSet::Presentation));
    }
}
