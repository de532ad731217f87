//! Player plugin - intent, attacks and configuration.

use bevy::prelude::*;

use super::components::*;
use super::control;
use crate::actor::step_action_machines;
use crate::core::SimulationSet;

/// Player plugin - handles player configuration, intent and attacks.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        // Initialize resources
        app.init_resource::<PlayerConfig>()
            .add_systems(Startup, control::load_player_config)
            .add_systems(
                Update,
                control::read_player_intent.in_set(SimulationSet::Perception),
            )
            .add_systems(
                Update,
                control::player_strikes
                    .after(step_action_machines)
                    .in_set(SimulationSet::Action),
            );
    }
}
