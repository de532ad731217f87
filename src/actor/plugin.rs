//! Actor plugin - state machines, animation requests and displacement.

use bevy::prelude::*;

use super::animation::{emit_animation_requests, sync_animation_state};
use super::movement::{apply_displacement, MoverBackend};
use super::systems::{drive_velocity, step_action_machines, ActionStrike};
use crate::core::SimulationSet;

/// Systems every actor relies on, regardless of who controls it.
pub struct ActorPlugin;

impl Plugin for ActorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MoverBackend>()
            .add_event::<ActionStrike>()
            .add_systems(
                Update,
                (step_action_machines, drive_velocity)
                    .chain()
                    .in_set(SimulationSet::Action),
            )
            .add_systems(
                Update,
                (sync_animation_state, emit_animation_requests)
                    .chain()
                    .in_set(SimulationSet::Presentation),
            )
            // Fixed-rate phase: displacement only
            .add_systems(FixedUpdate, apply_displacement);
    }
}
