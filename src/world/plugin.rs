//! World plugin - scene-exit triggers.

use bevy::prelude::*;

use super::triggers::update_area_exits;
use crate::core::SimulationSet;

/// World plugin - handles the triggers that lead out of the current scene.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, update_area_exits.in_set(SimulationSet::Presentation));
    }
}
