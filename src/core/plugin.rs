//! Core plugin that sets up events, shared resources and system ordering.

use bevy::prelude::*;

use super::data::DataDirectory;
use super::events::*;
use super::rng::CombatRng;

/// Per-tick ordering of the variable-rate phase.
///
/// Movement displacement is not part of this chain: it runs in `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Advance cooldowns, invincibility and despawn timers.
    Timers,
    /// Read targets and intents, decide what each actor wants to do.
    Perception,
    /// Step the timed-state machines and emit attacks.
    Action,
    /// Resolve attacks into health changes and deaths.
    Damage,
    /// Derive animation requests and other outbound cues.
    Presentation,
}

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Global events (DamageTaken, DeathEvent, AnimationRequest, etc.)
/// - The seeded combat RNG and the data directory
/// - The `SimulationSet` chain every other plugin slots into
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Register global events
            .add_event::<DamageTaken>()
            .add_event::<DeathEvent>()
            .add_event::<DamageFlash>()
            .add_event::<InvincibilityChanged>()
            .add_event::<AnimationRequest>()
            .add_event::<AreaExitEvent>()

            // Keep an existing seed if the embedding app chose one
            .init_resource::<CombatRng>()
            .init_resource::<DataDirectory>()

            // System ordering
            .configure_sets(
                Update,
                (
                    SimulationSet::Timers,
                    SimulationSet::Perception,
                    SimulationSet::Action,
                    SimulationSet::Damage,
                    SimulationSet::Presentation,
                )
                    .chain(),
            );
    }
}
