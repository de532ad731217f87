//! Global events used for cross-system communication.
//!
//! Events are the outbound side of the core: renderers, audio, HUDs and scene
//! loaders read them without the simulation knowing they exist.

use bevy::prelude::*;

/// Sent when damage actually lands on an actor.
///
/// Rejected hits (invincible or dead targets) never produce this event.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DamageTaken {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage
    pub source: Entity,
    /// Damage requested by the attack
    pub amount: u32,
    /// Health left after the hit
    pub remaining: u32,
}

/// Sent once when an actor's health reaches 0.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
    /// Entity that killed them (if any)
    pub killed_by: Option<Entity>,
}

/// Visual cue: flash the actor red for a moment.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DamageFlash {
    pub entity: Entity,
}

/// Sent when an invincibility window opens or closes.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct InvincibilityChanged {
    pub entity: Entity,
    pub active: bool,
}

/// Fire-and-forget request for the animation collaborator.
///
/// Only sent when the requested clip differs from the previous one.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct AnimationRequest {
    pub entity: Entity,
    pub clip: String,
}

/// Sent when the player walks into an armed area exit.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct AreaExitEvent {
    /// Scene the loader should switch to
    pub scene: String,
    /// Name of the entrance to place the player at
    pub transition: String,
}
