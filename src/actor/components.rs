//! Components shared by every actor.

use bevy::math::bounding::BoundingCircle;
use bevy::prelude::*;

use super::animation::{AnimationClips, AnimationState, PreviousAnimationState};
use super::state_machine::{ActionIntent, ActionStateMachine, MOVE_THRESHOLD};
use crate::combat::{AttackCooldown, Health};

/// Which side an actor fights for. Attacks only hit the opposing side.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Faction {
    Player,
    Enemy,
}

impl Faction {
    pub fn opponent(self) -> Self {
        match self {
            Faction::Player => Faction::Enemy,
            Faction::Enemy => Faction::Player,
        }
    }
}

/// Collision volume used by attack queries (a circle on the ground plane).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Hurtbox {
    pub radius: f32,
}

impl Hurtbox {
    /// The hurtbox placed at `position`.
    pub fn volume(&self, position: Vec2) -> BoundingCircle {
        BoundingCircle::new(position, self.radius)
    }
}

impl Default for Hurtbox {
    fn default() -> Self {
        Self { radius: 0.5 }
    }
}

/// Last direction the actor moved or looked in.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Facing(pub Vec2);

impl Default for Facing {
    fn default() -> Self {
        Self(Vec2::NEG_Y)
    }
}

impl Facing {
    /// Remember `direction` if it is large enough to mean something.
    pub fn look(&mut self, direction: Vec2) {
        if direction.length() > MOVE_THRESHOLD {
            self.0 = direction.normalize();
        }
    }
}

/// Velocity requested by the controller, applied in the fixed-rate phase.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct DesiredVelocity(pub Vec2);

/// Top speed in units per second at full movement intent.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct MoveSpeed(pub f32);

/// Ground-plane position of an actor.
pub fn planar(transform: &Transform) -> Vec2 {
    transform.translation.truncate()
}

/// Everything the combat core needs on any actor.
#[derive(Bundle)]
pub struct ActorBundle {
    pub faction: Faction,
    pub health: Health,
    pub machine: ActionStateMachine,
    pub intent: ActionIntent,
    pub cooldown: AttackCooldown,
    pub hurtbox: Hurtbox,
    pub facing: Facing,
    pub velocity: DesiredVelocity,
    pub animation: AnimationState,
    pub previous_animation: PreviousAnimationState,
    pub clips: AnimationClips,
    pub transform: Transform,
}

impl ActorBundle {
    pub fn new(
        faction: Faction,
        health: Health,
        machine: ActionStateMachine,
        cooldown: AttackCooldown,
        hurtbox: Hurtbox,
        clips: AnimationClips,
        position: Vec2,
    ) -> Self {
        Self {
            faction,
            health,
            machine,
            intent: ActionIntent::default(),
            cooldown,
            hurtbox,
            facing: Facing::default(),
            velocity: DesiredVelocity::default(),
            animation: AnimationState::default(),
            previous_animation: PreviousAnimationState::default(),
            clips,
            transform: Transform::from_translation(position.extend(0.0)),
        }
    }
}
