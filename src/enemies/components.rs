//! Enemy-related components.

use bevy::prelude::*;

use crate::actor::AttackProfile;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Enemy type identifier (matches RON file name).
#[derive(Component, Clone, Debug)]
pub struct EnemyType(pub String);

/// Behavior state exposed to the rendering side.
#[derive(Component, Default, PartialEq, Eq, Clone, Copy, Debug)]
pub enum AiState {
    /// Standing still, no target in detection range.
    #[default]
    Idle,
    /// Target detected, closing in (or waiting in range for the cooldown).
    Chasing,
    /// Performing an attack sequence.
    Attacking,
    /// Reacting to a hit.
    Hurt,
    /// Playing death animation before despawn.
    Dead,
}

/// What the perception layer decided this tick.
#[derive(Default, PartialEq, Eq, Clone, Copy, Debug)]
pub enum Decision {
    #[default]
    Idle,
    Chase,
    Attack,
}

/// Latest perception result.
#[derive(Component, Default, Clone, Copy, Debug, PartialEq)]
pub struct Awareness {
    /// Distance to the tracked target, None without a living target
    pub distance: Option<f32>,
    pub decision: Decision,
}

/// Enemy stats loaded from RON data files.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct EnemyStats {
    pub damage: u32,
    pub detection_range: f32,
    pub attack_range: f32,
}

impl Default for EnemyStats {
    fn default() -> Self {
        Self {
            damage: 10,
            detection_range: 5.0,
            attack_range: 1.5,
        }
    }
}

/// Attack variants, one picked uniformly at random per attack.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct EnemyAttacks(pub Vec<AttackProfile>);

/// Cached handle to the actor this enemy hunts.
///
/// Lookup only: the enemy never owns its target. Re-resolved when the
/// cached entity disappears.
#[derive(Component, Default, Clone, Copy, Debug, PartialEq)]
pub struct TrackedTarget(pub Option<Entity>);
