//! Player-related components.

use bevy::prelude::*;
use serde::Deserialize;

use crate::actor::{AnimationClips, AttackProfile};
use crate::combat::{Health, HealthConfig};
use crate::core::{require_distance, require_non_negative, require_positive, ConfigError};

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Player tuning, loaded from `player.ron` when present.
#[derive(Resource, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_health: u32,
    /// Base movement speed in units per second
    pub move_speed: f32,
    pub attack_damage: u32,
    /// Radius of the attack circle
    pub attack_radius: f32,
    /// Distance from the player to the attack circle's center
    pub attack_offset: f32,
    pub attack_duration: f32,
    /// 0.0 resolves the hit as soon as the attack starts
    pub attack_hit_frame: f32,
    pub attack_cooldown: f32,
    /// Length of the hit reaction
    pub hit_duration: f32,
    pub invincibility: f32,
    pub despawn_after: Option<f32>,
    pub hurtbox_radius: f32,
    /// Health points restored per second
    pub regeneration: f32,
    pub clips: AnimationClips,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 100,
            move_speed: 5.0,
            attack_damage: 20,
            attack_radius: 0.8,
            attack_offset: 0.8,
            attack_duration: 0.5,
            attack_hit_frame: 0.0,
            attack_cooldown: 0.0,
            hit_duration: 0.5,
            invincibility: 1.0,
            despawn_after: None,
            hurtbox_radius: 0.5,
            regeneration: 0.0,
            clips: AnimationClips {
                hurt: "hit".to_string(),
                ..default()
            },
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let actor = "player";

        require_positive(actor, "attack duration", self.attack_duration)?;
        require_positive(actor, "hit duration", self.hit_duration)?;
        if !(0.0..=1.0).contains(&self.attack_hit_frame) {
            return Err(ConfigError::HitFrameOutOfRange {
                actor: actor.to_string(),
                value: self.attack_hit_frame,
            });
        }
        require_non_negative(actor, "attack cooldown", self.attack_cooldown)?;
        require_non_negative(actor, "move speed", self.move_speed)?;
        require_non_negative(actor, "regeneration", self.regeneration)?;
        require_non_negative(actor, "attack offset", self.attack_offset)?;
        require_distance(actor, "attack radius", self.attack_radius)?;
        require_distance(actor, "hurtbox radius", self.hurtbox_radius)?;

        self.health().map(|_| ())
    }

    pub fn health(&self) -> Result<Health, ConfigError> {
        Health::new(
            "player",
            &HealthConfig {
                max_health: self.max_health,
                invincibility: self.invincibility,
                despawn_after: self.despawn_after,
            },
        )
    }

    pub fn to_stats(&self) -> PlayerStats {
        PlayerStats {
            damage: self.attack_damage,
            attack_radius: self.attack_radius,
            attack_offset: self.attack_offset,
            attack: AttackProfile::new(self.attack_duration, self.attack_hit_frame, 0),
        }
    }
}

/// Player's combat statistics.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct PlayerStats {
    pub damage: u32,
    pub attack_radius: f32,
    pub attack_offset: f32,
    pub attack: AttackProfile,
}

/// Raw input for this tick, written by whatever polls the devices.
#[derive(Component, Default, Clone, Copy, Debug, PartialEq)]
pub struct PlayerIntent {
    movement: Vec2,
    attack_pressed: bool,
}

impl PlayerIntent {
    /// Set the movement direction, clamped to magnitude 1.
    pub fn set_movement(&mut self, movement: Vec2) {
        self.movement = movement.clamp_length_max(1.0);
    }

    pub fn movement(&self) -> Vec2 {
        self.movement
    }

    /// Register an attack press. Consumed on the next tick whether or not
    /// an attack could start.
    pub fn press_attack(&mut self) {
        self.attack_pressed = true;
    }

    pub fn take_attack(&mut self) -> bool {
        std::mem::take(&mut self.attack_pressed)
    }
}

/// Center of the player's attack circle: `offset` away along whichever axis
/// dominates the facing direction (vertical on a tie).
pub fn attack_point(position: Vec2, facing: Vec2, offset: f32) -> Vec2 {
    let step = if facing.x.abs() > facing.y.abs() {
        Vec2::new(offset.copysign(facing.x), 0.0)
    } else if facing.y > 0.0 {
        Vec2::new(0.0, offset)
    } else {
        Vec2::new(0.0, -offset)
    };
    position + step
}
