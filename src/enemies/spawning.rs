//! Enemy spawning.

use bevy::prelude::*;

use super::components::*;
use super::data::{EnemyDefinition, EnemyRegistry};
use crate::actor::{ActionStateMachine, ActorBundle, Faction, Hurtbox, MoveSpeed};
use crate::combat::AttackCooldown;
use crate::core::{duration_from_secs, ConfigError};

/// All components of an enemy built from its definition.
pub fn enemy_bundle(
    enemy_type: &str,
    definition: &EnemyDefinition,
    position: Vec2,
) -> Result<impl Bundle, ConfigError> {
    definition.validate()?;

    let actor = ActorBundle::new(
        Faction::Enemy,
        definition.health()?,
        ActionStateMachine::new(duration_from_secs(definition.hurt_duration)),
        AttackCooldown::new(definition.attack_cooldown),
        Hurtbox {
            radius: definition.hurtbox_radius,
        },
        definition.clips(),
        position,
    );

    Ok((
        actor,
        (
            Enemy,
            EnemyType(enemy_type.to_string()),
            definition.to_stats(),
            definition.attack_profiles(),
            MoveSpeed(definition.move_speed),
            AiState::default(),
            Awareness::default(),
            TrackedTarget::default(),
            Name::new(definition.name.clone()),
        ),
    ))
}

/// Spawn an enemy of a registered type.
pub fn spawn_enemy(
    commands: &mut Commands,
    registry: &EnemyRegistry,
    enemy_type: &str,
    position: Vec2,
) -> Option<Entity> {
    let Some(definition) = registry.get(enemy_type) else {
        warn!("Unknown enemy type: {}", enemy_type);
        return None;
    };

    match enemy_bundle(enemy_type, definition, position) {
        Ok(bundle) => {
            let entity = commands.spawn(bundle).id();
            info!("Spawned {} at {:?}", definition.name, position);
            Some(entity)
        }
        Err(e) => {
            error!("Could not spawn {}: {}", enemy_type, e);
            None
        }
    }
}
