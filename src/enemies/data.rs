//! Enemy data loading from RON files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use super::components::{EnemyAttacks, EnemyStats};
use crate::actor::{AnimationClips, AttackProfile};
use crate::combat::{Health, HealthConfig};
use crate::core::{
    parse_ron, read_ron, require_distance, require_non_negative, require_positive, ConfigError,
    DataDirectory,
};

/// One attack animation an enemy can pick.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct AttackVariantConfig {
    pub clip: String,
    /// Seconds
    pub duration: f32,
}

/// Enemy definition loaded from RON file.
///
/// Every field has a default, so a file only lists what differs from the
/// baseline skeleton.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct EnemyDefinition {
    pub name: String,
    pub max_health: u32,
    pub damage: u32,
    pub move_speed: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub attacks: Vec<AttackVariantConfig>,
    /// 0.0-1.0, when damage applies within an attack
    pub attack_hit_frame: f32,
    pub hurt_duration: f32,
    pub invincibility: f32,
    /// Seconds the body stays after death
    pub despawn_after: Option<f32>,
    pub hurtbox_radius: f32,
    /// Attack clip names come from `attacks`
    pub clips: AnimationClips,
}

impl Default for EnemyDefinition {
    fn default() -> Self {
        Self {
            name: "Skeleton".to_string(),
            max_health: 100,
            damage: 10,
            move_speed: 3.0,
            detection_range: 5.0,
            attack_range: 1.5,
            attack_cooldown: 1.5,
            attacks: vec![
                AttackVariantConfig {
                    clip: "attack1".to_string(),
                    duration: 0.6,
                },
                AttackVariantConfig {
                    clip: "attack2".to_string(),
                    duration: 0.7,
                },
            ],
            attack_hit_frame: 0.5,
            hurt_duration: 0.5,
            invincibility: 0.5,
            despawn_after: Some(3.0),
            hurtbox_radius: 0.5,
            clips: AnimationClips::default(),
        }
    }
}

impl EnemyDefinition {
    /// Check every value that would break the timed states or perception.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let actor = self.name.as_str();

        if self.attacks.is_empty() {
            return Err(ConfigError::NoAttackVariants {
                actor: actor.to_string(),
            });
        }
        for attack in &self.attacks {
            require_positive(actor, "attack duration", attack.duration)?;
        }
        if !(0.0..=1.0).contains(&self.attack_hit_frame) {
            return Err(ConfigError::HitFrameOutOfRange {
                actor: actor.to_string(),
                value: self.attack_hit_frame,
            });
        }

        require_positive(actor, "hurt duration", self.hurt_duration)?;
        require_non_negative(actor, "attack cooldown", self.attack_cooldown)?;
        require_non_negative(actor, "move speed", self.move_speed)?;
        require_distance(actor, "detection range", self.detection_range)?;
        require_distance(actor, "attack range", self.attack_range)?;
        require_distance(actor, "hurtbox radius", self.hurtbox_radius)?;

        if self.attack_range > self.detection_range {
            return Err(ConfigError::AttackRangeExceedsDetection {
                actor: actor.to_string(),
                attack_range: self.attack_range,
                detection_range: self.detection_range,
            });
        }

        // Health has its own checks
        self.health().map(|_| ())
    }

    /// Convert to EnemyStats component.
    pub fn to_stats(&self) -> EnemyStats {
        EnemyStats {
            damage: self.damage,
            detection_range: self.detection_range,
            attack_range: self.attack_range,
        }
    }

    pub fn attack_profiles(&self) -> EnemyAttacks {
        EnemyAttacks(
            self.attacks
                .iter()
                .enumerate()
                .map(|(variant, attack)| {
                    AttackProfile::new(attack.duration, self.attack_hit_frame, variant)
                })
                .collect(),
        )
    }

    pub fn health(&self) -> Result<Health, ConfigError> {
        Health::new(
            &self.name,
            &HealthConfig {
                max_health: self.max_health,
                invincibility: self.invincibility,
                despawn_after: self.despawn_after,
            },
        )
    }

    /// Clip names, with one attack clip per variant.
    pub fn clips(&self) -> AnimationClips {
        AnimationClips {
            attacks: self.attacks.iter().map(|attack| attack.clip.clone()).collect(),
            ..self.clips.clone()
        }
    }
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource, Default)]
pub struct EnemyRegistry {
    definitions: HashMap<String, EnemyDefinition>,
}

impl EnemyRegistry {
    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(enemy_type)
    }

    /// Add a definition after validating it.
    pub fn insert(
        &mut self,
        enemy_type: impl Into<String>,
        definition: EnemyDefinition,
    ) -> Result<(), ConfigError> {
        definition.validate()?;
        self.definitions.insert(enemy_type.into(), definition);
        Ok(())
    }

    /// Parse and add a definition from RON text.
    pub fn insert_ron(&mut self, enemy_type: &str, contents: &str) -> Result<(), ConfigError> {
        let definition = parse_ron(enemy_type, contents)?;
        self.insert(enemy_type, definition)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Load all enemy definitions from the `enemies/` data directory.
pub fn load_enemy_definitions(data_dir: Res<DataDirectory>, mut registry: ResMut<EnemyRegistry>) {
    let enemies_dir = data_dir.join("enemies");

    if !enemies_dir.exists() {
        warn!("Enemy definitions directory not found: {:?}", enemies_dir);
        return;
    }

    let Ok(entries) = fs::read_dir(&enemies_dir) else {
        warn!("Failed to read enemy definitions directory");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path.extension().is_some_and(|ext| ext == "ron") {
            let enemy_type = enemy_type_of(&path);

            match read_ron::<EnemyDefinition>(&path) {
                Ok(definition) => {
                    let name = definition.name.clone();
                    match registry.insert(enemy_type.clone(), definition) {
                        Ok(()) => info!("Loaded enemy definition: {} ({})", name, enemy_type),
                        Err(e) => error!("Rejected enemy definition {:?}: {}", path, e),
                    }
                }
                Err(e) => {
                    error!("Failed to load enemy definition {:?}: {}", path, e);
                }
            }
        }
    }

    info!("Loaded {} enemy definitions", registry.len());
}

fn enemy_type_of(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string()
}
