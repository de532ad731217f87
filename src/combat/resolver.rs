//! Area damage resolution.
//!
//! One call resolves one attack: every matching target is damaged at most
//! once, independently of the others. Keeping an attack from resolving twice
//! is the caller's job (the state machine only strikes once per attack).

use std::collections::HashSet;

use bevy::math::bounding::{BoundingCircle, IntersectsVolume};
use bevy::prelude::*;

use super::components::AttackEvent;
use super::health::{DamageOutcome, Damageable};
use crate::actor::Faction;

/// A damageable actor as seen by the resolver.
pub struct Target<'a, D: Damageable + ?Sized> {
    pub entity: Entity,
    pub position: Vec2,
    pub radius: f32,
    pub faction: Faction,
    pub health: &'a mut D,
}

/// What an attack did to one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub target: Entity,
    pub outcome: DamageOutcome,
}

/// Damage every target whose volume intersects the attack shape and whose
/// faction matches the filter.
///
/// Targets are visited in the order given; that order carries no meaning.
pub fn resolve_attack<'a, D, I>(attack: &AttackEvent, targets: I) -> Vec<Hit>
where
    D: Damageable + ?Sized + 'a,
    I: IntoIterator<Item = Target<'a, D>>,
{
    let mut visited = HashSet::new();

    targets
        .into_iter()
        .filter(|target| target.entity != attack.attacker)
        .filter(|target| target.faction == attack.target_filter)
        .filter(|target| {
            attack
                .shape
                .intersects(&BoundingCircle::new(target.position, target.radius))
        })
        .filter(|target| visited.insert(target.entity))
        .map(|target| Hit {
            target: target.entity,
            outcome: target.health.take_damage(attack.damage),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::health::{Health, HealthConfig};

    fn health(max_health: u32) -> Health {
        Health::new(
            "target",
            &HealthConfig {
                max_health,
                invincibility: 0.5,
                despawn_after: None,
            },
        )
        .unwrap()
    }

    fn attack(center: Vec2, radius: f32, damage: u32) -> AttackEvent {
        AttackEvent {
            attacker: Entity::from_raw(99),
            origin: Vec2::ZERO,
            shape: BoundingCircle::new(center, radius),
            damage,
            target_filter: Faction::Enemy,
        }
    }

    #[test]
    fn test_hits_only_targets_in_shape() {
        let mut near = health(100);
        let mut far = health(100);

        let hits = resolve_attack(
            &attack(Vec2::ZERO, 1.0, 20),
            [
                Target {
                    entity: Entity::from_raw(1),
                    position: Vec2::new(1.2, 0.0),
                    radius: 0.3,
                    faction: Faction::Enemy,
                    health: &mut near,
                },
                Target {
                    entity: Entity::from_raw(2),
                    position: Vec2::new(5.0, 0.0),
                    radius: 0.3,
                    faction: Faction::Enemy,
                    health: &mut far,
                },
            ],
        );

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target, Entity::from_raw(1));
        assert_eq!(near.current_health(), 80);
        assert_eq!(far.current_health(), 100);
    }

    #[test]
    fn test_touching_edges_count_as_a_hit() {
        let mut touching = health(100);
        let mut apart = health(100);

        let hits = resolve_attack(
            &attack(Vec2::ZERO, 1.0, 10),
            [
                Target {
                    entity: Entity::from_raw(1),
                    position: Vec2::new(1.5, 0.0),
                    radius: 0.5,
                    faction: Faction::Enemy,
                    health: &mut touching,
                },
                Target {
                    entity: Entity::from_raw(2),
                    position: Vec2::new(0.0, -1.6),
                    radius: 0.5,
                    faction: Faction::Enemy,
                    health: &mut apart,
                },
            ],
        );

        assert_eq!(hits.len(), 1);
        assert_eq!(touching.current_health(), 90);
        assert_eq!(apart.current_health(), 100);
    }

    #[test]
    fn test_faction_filter_and_self_exclusion() {
        let mut ally = health(100);
        let mut attacker = health(100);

        let hits = resolve_attack(
            &attack(Vec2::ZERO, 2.0, 20),
            [
                Target {
                    entity: Entity::from_raw(1),
                    position: Vec2::ZERO,
                    radius: 0.5,
                    faction: Faction::Player,
                    health: &mut ally,
                },
                Target {
                    entity: Entity::from_raw(99),
                    position: Vec2::ZERO,
                    radius: 0.5,
                    faction: Faction::Enemy,
                    health: &mut attacker,
                },
            ],
        );

        assert!(hits.is_empty());
        assert_eq!(ally.current_health(), 100);
        assert_eq!(attacker.current_health(), 100);
    }

    #[test]
    fn test_each_target_damaged_once_per_call() {
        let mut first = health(100);
        let mut duplicate = health(100);

        // The same entity listed twice still takes one hit
        let hits = resolve_attack(
            &attack(Vec2::ZERO, 2.0, 10),
            [
                Target {
                    entity: Entity::from_raw(1),
                    position: Vec2::ZERO,
                    radius: 0.5,
                    faction: Faction::Enemy,
                    health: &mut first,
                },
                Target {
                    entity: Entity::from_raw(1),
                    position: Vec2::ZERO,
                    radius: 0.5,
                    faction: Faction::Enemy,
                    health: &mut duplicate,
                },
            ],
        );

        assert_eq!(hits.len(), 1);
        assert_eq!(first.current_health(), 90);
        assert_eq!(duplicate.current_health(), 100);
    }

    #[test]
    fn test_ignored_target_does_not_block_others() {
        let mut dead = health(10);
        dead.take_damage(10);
        let mut alive = health(100);

        let hits = resolve_attack(
            &attack(Vec2::ZERO, 2.0, 10),
            [
                Target {
                    entity: Entity::from_raw(1),
                    position: Vec2::ZERO,
                    radius: 0.5,
                    faction: Faction::Enemy,
                    health: &mut dead,
                },
                Target {
                    entity: Entity::from_raw(2),
                    position: Vec2::ZERO,
                    radius: 0.5,
                    faction: Faction::Enemy,
                    health: &mut alive,
                },
            ],
        );

        assert_eq!(hits[0].outcome, DamageOutcome::Ignored);
        assert!(matches!(hits[1].outcome, DamageOutcome::Damaged { remaining: 90, .. }));
    }

    #[test]
    fn test_works_through_trait_objects() {
        let mut concrete = health(50);
        let target: &mut dyn Damageable = &mut concrete;

        let hits = resolve_attack(
            &attack(Vec2::ZERO, 1.0, 60),
            [Target {
                entity: Entity::from_raw(3),
                position: Vec2::ZERO,
                radius: 0.1,
                faction: Faction::Enemy,
                health: target,
            }],
        );

        assert_eq!(hits[0].outcome, DamageOutcome::Killed);
    }
}
