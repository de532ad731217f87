//! Combat systems - timers, attack resolution and deaths.

use std::collections::HashMap;

use bevy::math::bounding::IntersectsVolume;
use bevy::prelude::*;

use super::components::*;
use super::health::{DamageOutcome, Health, Regeneration};
use super::resolver::{resolve_attack, Target};
use crate::actor::{planar, ActionStateMachine, Faction, Hurtbox};
use crate::core::{DamageFlash, DamageTaken, DeathEvent, InvincibilityChanged, SimulationSet};
use crate::enemies::Enemy;
use crate::player::Player;

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app
        // Events
        .add_event::<AttackEvent>()

        // Timers run before anyone decides anything this tick
        .add_systems(
            Update,
            (tick_health, update_cooldowns, despawn_dead_actors).in_set(SimulationSet::Timers),
        )

        // Damage systems
        .add_systems(
            Update,
            (resolve_attacks, announce_deaths)
                .chain()
                .in_set(SimulationSet::Damage),
        );
}

/// Advance invincibility windows and regeneration.
fn tick_health(
    time: Res<Time>,
    mut query: Query<(Entity, &mut Health, Option<&mut Regeneration>)>,
    mut invincibility: EventWriter<InvincibilityChanged>,
) {
    let dt = time.delta();

    for (entity, mut health, regeneration) in query.iter_mut() {
        if health.tick(dt) {
            invincibility.send(InvincibilityChanged {
                entity,
                active: false,
            });
        }

        if let Some(mut regeneration) = regeneration {
            regeneration.apply(&mut *health, dt);
        }
    }
}

/// Update attack cooldowns.
fn update_cooldowns(time: Res<Time>, mut query: Query<&mut AttackCooldown>) {
    for mut cooldown in query.iter_mut() {
        cooldown.tick(time.delta());
    }
}

/// Apply every attack sent this tick to the actors it overlaps.
///
/// Attacks are processed one after another in the order they were sent, so
/// an actor killed by the first attack is ignored by the second.
#[allow(clippy::too_many_arguments)]
fn resolve_attacks(
    mut commands: Commands,
    mut attacks: EventReader<AttackEvent>,
    mut targets: Query<
        (
            Entity,
            &Transform,
            &Hurtbox,
            &Faction,
            &mut Health,
            &mut ActionStateMachine,
        ),
        Without<Dead>,
    >,
    undamageable: Query<(Entity, &Transform, &Hurtbox), Without<Health>>,
    mut damage_taken: EventWriter<DamageTaken>,
    mut flashes: EventWriter<DamageFlash>,
    mut invincibility: EventWriter<InvincibilityChanged>,
    mut deaths: EventWriter<DeathEvent>,
) {
    for attack in attacks.read() {
        for (entity, transform, hurtbox) in undamageable.iter() {
            if attack.shape.intersects(&hurtbox.volume(planar(transform))) {
                debug!("Attack from {:?} overlaps {:?}, which has no health", attack.attacker, entity);
            }
        }

        let mut machines = HashMap::new();
        let mut despawn_delays = HashMap::new();

        let candidates: Vec<_> = targets
            .iter_mut()
            .map(|(entity, transform, hurtbox, faction, health, machine)| {
                machines.insert(entity, machine);
                despawn_delays.insert(entity, health.despawn_after());
                Target {
                    entity,
                    position: planar(transform),
                    radius: hurtbox.radius,
                    faction: *faction,
                    health: health.into_inner(),
                }
            })
            .collect();

        let hits = resolve_attack(attack, candidates);
        debug!(
            "Attack from {:?} hit {} target(s) for {}",
            attack.attacker,
            hits.len(),
            attack.damage
        );

        for hit in hits {
            match hit.outcome {
                DamageOutcome::Ignored => {
                    debug!("{:?} ignored a hit from {:?}", hit.target, attack.attacker);
                }
                DamageOutcome::Damaged {
                    remaining,
                    invincibility_started,
                } => {
                    if let Some(machine) = machines.get_mut(&hit.target) {
                        machine.request_hit_stun();
                    }

                    damage_taken.send(DamageTaken {
                        target: hit.target,
                        source: attack.attacker,
                        amount: attack.damage,
                        remaining,
                    });
                    flashes.send(DamageFlash { entity: hit.target });

                    if invincibility_started {
                        invincibility.send(InvincibilityChanged {
                            entity: hit.target,
                            active: true,
                        });
                    }
                }
                DamageOutcome::Killed => {
                    if let Some(machine) = machines.get_mut(&hit.target) {
                        machine.force_dead();
                    }

                    damage_taken.send(DamageTaken {
                        target: hit.target,
                        source: attack.attacker,
                        amount: attack.damage,
                        remaining: 0,
                    });
                    flashes.send(DamageFlash { entity: hit.target });
                    deaths.send(DeathEvent {
                        entity: hit.target,
                        killed_by: Some(attack.attacker),
                    });

                    // Dead actors stop colliding and wait out their grace period
                    let mut entity = commands.entity(hit.target);
                    entity.insert(Dead).remove::<Hurtbox>();
                    if let Some(Some(delay)) = despawn_delays.get(&hit.target) {
                        entity.insert(DespawnTimer::new(*delay));
                    }
                }
            }
        }
    }
}

/// Log deaths for the outside world.
fn announce_deaths(
    mut death_events: EventReader<DeathEvent>,
    player_query: Query<Entity, With<Player>>,
    enemy_query: Query<Entity, With<Enemy>>,
) {
    for event in death_events.read() {
        if player_query.get(event.entity).is_ok() {
            info!("Player died!");
        } else if enemy_query.get(event.entity).is_ok() {
            info!("Enemy {:?} died", event.entity);
        } else {
            info!("{:?} died", event.entity);
        }
    }
}

/// Remove dead actors once their grace period is over.
fn despawn_dead_actors(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut DespawnTimer)>,
) {
    for (entity, mut despawn_timer) in query.iter_mut() {
        despawn_timer.0.tick(time.delta());

        if despawn_timer.0.finished() {
            debug!("Despawning {:?}", entity);
            commands.entity(entity).despawn_recursive();
        }
    }
}
