//! Enemy AI behavior systems.
//!
//! Perception reads the distance to the tracked target and writes an
//! [`ActionIntent`]; the shared state machine does the rest. While the machine
//! is busy (attacking, hurt, dead) a new attack never starts, but the movement
//! intent keeps tracking the target so the actor resumes chasing the moment
//! the timed state ends.

use bevy::math::bounding::BoundingCircle;
use bevy::prelude::*;

use super::components::*;
use crate::actor::{planar, ActionIntent, ActionState, ActionStateMachine, ActionStrike, Facing, Faction};
use crate::combat::{AttackCooldown, AttackEvent, Dead};
use crate::core::CombatRng;
use crate::player::Player;

/// Pick a behavior from the distance to the target.
///
/// An enemy in attack range whose cooldown is still running keeps chasing
/// (it stands its ground rather than moving into the target).
pub fn decide(distance: Option<f32>, stats: &EnemyStats, cooldown_ready: bool) -> Decision {
    match distance {
        None => Decision::Idle,
        Some(d) if d <= stats.attack_range => {
            if cooldown_ready {
                Decision::Attack
            } else {
                Decision::Chase
            }
        }
        Some(d) if d <= stats.detection_range => Decision::Chase,
        Some(_) => Decision::Idle,
    }
}

/// Resolve the player entity once, and again if it disappears.
pub fn acquire_target(
    players: Query<Entity, With<Player>>,
    mut enemy_query: Query<(Entity, &mut TrackedTarget), With<Enemy>>,
) {
    for (entity, mut tracked) in enemy_query.iter_mut() {
        if tracked.0.is_some_and(|target| players.contains(target)) {
            continue;
        }

        let found = players.iter().next();
        if tracked.0 != found {
            match found {
                Some(target) => debug!("{:?}: tracking {:?}", entity, target),
                None => debug!("{:?}: no target to track", entity),
            }
            tracked.0 = found;
        }
    }
}

/// Detect the target and choose this tick's intent.
pub fn perceive(
    mut rng: ResMut<CombatRng>,
    targets: Query<&Transform, (With<Player>, Without<Dead>)>,
    mut enemy_query: Query<
        (
            &Transform,
            &TrackedTarget,
            &EnemyStats,
            &EnemyAttacks,
            &AttackCooldown,
            &ActionStateMachine,
            &mut ActionIntent,
            &mut Awareness,
            &mut Facing,
        ),
        With<Enemy>,
    >,
) {
    for (transform, tracked, stats, attacks, cooldown, machine, mut intent, mut awareness, mut facing) in
        enemy_query.iter_mut()
    {
        if machine.is_dead() {
            continue;
        }

        // No target, or a dead one, means stand still
        let Some(target_pos) = tracked
            .0
            .and_then(|target| targets.get(target).ok())
            .map(planar)
        else {
            *awareness = Awareness::default();
            *intent = ActionIntent::default();
            continue;
        };

        let to_target = target_pos - planar(transform);
        let distance = to_target.length();
        let decision = decide(Some(distance), stats, cooldown.is_ready());
        *awareness = Awareness {
            distance: Some(distance),
            decision,
        };

        // Only close the gap; inside attack range the enemy holds position
        let movement = if distance > stats.attack_range && distance <= stats.detection_range {
            to_target.normalize_or_zero()
        } else {
            Vec2::ZERO
        };

        let attack = if decision == Decision::Attack && machine.state().can_act() && !attacks.0.is_empty() {
            Some(attacks.0[rng.pick(attacks.0.len())])
        } else {
            None
        };

        *intent = ActionIntent { movement, attack };

        if decision != Decision::Idle && machine.state().can_act() {
            facing.look(to_target);
        }
    }
}

/// Turn strikes into attacks, provided the target is still within reach.
pub fn enemy_strikes(
    mut strikes: EventReader<ActionStrike>,
    targets: Query<&Transform, (With<Player>, Without<Dead>)>,
    enemy_query: Query<(&Transform, &Faction, &TrackedTarget, &EnemyStats), With<Enemy>>,
    mut attacks: EventWriter<AttackEvent>,
) {
    for strike in strikes.read() {
        let Ok((transform, faction, tracked, stats)) = enemy_query.get(strike.attacker) else {
            continue;
        };

        let origin = planar(transform);
        let in_reach = tracked
            .0
            .and_then(|target| targets.get(target).ok())
            .is_some_and(|target| planar(target).distance(origin) <= stats.attack_range);

        if !in_reach {
            debug!("{:?}: target left attack range before the swing landed", strike.attacker);
            continue;
        }

        attacks.send(AttackEvent {
            attacker: strike.attacker,
            origin,
            shape: BoundingCircle::new(origin, stats.attack_range),
            damage: stats.damage,
            target_filter: faction.opponent(),
        });
    }
}

/// Mirror the action state into the behavior state the renderer polls.
pub fn sync_ai_state(
    mut enemy_query: Query<(Entity, &ActionStateMachine, &Awareness, &mut AiState), With<Enemy>>,
) {
    for (entity, machine, awareness, mut ai_state) in enemy_query.iter_mut() {
        let new_state = match machine.state() {
            ActionState::Dead => AiState::Dead,
            ActionState::HitStun => AiState::Hurt,
            ActionState::Attacking => AiState::Attacking,
            ActionState::Idle | ActionState::Moving => match awareness.decision {
                Decision::Idle => AiState::Idle,
                Decision::Chase | Decision::Attack => AiState::Chasing,
            },
        };

        if *ai_state != new_state {
            debug!(
                "{:?}: {:?} -> {:?} (target at {:?})",
                entity, *ai_state, new_state, awareness.distance
            );
            *ai_state = new_state;
        }
    }
}
