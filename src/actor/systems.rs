//! Per-tick stepping of the timed-state machines.

use bevy::prelude::*;

use super::components::{DesiredVelocity, MoveSpeed};
use super::state_machine::{ActionIntent, ActionState, ActionStateMachine, AttackProfile};
use crate::combat::AttackCooldown;

/// Sent on the tick an attack reaches its hit frame.
///
/// Player and enemy controllers turn this into an actual attack query. An
/// attack that is interrupted before its hit frame never sends one.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ActionStrike {
    pub attacker: Entity,
    pub attack: AttackProfile,
}

/// Advance every actor's state machine with its current intent.
pub fn step_action_machines(
    time: Res<Time>,
    mut query: Query<(
        Entity,
        &mut ActionStateMachine,
        &ActionIntent,
        Option<&mut AttackCooldown>,
    )>,
    mut strikes: EventWriter<ActionStrike>,
) {
    let dt = time.delta();

    for (entity, mut machine, intent, cooldown) in query.iter_mut() {
        if machine.is_dead() {
            continue;
        }

        let report = machine.tick(dt, intent);

        if let Some(state) = report.entered {
            debug!("{entity:?}: entered {state:?}");
            // Cooldown counts from the start of the attack
            if state == ActionState::Attacking {
                if let Some(mut cooldown) = cooldown {
                    cooldown.restart();
                }
            }
        }

        if report.interrupted_attack {
            debug!("{entity:?}: attack interrupted before its hit frame");
        }

        if let Some(attack) = report.strike {
            strikes.send(ActionStrike {
                attacker: entity,
                attack,
            });
        }
    }
}

/// Turn the movement intent into a desired velocity.
///
/// Only a Moving actor moves; attacks, hit reactions and death hold still.
pub fn drive_velocity(
    mut query: Query<(&ActionStateMachine, &ActionIntent, &MoveSpeed, &mut DesiredVelocity)>,
) {
    for (machine, intent, speed, mut velocity) in query.iter_mut() {
        let wanted = if machine.state() == ActionState::Moving {
            intent.movement * speed.0
        } else {
            Vec2::ZERO
        };

        if velocity.0 != wanted {
            velocity.0 = wanted;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use super::*;
    use crate::combat::AttackCooldown;

    fn make_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .add_event::<ActionStrike>()
            .add_systems(Update, (step_action_machines, drive_velocity).chain());
        app.update();
        app
    }

    fn spawn(app: &mut App, intent: ActionIntent) -> Entity {
        app.world_mut()
            .spawn((
                ActionStateMachine::default(),
                intent,
                AttackCooldown::new(1.0),
                MoveSpeed(4.0),
                DesiredVelocity::default(),
            ))
            .id()
    }

    #[test]
    fn test_moving_actor_gets_velocity() {
        let mut app = make_app();
        let entity = spawn(&mut app, ActionIntent::moving(Vec2::new(0.0, 0.5)));

        app.update();

        assert_eq!(
            app.world().get::<DesiredVelocity>(entity).unwrap().0,
            Vec2::new(0.0, 2.0)
        );
    }

    #[test]
    fn test_attack_restarts_cooldown_and_strikes() {
        let mut app = make_app();
        let entity = spawn(&mut app, ActionIntent::attacking(AttackProfile::new(0.5, 0.0, 0)));

        app.update();

        let world = app.world();
        assert_eq!(
            world.get::<ActionStateMachine>(entity).unwrap().state(),
            ActionState::Attacking
        );
        assert!(!world.get::<AttackCooldown>(entity).unwrap().is_ready());
        assert_eq!(world.get::<DesiredVelocity>(entity).unwrap().0, Vec2::ZERO);

        let events = world.resource::<Events<ActionStrike>>();
        let mut cursor = events.get_cursor();
        let strikes: Vec<_> = cursor.read(events).collect();
        assert_eq!(strikes.len(), 1);
        assert_eq!(strikes[0].attacker, entity);
    }
}
