//! Player control - intent, attacks and spawning.

use bevy::math::bounding::BoundingCircle;
use bevy::prelude::*;

use super::components::*;
use crate::actor::{
    planar, ActionIntent, ActionStateMachine, ActionStrike, ActorBundle, Facing, Faction, Hurtbox,
    MoveSpeed,
};
use crate::combat::{AttackCooldown, AttackEvent, Regeneration};
use crate::core::{duration_from_secs, read_ron, ConfigError, DataDirectory};

/// Translate raw input into this tick's action intent.
pub fn read_player_intent(
    mut query: Query<
        (
            &mut PlayerIntent,
            &PlayerStats,
            &AttackCooldown,
            &ActionStateMachine,
            &mut ActionIntent,
            &mut Facing,
        ),
        With<Player>,
    >,
) {
    for (mut input, stats, cooldown, machine, mut intent, mut facing) in query.iter_mut() {
        // The press is an edge: used now or lost
        let pressed = input.take_attack();

        if machine.is_dead() {
            *intent = ActionIntent::default();
            continue;
        }

        let can_act = machine.state().can_act();
        let attack = (pressed && can_act && cooldown.is_ready()).then_some(stats.attack);

        *intent = ActionIntent {
            movement: input.movement(),
            attack,
        };

        if can_act {
            facing.look(input.movement());
        }
    }
}

/// Turn the player's strikes into attacks in front of them.
pub fn player_strikes(
    mut strikes: EventReader<ActionStrike>,
    query: Query<(&Transform, &Faction, &Facing, &PlayerStats), With<Player>>,
    mut attacks: EventWriter<AttackEvent>,
) {
    for strike in strikes.read() {
        let Ok((transform, faction, facing, stats)) = query.get(strike.attacker) else {
            continue;
        };

        let origin = planar(transform);
        let center = attack_point(origin, facing.0, stats.attack_offset);
        debug!("Player attacking at {:?} with radius {}", center, stats.attack_radius);

        attacks.send(AttackEvent {
            attacker: strike.attacker,
            origin,
            shape: BoundingCircle::new(center, stats.attack_radius),
            damage: stats.damage,
            target_filter: faction.opponent(),
        });
    }
}

/// All components of the player.
pub fn player_bundle(config: &PlayerConfig, position: Vec2) -> Result<impl Bundle, ConfigError> {
    config.validate()?;

    let actor = ActorBundle::new(
        Faction::Player,
        config.health()?,
        ActionStateMachine::new(duration_from_secs(config.hit_duration)),
        AttackCooldown::new(config.attack_cooldown),
        Hurtbox {
            radius: config.hurtbox_radius,
        },
        config.clips.clone(),
        position,
    );

    Ok((
        actor,
        (
            Player,
            config.to_stats(),
            PlayerIntent::default(),
            MoveSpeed(config.move_speed),
            Regeneration::new(config.regeneration),
            Name::new("Player"),
        ),
    ))
}

/// Spawn the player with the current configuration.
pub fn spawn_player(commands: &mut Commands, config: &PlayerConfig, position: Vec2) -> Option<Entity> {
    match player_bundle(config, position) {
        Ok(bundle) => {
            let entity = commands.spawn(bundle).id();
            info!("Spawned player at {:?}", position);
            Some(entity)
        }
        Err(e) => {
            error!("Could not spawn player: {}", e);
            None
        }
    }
}

/// Replace the default tuning with `player.ron` if it exists.
pub fn load_player_config(data_dir: Res<DataDirectory>, mut config: ResMut<PlayerConfig>) {
    let path = data_dir.join("player.ron");

    if !path.exists() {
        info!("No player config at {:?}, using defaults", path);
        return;
    }

    match read_ron::<PlayerConfig>(&path).and_then(|loaded| loaded.validate().map(|()| loaded)) {
        Ok(loaded) => {
            info!("Loaded player config from {:?}", path);
            *config = loaded;
        }
        Err(e) => {
            error!("Failed to load player config {:?}: {}", path, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use super::*;
    use crate::actor::ActionState;
    use crate::actor::ActorPlugin;
    use crate::core::CorePlugin;

    fn make_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .add_plugins((CorePlugin, ActorPlugin))
            .add_event::<AttackEvent>()
            .add_systems(
                Update,
                (
                    read_player_intent.before(crate::actor::step_action_machines),
                    player_strikes.after(crate::actor::step_action_machines),
                ),
            );
        app.update();
        app
    }

    fn spawn(app: &mut App) -> Entity {
        let bundle = player_bundle(&PlayerConfig::default(), Vec2::ZERO).unwrap();
        app.world_mut().spawn(bundle).id()
    }

    fn attacks(app: &App) -> Vec<AttackEvent> {
        let events = app.world().resource::<Events<AttackEvent>>();
        let mut cursor = events.get_cursor();
        cursor.read(events).cloned().collect()
    }

    #[test]
    fn test_attack_press_strikes_immediately_in_facing_direction() {
        let mut app = make_app();
        let player = spawn(&mut app);

        {
            let world = app.world_mut();
            let mut facing = world.get_mut::<Facing>(player).unwrap();
            facing.0 = Vec2::X;
            world.get_mut::<PlayerIntent>(player).unwrap().press_attack();
        }
        app.update();

        let sent = attacks(&app);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].shape.center, Vec2::new(0.8, 0.0));
        assert_eq!(sent[0].damage, 20);
        assert_eq!(sent[0].target_filter, Faction::Enemy);
        assert_eq!(
            app.world().get::<ActionStateMachine>(player).unwrap().state(),
            ActionState::Attacking
        );
    }

    #[test]
    fn test_press_is_consumed_even_when_busy() {
        let mut app = make_app();
        let player = spawn(&mut app);

        app.world_mut().get_mut::<PlayerIntent>(player).unwrap().press_attack();
        app.update();
        // Second press lands mid-attack and is dropped
        app.world_mut().get_mut::<PlayerIntent>(player).unwrap().press_attack();
        app.update();

        assert!(!app.world_mut().get_mut::<PlayerIntent>(player).unwrap().take_attack());

        // Attack runs its full 0.5 s, then the player is free again without
        // a queued second attack
        for _ in 0..4 {
            app.update();
        }
        assert_eq!(
            app.world().get::<ActionStateMachine>(player).unwrap().state(),
            ActionState::Idle
        );
    }

    #[test]
    fn test_movement_updates_facing() {
        let mut app = make_app();
        let player = spawn(&mut app);

        app.world_mut()
            .get_mut::<PlayerIntent>(player)
            .unwrap()
            .set_movement(Vec2::new(-1.0, 0.0));
        app.update();

        let world = app.world();
        assert_eq!(world.get::<Facing>(player).unwrap().0, Vec2::NEG_X);
        assert_eq!(
            world.get::<ActionStateMachine>(player).unwrap().state(),
            ActionState::Moving
        );
    }
}
