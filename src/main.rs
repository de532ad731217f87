//! Skirmish Core - headless demo encounter.
//!
//! Spawns the player and a skeleton, walks the player toward it and swings
//! until one of them dies. Everything interesting is logged.
//!
//! Run from the crate root so `assets/data` is found:
//! `RUST_LOG=info cargo run`

use std::time::Duration;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use skirmish_core::core::{DamageTaken, DeathEvent};
use skirmish_core::enemies::{spawn_enemy, Enemy, EnemyRegistry};
use skirmish_core::player::{spawn_player, Player, PlayerConfig, PlayerIntent};
use skirmish_core::SkirmishPlugin;

/// Frames per simulated second.
const TICK_RATE: u32 = 60;
/// Give up after this many simulated seconds.
const MAX_SECONDS: u32 = 30;

fn main() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / f64::from(TICK_RATE),
        )))
        .add_plugins(SkirmishPlugin)
        .add_systems(PostStartup, spawn_encounter);

    // First update loads the data files, then spawns from them
    app.update();

    let (Some(player), Some(enemy)) = (first::<Player>(&mut app), first::<Enemy>(&mut app)) else {
        error!("Encounter could not be set up");
        return;
    };

    let mut damage_cursor = app.world().resource::<Events<DamageTaken>>().get_cursor();
    let mut death_cursor = app.world().resource::<Events<DeathEvent>>().get_cursor();

    for frame in 0..TICK_RATE * MAX_SECONDS {
        script_player(&mut app, player, enemy, frame);
        app.update();

        let world = app.world();
        for hit in damage_cursor.read(world.resource::<Events<DamageTaken>>()) {
            info!(
                "{:?} hit {:?} for {} ({} left)",
                hit.source, hit.target, hit.amount, hit.remaining
            );
        }

        if death_cursor
            .read(world.resource::<Events<DeathEvent>>())
            .next()
            .is_some()
        {
            info!("Encounter over after {:.2}s", frame as f32 / TICK_RATE as f32);
            return;
        }
    }

    info!("Nobody died within {}s", MAX_SECONDS);
}

fn spawn_encounter(mut commands: Commands, config: Res<PlayerConfig>, registry: Res<EnemyRegistry>) {
    spawn_player(&mut commands, &config, Vec2::ZERO);
    spawn_enemy(&mut commands, &registry, "skeleton", Vec2::new(4.0, 0.0));
}

fn first<T: Component>(app: &mut App) -> Option<Entity> {
    let world = app.world_mut();
    let mut query = world.query_filtered::<Entity, With<T>>();
    let found = query.iter(world).next();
    found
}

/// Walk toward the enemy, swing twice a second once close.
fn script_player(app: &mut App, player: Entity, enemy: Entity, frame: u32) {
    let world = app.world_mut();

    let Some(enemy_pos) = world.get::<Transform>(enemy).map(|t| t.translation.truncate()) else {
        return;
    };
    let Some(player_pos) = world.get::<Transform>(player).map(|t| t.translation.truncate()) else {
        return;
    };
    let Some(mut intent) = world.get_mut::<PlayerIntent>(player) else {
        return;
    };

    let to_enemy = enemy_pos - player_pos;
    if to_enemy.length() > 1.2 {
        intent.set_movement(to_enemy.normalize_or_zero());
    } else {
        intent.set_movement(to_enemy.normalize_or_zero() * 0.05);
        if frame % (TICK_RATE / 2) == 0 {
            intent.press_attack();
        }
    }
}
