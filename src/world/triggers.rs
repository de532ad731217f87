//! Scene-exit triggers.
//!
//! Loading the next scene is someone else's job; a trigger only announces
//! that the player walked into it.

use bevy::prelude::*;

use crate::actor::{planar, Hurtbox};
use crate::combat::Dead;
use crate::core::{duration_from_secs, AreaExitEvent};
use crate::player::Player;

/// Seconds an exit stays inert after it is spawned.
pub const EXIT_ARM_DELAY: f32 = 2.0;

/// Area that sends the player to another scene.
#[derive(Component, Debug, Clone)]
pub struct AreaExit {
    pub scene: String,
    /// Entrance name the next scene places the player at
    pub transition: String,
    pub radius: f32,
    arm_timer: Timer,
    fired: bool,
}

impl AreaExit {
    pub fn new(scene: impl Into<String>, transition: impl Into<String>, radius: f32) -> Self {
        Self::with_arm_delay(scene, transition, radius, EXIT_ARM_DELAY)
    }

    pub fn with_arm_delay(
        scene: impl Into<String>,
        transition: impl Into<String>,
        radius: f32,
        arm_delay: f32,
    ) -> Self {
        Self {
            scene: scene.into(),
            transition: transition.into(),
            radius,
            arm_timer: Timer::new(duration_from_secs(arm_delay), TimerMode::Once),
            fired: false,
        }
    }

    /// Whether the exit reacts to the player.
    pub fn is_armed(&self) -> bool {
        self.arm_timer.finished() && !self.fired
    }
}

/// Arm exits and fire the ones the player stands in.
pub fn update_area_exits(
    time: Res<Time>,
    mut exits: Query<(Entity, &Transform, &mut AreaExit)>,
    players: Query<(&Transform, Option<&Hurtbox>), (With<Player>, Without<Dead>)>,
    mut exit_events: EventWriter<AreaExitEvent>,
) {
    for (entity, transform, mut exit) in exits.iter_mut() {
        if exit.fired {
            continue;
        }

        exit.arm_timer.tick(time.delta());
        if !exit.is_armed() {
            continue;
        }

        let center = planar(transform);
        let entered = players.iter().any(|(player, hurtbox)| {
            let reach = exit.radius + hurtbox.map_or(0.0, |h| h.radius);
            planar(player).distance(center) <= reach
        });

        if entered {
            exit.fired = true;
            info!("{:?}: exit to '{}' ({})", entity, exit.scene, exit.transition);
            exit_events.send(AreaExitEvent {
                scene: exit.scene.clone(),
                transition: exit.transition.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_starts_disarmed() {
        let exit = AreaExit::new("dungeon", "from_town", 1.0);
        assert!(!exit.is_armed());
    }

    #[test]
    fn test_zero_delay_arms_after_first_tick() {
        let mut exit = AreaExit::with_arm_delay("dungeon", "from_town", 1.0, 0.0);
        exit.arm_timer.tick(std::time::Duration::ZERO);
        assert!(exit.is_armed());
    }
}
