//! Combat-related components.

use std::time::Duration;

use bevy::math::bounding::BoundingCircle;
use bevy::prelude::*;

use crate::actor::Faction;
use crate::core::duration_from_secs;

/// Event sent when an attack reaches its active instant.
///
/// Lives for a single tick: the resolver consumes it in the damage phase.
#[derive(Event, Debug, Clone)]
pub struct AttackEvent {
    pub attacker: Entity,
    /// Where the attacker stood when the attack resolved
    pub origin: Vec2,
    /// Area on the ground plane; touching counts as a hit
    pub shape: BoundingCircle,
    pub damage: u32,
    /// Only actors of this faction can be hit
    pub target_filter: Faction,
}

/// Minimum time between the starts of two attacks.
#[derive(Component, Debug, Clone)]
pub struct AttackCooldown {
    timer: Timer,
}

impl AttackCooldown {
    /// A cooldown that starts out ready.
    pub fn new(seconds: f32) -> Self {
        let mut timer = Timer::new(duration_from_secs(seconds), TimerMode::Once);
        let duration = timer.duration();
        timer.tick(duration);
        Self { timer }
    }

    pub fn is_ready(&self) -> bool {
        self.timer.finished()
    }

    /// Start counting from zero (called when an attack begins).
    pub fn restart(&mut self) {
        self.timer.reset();
    }

    pub fn tick(&mut self, dt: Duration) {
        self.timer.tick(dt);
    }
}

impl Default for AttackCooldown {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Marker component for entities that have died (prevents multiple death events).
#[derive(Component, Debug)]
pub struct Dead;

/// Timer for the grace period between death and removal.
#[derive(Component)]
pub struct DespawnTimer(pub Timer);

impl DespawnTimer {
    pub fn new(delay: Duration) -> Self {
        Self(Timer::new(delay, TimerMode::Once))
    }
}

impl Default for DespawnTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(3.0, TimerMode::Once))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(100);

    #[test]
    fn test_cooldown_starts_ready() {
        assert!(AttackCooldown::new(1.5).is_ready());
        assert!(AttackCooldown::new(0.0).is_ready());
    }

    #[test]
    fn test_cooldown_counts_from_restart() {
        let mut cooldown = AttackCooldown::new(0.5);
        cooldown.restart();
        for _ in 0..4 {
            cooldown.tick(TICK);
            assert!(!cooldown.is_ready());
        }
        cooldown.tick(TICK);
        assert!(cooldown.is_ready());
    }

    #[test]
    fn test_zero_cooldown_ready_after_one_tick() {
        let mut cooldown = AttackCooldown::new(0.0);
        cooldown.restart();
        assert!(!cooldown.is_ready());
        cooldown.tick(TICK);
        assert!(cooldown.is_ready());
    }
}
