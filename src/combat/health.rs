//! Hit points, invincibility windows and the death transition.

use std::time::Duration;

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::{duration_from_secs, require_non_negative, ConfigError};

/// Health tuning as it appears in data files.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct HealthConfig {
    pub max_health: u32,
    /// Seconds of invincibility after a non-lethal hit
    pub invincibility: f32,
    /// Seconds between death and removal from the world (None = never removed)
    #[serde(default)]
    pub despawn_after: Option<f32>,
}

/// Result of a single `take_damage` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target was invincible or already dead. Nothing changed.
    Ignored,
    /// Damage landed and the target survived.
    Damaged {
        remaining: u32,
        /// This hit opened a new invincibility window
        invincibility_started: bool,
    },
    /// Damage landed and brought health to 0.
    Killed,
}

/// Anything an attack can hurt.
///
/// The combat resolver only talks to targets through this trait.
pub trait Damageable {
    fn take_damage(&mut self, amount: u32) -> DamageOutcome;
    /// Returns how much health was actually restored.
    fn heal(&mut self, amount: u32) -> u32;
    fn current_health(&self) -> u32;
    fn max_health(&self) -> u32;
    fn is_dead(&self) -> bool;
}

/// Component for entities that can take damage.
///
/// Invincibility opens on the first non-lethal hit and takes effect from the
/// next tick, so every hit that lands within the same tick applies in full
/// and the order they arrive in does not matter. Further hits never restart a
/// running window.
#[derive(Component, Debug, Clone)]
pub struct Health {
    current: u32,
    maximum: u32,
    invincibility: Duration,
    window: Option<Timer>,
    /// Window was opened during the current tick and is not enforced yet
    window_fresh: bool,
    dead: bool,
    despawn_after: Option<Duration>,
}

impl Health {
    /// Build a full-health component, rejecting inconsistent tuning.
    pub fn new(actor: &str, config: &HealthConfig) -> Result<Self, ConfigError> {
        if config.max_health == 0 {
            return Err(ConfigError::ZeroMaxHealth {
                actor: actor.to_string(),
            });
        }
        require_non_negative(actor, "invincibility", config.invincibility)?;
        if let Some(delay) = config.despawn_after {
            require_non_negative(actor, "despawn delay", delay)?;
        }

        Ok(Self {
            current: config.max_health,
            maximum: config.max_health,
            invincibility: duration_from_secs(config.invincibility),
            window: None,
            window_fresh: false,
            dead: false,
            despawn_after: config.despawn_after.map(duration_from_secs),
        })
    }

    /// Whether further damage is currently rejected.
    pub fn is_invincible(&self) -> bool {
        self.window.is_some() && !self.window_fresh
    }

    /// Grace delay between death and removal.
    pub fn despawn_after(&self) -> Option<Duration> {
        self.despawn_after
    }

    /// Advance the invincibility window. Returns true if it closed this tick.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.window_fresh = false;

        let Some(window) = self.window.as_mut() else {
            return false;
        };

        window.tick(dt);
        if window.finished() {
            self.window = None;
            true
        } else {
            false
        }
    }
}

impl Damageable for Health {
    fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        if self.dead || self.is_invincible() {
            return DamageOutcome::Ignored;
        }

        self.current = self.current.saturating_sub(amount);

        if self.current == 0 {
            self.dead = true;
            self.window = None;
            self.window_fresh = false;
            return DamageOutcome::Killed;
        }

        let invincibility_started = self.window.is_none() && !self.invincibility.is_zero();
        if invincibility_started {
            self.window = Some(Timer::new(self.invincibility, TimerMode::Once));
            self.window_fresh = true;
        }

        DamageOutcome::Damaged {
            remaining: self.current,
            invincibility_started,
        }
    }

    fn heal(&mut self, amount: u32) -> u32 {
        if self.dead {
            return 0;
        }

        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.maximum);
        self.current - before
    }

    fn current_health(&self) -> u32 {
        self.current
    }

    fn max_health(&self) -> u32 {
        self.maximum
    }

    fn is_dead(&self) -> bool {
        self.dead
    }
}

/// Slow passive healing, in health points per second.
#[derive(Component, Debug, Clone, Default)]
pub struct Regeneration {
    pub per_second: f32,
    carry: f32,
}

impl Regeneration {
    pub fn new(per_second: f32) -> Self {
        Self {
            per_second,
            carry: 0.0,
        }
    }

    /// Heal whole points as they accumulate. Dead or full actors bank nothing.
    pub fn apply(&mut self, health: &mut impl Damageable, dt: Duration) -> u32 {
        if self.per_second <= 0.0 || health.is_dead() || health.current_health() >= health.max_health() {
            self.carry = 0.0;
            return 0;
        }

        self.carry += self.per_second * dt.as_secs_f32();
        let whole = self.carry.floor();
        self.carry -= whole;
        health.heal(whole as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(100);

    fn health(max_health: u32, invincibility: f32) -> Health {
        Health::new(
            "test",
            &HealthConfig {
                max_health,
                invincibility,
                despawn_after: Some(3.0),
            },
        )
        .unwrap()
    }

    fn tick_for(health: &mut Health, ticks: usize) {
        for _ in 0..ticks {
            health.tick(TICK);
        }
    }

    #[test]
    fn test_zero_max_health_rejected() {
        let result = Health::new(
            "broken",
            &HealthConfig {
                max_health: 0,
                invincibility: 0.5,
                despawn_after: None,
            },
        );
        assert_eq!(
            result.unwrap_err(),
            ConfigError::ZeroMaxHealth {
                actor: "broken".to_string()
            }
        );
    }

    #[test]
    fn test_negative_invincibility_rejected() {
        let result = Health::new(
            "broken",
            &HealthConfig {
                max_health: 10,
                invincibility: -1.0,
                despawn_after: None,
            },
        );
        assert!(matches!(result, Err(ConfigError::NegativeDuration { .. })));
    }

    #[test]
    fn test_three_hits_spaced_past_invincibility() {
        let mut health = health(100, 0.5);
        let mut seen = vec![health.current_health()];

        for _ in 0..3 {
            let outcome = health.take_damage(30);
            assert!(matches!(outcome, DamageOutcome::Damaged { .. }));
            assert!(!health.is_dead());
            seen.push(health.current_health());
            tick_for(&mut health, 5);
        }

        assert_eq!(seen, vec![100, 70, 40, 10]);
    }

    #[test]
    fn test_hits_inside_window_are_rejected() {
        let mut health = health(100, 0.5);
        health.take_damage(30);

        // 0.1 s .. 0.4 s after the hit: still protected
        for _ in 0..4 {
            health.tick(TICK);
            assert!(health.is_invincible());
            assert_eq!(health.take_damage(30), DamageOutcome::Ignored);
        }

        // Exactly 0.5 s after the hit the window has closed
        assert!(health.tick(TICK));
        assert!(!health.is_invincible());
        assert_eq!(
            health.take_damage(30),
            DamageOutcome::Damaged {
                remaining: 40,
                invincibility_started: true
            }
        );
    }

    #[test]
    fn test_window_is_not_extended_by_stacked_hits() {
        let mut health = health(100, 0.5);
        health.take_damage(10);
        // Same-tick hit lands but does not restart the window
        assert_eq!(
            health.take_damage(15),
            DamageOutcome::Damaged {
                remaining: 75,
                invincibility_started: false
            }
        );

        tick_for(&mut health, 4);
        assert!(health.is_invincible());
        tick_for(&mut health, 1);
        assert!(!health.is_invincible());
    }

    #[test]
    fn test_same_tick_hits_commute() {
        let mut a = health(100, 0.5);
        a.take_damage(10);
        a.take_damage(15);

        let mut b = health(100, 0.5);
        b.take_damage(15);
        b.take_damage(10);

        assert_eq!(a.current_health(), 75);
        assert_eq!(b.current_health(), 75);
    }

    #[test]
    fn test_lethal_damage_clamps_to_zero() {
        let mut health = health(100, 0.5);
        health.take_damage(85);
        tick_for(&mut health, 5);
        assert_eq!(health.current_health(), 15);

        assert_eq!(health.take_damage(20), DamageOutcome::Killed);
        assert_eq!(health.current_health(), 0);
        assert!(health.is_dead());

        assert_eq!(health.take_damage(50), DamageOutcome::Ignored);
        assert_eq!(health.current_health(), 0);
        assert!(health.is_dead());
    }

    #[test]
    fn test_dead_cannot_heal() {
        let mut health = health(10, 0.0);
        health.take_damage(10);
        assert_eq!(health.heal(5), 0);
        assert_eq!(health.current_health(), 0);
        assert!(health.is_dead());
    }

    #[test]
    fn test_heal_clamps_to_max() {
        let mut health = health(100, 0.0);
        health.take_damage(30);
        assert_eq!(health.heal(50), 30);
        assert_eq!(health.current_health(), 100);
        assert_eq!(health.heal(u32::MAX), 0);
    }

    #[test]
    fn test_zero_invincibility_never_blocks() {
        let mut health = health(100, 0.0);
        health.take_damage(10);
        health.tick(TICK);
        assert!(!health.is_invincible());
        assert!(matches!(health.take_damage(10), DamageOutcome::Damaged { .. }));
    }

    #[test]
    fn test_health_stays_in_bounds() {
        let mut health = health(50, 0.25);
        let amounts = [7, 0, 13, 50, 1, 9, 200];
        for (i, amount) in amounts.iter().enumerate() {
            health.take_damage(*amount);
            if i % 2 == 0 {
                health.heal(11);
            }
            health.tick(TICK);
            assert!(health.current_health() <= health.max_health());
        }
    }

    #[test]
    fn test_regeneration_accumulates_fractions() {
        let mut health = health(100, 0.0);
        health.take_damage(10);
        let mut regen = Regeneration::new(5.0);

        // 5 hp/s at 0.1 s ticks is half a point per tick
        let healed: u32 = (0..4).map(|_| regen.apply(&mut health, TICK)).sum();
        assert_eq!(healed, 2);
        assert_eq!(health.current_health(), 92);
    }

    #[test]
    fn test_regeneration_stops_when_dead() {
        let mut health = health(10, 0.0);
        health.take_damage(10);
        let mut regen = Regeneration::new(100.0);
        assert_eq!(regen.apply(&mut health, TICK), 0);
        assert_eq!(health.current_health(), 0);
    }
}
