//! Timed-state machine shared by the player and enemies.
//!
//! Every actor is in exactly one [`ActionState`]. Idle and Moving follow the
//! actor's intent each tick; Attacking and HitStun run for a fixed duration and
//! cannot be left early except by a higher-priority event; Dead is terminal.
//!
//! Timing is tracked with `Duration` arithmetic, so a state configured for
//! 0.5 s and stepped in 100 ms ticks exits on exactly the fifth tick.

use std::time::Duration;

use bevy::prelude::*;

use crate::core::{duration_from_secs, scale_duration};

/// Movement below this magnitude counts as standing still.
pub const MOVE_THRESHOLD: f32 = 0.1;

/// Mutually exclusive action states, lowest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActionState {
    #[default]
    Idle,
    Moving,
    Attacking,
    HitStun,
    Dead,
}

impl ActionState {
    /// Priority used when several states are eligible in the same tick.
    pub fn priority(self) -> u8 {
        match self {
            ActionState::Idle => 0,
            ActionState::Moving => 1,
            ActionState::Attacking => 2,
            ActionState::HitStun => 3,
            ActionState::Dead => 4,
        }
    }

    /// States that end on their own after a fixed duration.
    pub fn is_timed(self) -> bool {
        matches!(self, ActionState::Attacking | ActionState::HitStun)
    }

    /// Whether the actor may start something new this tick.
    pub fn can_act(self) -> bool {
        matches!(self, ActionState::Idle | ActionState::Moving)
    }
}

/// One attack as the state machine sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackProfile {
    /// Total length of the Attacking state
    pub duration: Duration,
    /// Fraction of `duration` at which damage resolves (0.0 = on entry)
    pub hit_frame: f32,
    /// Which attack variant was chosen (index into the actor's clip list)
    pub variant: usize,
}

impl AttackProfile {
    pub fn new(duration_secs: f32, hit_frame: f32, variant: usize) -> Self {
        Self {
            duration: duration_from_secs(duration_secs),
            hit_frame,
            variant,
        }
    }

    /// Time into the attack at which the strike resolves.
    pub fn strike_at(&self) -> Duration {
        scale_duration(self.duration, self.hit_frame)
    }
}

/// What the actor wants to do this tick.
///
/// Written by the player controller or the enemy perception layer, consumed by
/// [`ActionStateMachine::tick`].
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct ActionIntent {
    /// Desired direction, magnitude clamped to 1
    pub movement: Vec2,
    /// Attack to start, already gated by cooldown
    pub attack: Option<AttackProfile>,
}

impl ActionIntent {
    pub fn moving(direction: Vec2) -> Self {
        Self {
            movement: direction.clamp_length_max(1.0),
            attack: None,
        }
    }

    pub fn attacking(attack: AttackProfile) -> Self {
        Self {
            movement: Vec2::ZERO,
            attack: Some(attack),
        }
    }
}

/// Result of stepping the machine once.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// State entered during this tick, if it changed
    pub entered: Option<ActionState>,
    /// Set on the single tick where the current attack's hit frame is reached
    pub strike: Option<AttackProfile>,
    /// An attack was cut short before its strike fired
    pub interrupted_attack: bool,
}

/// Mutually exclusive timed-action controller.
#[derive(Component, Debug, Clone)]
pub struct ActionStateMachine {
    state: ActionState,
    elapsed: Duration,
    duration: Duration,
    attack: Option<AttackProfile>,
    strike_pending: bool,
    hit_stun: Duration,
    hit_stun_requested: bool,
}

impl ActionStateMachine {
    /// Create a machine in Idle. `hit_stun` is the length of every HitStun.
    pub fn new(hit_stun: Duration) -> Self {
        Self {
            state: ActionState::Idle,
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
            attack: None,
            strike_pending: false,
            hit_stun,
            hit_stun_requested: false,
        }
    }

    pub fn state(&self) -> ActionState {
        self.state
    }

    /// Time spent in the current state.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Fixed length of the current state, zero for Idle, Moving and Dead.
    pub fn state_duration(&self) -> Duration {
        self.duration
    }

    /// The attack being performed, while Attacking.
    pub fn current_attack(&self) -> Option<AttackProfile> {
        self.attack
    }

    pub fn is_dead(&self) -> bool {
        self.state == ActionState::Dead
    }

    /// Whether a HitStun will preempt the current state on the next tick.
    pub fn hit_stun_pending(&self) -> bool {
        self.hit_stun_requested
    }

    /// Ask for a HitStun. Applied at the start of the next tick, ahead of
    /// anything the current state would do. A running HitStun restarts; a
    /// higher-priority state (Dead) ignores the request.
    pub fn request_hit_stun(&mut self) {
        if ActionState::HitStun.priority() >= self.state.priority() {
            self.hit_stun_requested = true;
        }
    }

    /// Switch to Dead immediately, discarding any running timer.
    ///
    /// Returns false if the machine was already dead.
    pub fn force_dead(&mut self) -> bool {
        if self.is_dead() {
            return false;
        }
        self.hit_stun_requested = false;
        self.enter(ActionState::Dead, Duration::ZERO);
        true
    }

    /// Advance the machine by one tick of length `dt`.
    pub fn tick(&mut self, dt: Duration, intent: &ActionIntent) -> StepReport {
        let mut report = StepReport::default();

        if self.is_dead() {
            return report;
        }

        if self.hit_stun_requested {
            self.hit_stun_requested = false;
            report.interrupted_attack = self.state == ActionState::Attacking && self.strike_pending;
            self.enter(ActionState::HitStun, self.hit_stun);
            report.entered = Some(ActionState::HitStun);
            return report;
        }

        match self.state {
            ActionState::Attacking | ActionState::HitStun => {
                self.elapsed += dt;
                report.strike = self.take_strike();

                if self.elapsed >= self.duration {
                    let next = free_state(intent.movement);
                    self.enter(next, Duration::ZERO);
                    report.entered = Some(next);
                }
            }
            ActionState::Idle | ActionState::Moving => {
                if let Some(attack) = intent.attack {
                    self.enter(ActionState::Attacking, attack.duration);
                    self.attack = Some(attack);
                    self.strike_pending = true;
                    report.entered = Some(ActionState::Attacking);
                    report.strike = self.take_strike();
                } else {
                    let next = free_state(intent.movement);
                    if next != self.state {
                        self.enter(next, Duration::ZERO);
                        report.entered = Some(next);
                    }
                }
            }
            ActionState::Dead => {}
        }

        report
    }

    fn enter(&mut self, state: ActionState, duration: Duration) {
        self.state = state;
        self.elapsed = Duration::ZERO;
        self.duration = duration;
        if state != ActionState::Attacking {
            self.attack = None;
            self.strike_pending = false;
        }
    }

    fn take_strike(&mut self) -> Option<AttackProfile> {
        let attack = self.attack?;
        if self.strike_pending && self.elapsed >= attack.strike_at() {
            self.strike_pending = false;
            Some(attack)
        } else {
            None
        }
    }
}

impl Default for ActionStateMachine {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

fn free_state(movement: Vec2) -> ActionState {
    if movement.length() > MOVE_THRESHOLD {
        ActionState::Moving
    } else {
        ActionState::Idle
    }
}
