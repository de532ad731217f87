//! Animation-state requests.
//!
//! The core never plays clips itself. It derives an [`AnimationState`] from the
//! action state each tick and sends an [`AnimationRequest`] only when that
//! state actually changes.

use bevy::prelude::*;
use serde::Deserialize;

use super::state_machine::{ActionState, ActionStateMachine};
use crate::core::AnimationRequest;

/// Visual animation state (separate from the action state for edge detection).
#[derive(Component, Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum AnimationState {
    #[default]
    Idle,
    Walk,
    /// Attack variant index
    Attack(usize),
    Hurt,
    Death,
}

impl AnimationState {
    /// Animation matching an actor's current action.
    pub fn from_machine(machine: &ActionStateMachine) -> Self {
        match machine.state() {
            ActionState::Idle => AnimationState::Idle,
            ActionState::Moving => AnimationState::Walk,
            ActionState::Attacking => {
                AnimationState::Attack(machine.current_attack().map_or(0, |attack| attack.variant))
            }
            ActionState::HitStun => AnimationState::Hurt,
            ActionState::Dead => AnimationState::Death,
        }
    }
}

/// Tracks the last requested state to detect transitions.
///
/// `None` until the first request goes out.
#[derive(Component, Default, Clone, Copy, PartialEq, Debug)]
pub struct PreviousAnimationState(pub Option<AnimationState>);

/// Clip names the animation collaborator understands.
#[derive(Component, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AnimationClips {
    pub idle: String,
    pub walk: String,
    pub hurt: String,
    pub death: String,
    /// One clip per attack variant
    pub attacks: Vec<String>,
}

impl Default for AnimationClips {
    fn default() -> Self {
        Self {
            idle: "idle".to_string(),
            walk: "walk".to_string(),
            hurt: "hurt".to_string(),
            death: "death".to_string(),
            attacks: vec!["attack".to_string()],
        }
    }
}

impl AnimationClips {
    /// Clip name for a state. Unknown attack variants fall back to the first.
    pub fn clip(&self, state: AnimationState) -> &str {
        match state {
            AnimationState::Idle => &self.idle,
            AnimationState::Walk => &self.walk,
            AnimationState::Attack(variant) => self
                .attacks
                .get(variant)
                .or_else(|| self.attacks.first())
                .map_or("attack", String::as_str),
            AnimationState::Hurt => &self.hurt,
            AnimationState::Death => &self.death,
        }
    }
}

/// Maps the action state to an animation state.
pub fn sync_animation_state(mut query: Query<(&ActionStateMachine, &mut AnimationState)>) {
    for (machine, mut anim_state) in query.iter_mut() {
        let new_state = AnimationState::from_machine(machine);
        if *anim_state != new_state {
            *anim_state = new_state;
        }
    }
}

/// Sends an `AnimationRequest` for every actor whose state changed.
pub fn emit_animation_requests(
    mut query: Query<(Entity, &AnimationState, &mut PreviousAnimationState, &AnimationClips)>,
    mut requests: EventWriter<AnimationRequest>,
) {
    for (entity, anim_state, mut previous, clips) in query.iter_mut() {
        if previous.0 == Some(*anim_state) {
            continue;
        }

        previous.0 = Some(*anim_state);
        requests.send(AnimationRequest {
            entity,
            clip: clips.clip(*anim_state).to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_names() {
        let clips = AnimationClips {
            hurt: "hit".to_string(),
            attacks: vec!["attack1".to_string(), "attack2".to_string()],
            ..default()
        };
        assert_eq!(clips.clip(AnimationState::Hurt), "hit");
        assert_eq!(clips.clip(AnimationState::Attack(1)), "attack2");
        assert_eq!(clips.clip(AnimationState::Attack(5)), "attack1");
        assert_eq!(clips.clip(AnimationState::Death), "death");
    }

    #[test]
    fn test_requests_only_on_change() {
        let mut app = App::new();
        app.add_event::<AnimationRequest>()
            .add_systems(Update, (sync_animation_state, emit_animation_requests).chain());

        let entity = app
            .world_mut()
            .spawn((
                ActionStateMachine::default(),
                AnimationState::default(),
                PreviousAnimationState::default(),
                AnimationClips::default(),
            ))
            .id();

        let mut cursor = app
            .world()
            .resource::<Events<AnimationRequest>>()
            .get_cursor();

        // First tick announces the initial clip
        app.update();
        let sent: Vec<_> = cursor
            .read(app.world().resource::<Events<AnimationRequest>>())
            .cloned()
            .collect();
        assert_eq!(
            sent,
            vec![AnimationRequest {
                entity,
                clip: "idle".to_string()
            }]
        );

        // Nothing changes, nothing is sent
        app.update();
        app.update();
        let sent = cursor
            .read(app.world().resource::<Events<AnimationRequest>>())
            .count();
        assert_eq!(sent, 0);

        app.world_mut()
            .get_mut::<ActionStateMachine>(entity)
            .unwrap()
            .force_dead();
        app.update();
        let sent: Vec<_> = cursor
            .read(app.world().resource::<Events<AnimationRequest>>())
            .map(|request| request.clip.clone())
            .collect();
        assert_eq!(sent, vec!["death".to_string()]);
    }
}
