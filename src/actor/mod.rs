//! Actor module - what the player and enemies have in common.
//!
//! Each actor owns one `Health` and one `ActionStateMachine`; neither lives
//! on without the other.

pub mod animation;
mod components;
pub mod movement;
mod plugin;
pub mod state_machine;
mod systems;

pub use animation::{AnimationClips, AnimationState, PreviousAnimationState};
pub use components::*;
pub use movement::{FreeMover, Mover, MoverBackend};
pub use plugin::ActorPlugin;
pub use state_machine::{
    ActionIntent, ActionState, ActionStateMachine, AttackProfile, StepReport, MOVE_THRESHOLD,
};
pub use systems::{drive_velocity, step_action_machines, ActionStrike};
