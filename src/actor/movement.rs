//! Fixed-rate displacement.
//!
//! Controllers only write a [`DesiredVelocity`]. Turning that into an actual
//! position is the job of an external mover (a physics engine in the full
//! game), which may shorten the step after resolving collisions.

use bevy::prelude::*;

use super::components::{planar, DesiredVelocity};
use crate::combat::Dead;

/// Applies a desired displacement and reports where the actor ended up.
pub trait Mover: Send + Sync + 'static {
    fn apply(&mut self, entity: Entity, from: Vec2, delta: Vec2) -> Vec2;
}

/// Mover with nothing to collide with.
#[derive(Debug, Default, Clone, Copy)]
pub struct FreeMover;

impl Mover for FreeMover {
    fn apply(&mut self, _entity: Entity, from: Vec2, delta: Vec2) -> Vec2 {
        from + delta
    }
}

/// The mover in use. Replace it to plug in real collision handling.
#[derive(Resource)]
pub struct MoverBackend(pub Box<dyn Mover>);

impl Default for MoverBackend {
    fn default() -> Self {
        Self(Box::new(FreeMover))
    }
}

/// Moves every living actor by its desired velocity over one fixed step.
pub fn apply_displacement(
    time: Res<Time>,
    mut mover: ResMut<MoverBackend>,
    mut query: Query<(Entity, &mut Transform, &DesiredVelocity), Without<Dead>>,
) {
    let dt = time.delta_secs();

    for (entity, mut transform, velocity) in query.iter_mut() {
        if velocity.0 == Vec2::ZERO {
            continue;
        }

        let from = planar(&transform);
        let to = mover.0.apply(entity, from, velocity.0 * dt);
        transform.translation = to.extend(transform.translation.z);
    }
}
