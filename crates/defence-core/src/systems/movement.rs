//! Linear movement.
//!
//! Explicit Euler integration: `position += velocity * dt` for every active
//! entity with a [`Transform`] and a [`Velocity`]. The caller bounds `dt`.

use tracing::trace;

use crate::entity::{Transform, Velocity};
use crate::world::World;

use super::System;

/// Integrates velocity into position.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementSystem;

impl System for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn update(&mut self, world: &mut World, dt: f32) {
        for id in world.store.query::<(Transform, Velocity)>() {
            if !world.is_active(id) {
                continue;
            }
            let Some(velocity) = world.store.get::<Velocity>(id).copied() else {
                trace!(entity = %id, "movement skipped: no velocity");
                continue;
            };
            match world.store.get_mut::<Transform>(id) {
                Some(transform) => transform.position += velocity.linear * dt,
                None => trace!(entity = %id, "movement skipped: no transform"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::entity::EntityId;
    use glam::Vec2;
    use proptest::prelude::*;

    fn world() -> World {
        World::new(&SimConfig::default(), Vec2::splat(800.0))
    }

    fn spawn(world: &mut World, position: Vec2, velocity: Vec2) -> EntityId {
        let id = world.activate_pooled().unwrap();
        world.store.add(id, Transform::at(position));
        world.store.add(id, Velocity::new(velocity));
        id
    }

    #[test]
    fn moves_by_velocity_times_dt() {
        let mut world = world();
        let id = spawn(&mut world, Vec2::new(10.0, 20.0), Vec2::new(100.0, -50.0));
        MovementSystem.update(&mut world, 0.5);
        let position = world.store.get::<Transform>(id).unwrap().position;
        assert_eq!(position, Vec2::new(60.0, -5.0));
    }

    #[test]
    fn entities_without_velocity_stay_put() {
        let mut world = world();
        let base = world.handles.base;
        let before = *world.store.get::<Transform>(base).unwrap();
        MovementSystem.update(&mut world, 1.0);
        assert_eq!(world.store.get::<Transform>(base), Some(&before));
    }

    #[test]
    fn velocity_without_transform_is_skipped() {
        let mut world = world();
        let id = spawn(&mut world, Vec2::ZERO, Vec2::ONE);
        world.store.remove::<Transform>(id);
        MovementSystem.update(&mut world, 1.0);
        assert!(world.store.get::<Transform>(id).is_none());
        assert_eq!(world.store.get::<Velocity>(id).unwrap().linear, Vec2::ONE);
    }

    #[test]
    fn inactive_entities_are_skipped() {
        let mut world = world();
        let id = spawn(&mut world, Vec2::ZERO, Vec2::ONE);
        world.store.set_in_use(id, false);
        MovementSystem.update(&mut world, 1.0);
        assert_eq!(world.store.get::<Transform>(id).unwrap().position, Vec2::ZERO);
    }

    proptest! {
        #[test]
        fn integration_is_exact_euler(
            x in -1000.0f32..1000.0,
            y in -1000.0f32..1000.0,
            vx in -200.0f32..200.0,
            vy in -200.0f32..200.0,
            dt in 0.0f32..0.1,
        ) {
            let mut world = world();
            let start = Vec2::new(x, y);
            let velocity = Vec2::new(vx, vy);
            let id = spawn(&mut world, start, velocity);
            MovementSystem.update(&mut world, dt);
            let expected = start + velocity * dt;
            let position = world.store.get::<Transform>(id).unwrap().position;
            prop_assert!((position - expected).length() < 1e-3);
        }
    }
}
