//! Shared simulation context.
//!
//! A [`World`] bundles what every system needs: the component store, the
//! entity pool, the named handles of the persistent actors, the current
//! surface size and the frame's event log. Systems take `&mut World` rather
//! than reaching for globals or literal ids.
//!
//! # Lifecycle helpers
//!
//! - [`World::activate_pooled`]: take a fresh id from the pool with no stale
//!   components attached
//! - [`World::deactivate`]: clear the in-use flag, drop every component and
//!   hand the id back to the pool
//!
//! # Example
//!
//! ```
//! use defence_core::config::SimConfig;
//! use defence_core::entity::{EntityKind, Health};
//! use defence_core::world::World;
//! use glam::Vec2;
//!
//! let world = World::new(&SimConfig::default(), Vec2::splat(800.0));
//! let base = world.handles.base;
//! assert_eq!(world.store.get::<EntityKind>(base), Some(&EntityKind::Base));
//! assert_eq!(world.store.get::<Health>(base).map(|h| h.current), Some(4));
//! assert_eq!(world.pool.capacity(), 100);
//! ```

use glam::Vec2;
use tracing::trace;

use crate::config::SimConfig;
use crate::entity::{
    CircleCollider, Collider, Color, EntityHandles, EntityId, EntityKind, Health, Renderable,
    Rotation, Shape, Transform,
};
use crate::events::EventLog;
use crate::pool::EntityPool;
use crate::store::ComponentStore;
use crate::systems::collision::rescale_orbiter_collider;
use crate::systems::rotation::OrbitGeometry;

/// Everything the per-frame systems operate on.
#[derive(Debug)]
pub struct World {
    /// Component data for every entity.
    pub store: ComponentStore,
    /// Identities of transient entities.
    pub pool: EntityPool,
    /// Persistent actor handles.
    pub handles: EntityHandles,
    /// Surface width and height as of the current frame.
    pub surface_size: Vec2,
    /// Events recorded since the last drain.
    pub events: EventLog,
}

impl World {
    /// Builds a world with the orbiter, the base and an empty pool.
    #[must_use]
    pub fn new(config: &SimConfig, surface_size: Vec2) -> Self {
        let mut world = Self {
            store: ComponentStore::new(),
            pool: EntityPool::new(config.pool_capacity),
            handles: EntityHandles::default(),
            surface_size,
            events: EventLog::new(),
        };
        world.spawn_base(config);
        world.spawn_orbiter(config);
        world
    }

    fn spawn_base(&mut self, config: &SimConfig) {
        let id = self.handles.base;
        let radius = config.base.radius;

        self.store.add(id, EntityKind::Base);
        self.store
            .add(id, Renderable::shape(Shape::circle(radius, Color::WHITE)));
        self.store
            .add(id, Collider::Circle(CircleCollider::new(Vec2::ZERO, radius)));
        self.store.add(id, Health::new(config.base.max_health));
        self.reset_base();
    }

    /// Centres the base on the current surface and moves its collider along.
    ///
    /// The transform is the top-left of the base's bounding square, so it
    /// sits one scaled radius up and left of the surface centre.
    pub fn reset_base(&mut self) {
        let id = self.handles.base;
        let Some(radius) = self
            .store
            .get::<Renderable>(id)
            .and_then(Renderable::as_shape)
            .map(Shape::scaled_radius)
        else {
            trace!(entity = %id, "base reset skipped: no shape");
            return;
        };
        let position = self.surface_size / 2.0 - Vec2::splat(radius);
        self.store.add(id, Transform::at(position));
        if let Some(Collider::Circle(collider)) = self.store.get_mut::<Collider>(id) {
            collider.center = position + Vec2::splat(radius);
            collider.radius = radius;
        }
    }

    fn spawn_orbiter(&mut self, config: &SimConfig) {
        let id = self.handles.orbiter;
        self.store.add(id, EntityKind::Orbiter);
        self.store.add(
            id,
            Renderable::shape(Shape::circle(config.orbiter.radius, Color::CYAN)),
        );
        self.reset_orbiter(config.orbiter.start_speed);
    }

    /// Puts the orbiter back in its starting state.
    ///
    /// Scale returns to one, the rotation restarts at angle zero with
    /// `start_speed`, clockwise, on a radius of a quarter of the surface
    /// width, and the transform and collider follow.
    pub fn reset_orbiter(&mut self, start_speed: f32) {
        let id = self.handles.orbiter;
        if let Some(shape) = self
            .store
            .get_mut::<Renderable>(id)
            .and_then(Renderable::as_shape_mut)
        {
            shape.scale = Vec2::ONE;
        }

        let geometry = self.orbit_geometry().unwrap_or(OrbitGeometry {
            center: self.surface_size / 2.0,
            min_radius: 0.0,
            max_radius: self.surface_size.min_element() / 2.0,
        });
        let rotation = Rotation::new(
            start_speed,
            geometry.center,
            self.surface_size.x / 4.0,
            geometry.min_radius,
            geometry.max_radius,
        );
        self.store
            .add(id, Transform::at(rotation.orbit_position()));
        self.store.add(id, rotation);
        if !self.store.has::<Collider>(id) {
            self.store.add(id, Collider::Box(Default::default()));
        }
        rescale_orbiter_collider(self);
    }

    /// Orbit limits for the orbiter's current size, the base's size and the
    /// surface.
    ///
    /// `None` if either actor has lost its shape.
    #[must_use]
    pub fn orbit_geometry(&self) -> Option<OrbitGeometry> {
        let orbiter = self
            .store
            .get::<Renderable>(self.handles.orbiter)?
            .as_shape()?;
        let base = self.store.get::<Renderable>(self.handles.base)?.as_shape()?;
        Some(OrbitGeometry::derive(
            self.surface_size,
            orbiter.scaled_size(),
            base.scaled_radius(),
        ))
    }

    /// Takes an id from the pool with every stale component removed.
    ///
    /// Returns `None` when the pool is exhausted.
    pub fn activate_pooled(&mut self) -> Option<EntityId> {
        let id = self.pool.acquire()?;
        self.store.clear_entity(id);
        self.store.set_in_use(id, true);
        Some(id)
    }

    /// Returns `true` if `id` is currently in use.
    #[must_use]
    pub fn is_active(&self, id: EntityId) -> bool {
        self.store.is_in_use(id)
    }

    /// Retires a pooled entity.
    ///
    /// Persistent actors are never deactivated; asking for it is a no-op.
    pub fn deactivate(&mut self, id: EntityId) {
        if self.handles.is_reserved(id) {
            trace!(entity = %id, "deactivate ignored: persistent actor");
            return;
        }
        self.store.set_in_use(id, false);
        self.store.clear_entity(id);
        self.pool.release(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Velocity;

    fn world() -> World {
        World::new(&SimConfig::default(), Vec2::splat(800.0))
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn orbiter_starts_on_quarter_width_orbit() {
            let world = world();
            let orbiter = world.handles.orbiter;
            let rotation = world.store.get::<Rotation>(orbiter).copied().unwrap();
            assert_eq!(rotation.angle, 0.0);
            assert_eq!(rotation.speed, 80.0);
            assert!(rotation.clockwise);
            assert_eq!(rotation.center, Vec2::splat(390.0));
            assert_eq!(rotation.radius, 200.0);
            assert_eq!(rotation.min_radius, 110.0);
            assert_eq!(rotation.max_radius, 390.0);

            let transform = world.store.get::<Transform>(orbiter).unwrap();
            assert_eq!(transform.position, Vec2::new(590.0, 390.0));
        }

        #[test]
        fn orbiter_collider_matches_shape() {
            let world = world();
            let collider = world.store.get::<Collider>(world.handles.orbiter).unwrap();
            let bounds = collider.as_box().unwrap().bounds;
            assert_eq!(bounds.left, 590.0);
            assert_eq!(bounds.top, 390.0);
            assert_eq!(bounds.width, 20.0);
            assert_eq!(bounds.height, 20.0);
        }

        #[test]
        fn base_is_centered_circle() {
            let world = world();
            let base = world.handles.base;
            let transform = world.store.get::<Transform>(base).unwrap();
            assert_eq!(transform.position, Vec2::splat(300.0));
            let circle = *world.store.get::<Collider>(base).unwrap().as_circle().unwrap();
            assert_eq!(circle.center, Vec2::splat(400.0));
            assert_eq!(circle.radius, 100.0);
        }

        #[test]
        fn actors_are_in_use_and_pool_is_free() {
            let world = world();
            assert!(world.is_active(world.handles.orbiter));
            assert!(world.is_active(world.handles.base));
            assert_eq!(world.pool.active_count(), 0);
        }
    }

    mod lifecycle_tests {
        use super::*;

        #[test]
        fn activate_strips_stale_components() {
            let mut world = world();
            let id = world.activate_pooled().unwrap();
            world.store.add(id, Velocity::default());
            world.store.add(id, EntityKind::Projectile);
            world.deactivate(id);

            // Simulate a caller that re-added data after release.
            world.store.add(id, Health::new(1));
            world.store.set_in_use(id, false);

            let again = world.activate_pooled().unwrap();
            assert_eq!(again, id);
            assert!(!world.store.has::<Health>(again));
            assert!(world.is_active(again));
        }

        #[test]
        fn deactivate_clears_and_releases() {
            let mut world = world();
            let id = world.activate_pooled().unwrap();
            world.store.add(id, Transform::default());
            world.deactivate(id);
            assert!(!world.is_active(id));
            assert!(!world.store.has::<Transform>(id));
            assert_eq!(world.pool.active_count(), 0);
        }

        #[test]
        fn persistent_actors_cannot_be_deactivated() {
            let mut world = world();
            let base = world.handles.base;
            world.deactivate(base);
            assert!(world.is_active(base));
            assert!(world.store.has::<Health>(base));
        }

        #[test]
        fn reset_base_recentres_on_new_surface() {
            let mut world = world();
            let base = world.handles.base;
            world.surface_size = Vec2::new(1000.0, 600.0);
            world.reset_base();

            let transform = world.store.get::<Transform>(base).unwrap();
            assert_eq!(transform.position, Vec2::new(400.0, 200.0));
            let circle = *world.store.get::<Collider>(base).unwrap().as_circle().unwrap();
            assert_eq!(circle.center, Vec2::new(500.0, 300.0));
            assert_eq!(circle.radius, 100.0);
        }

        #[test]
        fn reset_orbiter_restores_scale_and_orbit() {
            let mut world = world();
            let orbiter = world.handles.orbiter;
            if let Some(shape) = world
                .store
                .get_mut::<Renderable>(orbiter)
                .and_then(Renderable::as_shape_mut)
            {
                shape.scale = Vec2::splat(2.25);
            }
            if let Some(rotation) = world.store.get_mut::<Rotation>(orbiter) {
                rotation.angle = 123.0;
                rotation.speed = 500.0;
            }

            world.reset_orbiter(80.0);

            let rotation = *world.store.get::<Rotation>(orbiter).unwrap();
            assert_eq!(rotation.angle, 0.0);
            assert_eq!(rotation.speed, 80.0);
            assert_eq!(rotation.min_radius, 110.0);
            let shape = *world
                .store
                .get::<Renderable>(orbiter)
                .and_then(Renderable::as_shape)
                .unwrap();
            assert_eq!(shape.scale, Vec2::ONE);
        }
    }
}
