//! Orbital rotation.
//!
//! For every active entity holding both a [`Rotation`] and a [`Transform`],
//! the angle advances by `speed * dt` in the current direction, wraps into
//! `[0, 360)`, and the transform is overwritten with the resulting point on
//! the orbit. Rotation is the source of truth; the transform is derived.
//!
//! Radius and centre are never clamped here. Their mutators (commands, the
//! size power-up, the reset) keep them inside the orbit limits, which
//! [`OrbitGeometry`] computes from the actors' sizes.

use glam::Vec2;
use tracing::trace;

use crate::entity::{Rotation, Transform};
use crate::world::World;

use super::System;

/// Advances orbits and derives orbiter positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotationSystem;

impl System for RotationSystem {
    fn name(&self) -> &'static str {
        "rotation"
    }

    fn update(&mut self, world: &mut World, dt: f32) {
        for id in world.store.query::<(Rotation, Transform)>() {
            if !world.is_active(id) {
                continue;
            }
            let Some(rotation) = world.store.get_mut::<Rotation>(id) else {
                trace!(entity = %id, "rotation skipped: no rotation");
                continue;
            };
            rotation.advance(dt);
            let position = rotation.orbit_position();
            match world.store.get_mut::<Transform>(id) {
                Some(transform) => transform.position = position,
                None => trace!(entity = %id, "rotation skipped: no transform"),
            }
        }
    }
}

/// Orbit centre and radius limits for a given orbiter size.
///
/// The orbiter's transform is its top-left corner, so the centre is shifted
/// by half its extent to keep the orbiter's middle circling the middle of
/// the surface. The smallest orbit keeps it clear of the base; the largest
/// keeps it on the surface.
///
/// # Example
///
/// ```
/// use defence_core::systems::OrbitGeometry;
/// use glam::Vec2;
///
/// let geometry = OrbitGeometry::derive(Vec2::splat(800.0), Vec2::splat(20.0), 100.0);
/// assert_eq!(geometry.center, Vec2::splat(390.0));
/// assert_eq!(geometry.min_radius, 110.0);
/// assert_eq!(geometry.max_radius, 390.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitGeometry {
    /// Orbit centre in transform coordinates.
    pub center: Vec2,
    /// Smallest permitted radius.
    pub min_radius: f32,
    /// Largest permitted radius, never below `min_radius`.
    pub max_radius: f32,
}

impl OrbitGeometry {
    /// Derives the orbit from the surface size, the orbiter's scaled extent
    /// and the base's scaled radius.
    #[must_use]
    pub fn derive(surface: Vec2, orbiter_extent: Vec2, base_radius: f32) -> Self {
        let half = orbiter_extent / 2.0;
        let reach = half.max_element();
        let min_radius = base_radius + reach;
        Self {
            center: surface / 2.0 - half,
            min_radius,
            max_radius: (surface.min_element() / 2.0 - reach).max(min_radius),
        }
    }

    /// Moves `rotation` onto this orbit, re-clamping its radius.
    pub fn apply(&self, rotation: &mut Rotation) {
        rotation.center = self.center;
        rotation.set_radius_limits(self.min_radius, self.max_radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use proptest::prelude::*;

    fn world() -> World {
        World::new(&SimConfig::default(), Vec2::splat(800.0))
    }

    fn orbiter_rotation(world: &World) -> Rotation {
        *world.store.get::<Rotation>(world.handles.orbiter).unwrap()
    }

    mod system_tests {
        use super::*;

        #[test]
        fn transform_follows_orbit() {
            let mut world = world();
            RotationSystem.update(&mut world, 90.0 / 80.0);
            let rotation = orbiter_rotation(&world);
            assert!((rotation.angle - 90.0).abs() < 1e-3);

            let position = world
                .store
                .get::<Transform>(world.handles.orbiter)
                .unwrap()
                .position;
            assert!((position - Vec2::new(390.0, 590.0)).length() < 1e-2);
        }

        #[test]
        fn rotation_without_transform_is_skipped() {
            let mut world = world();
            let orbiter = world.handles.orbiter;
            world.store.remove::<Transform>(orbiter);
            RotationSystem.update(&mut world, 1.0);
            assert_eq!(orbiter_rotation(&world).angle, 0.0);
            assert!(world.store.get::<Transform>(orbiter).is_none());
        }

        #[test]
        fn wraps_at_359_plus_two() {
            let mut world = world();
            if let Some(rotation) = world.store.get_mut::<Rotation>(world.handles.orbiter) {
                rotation.angle = 359.0;
                rotation.speed = 2.0;
            }
            RotationSystem.update(&mut world, 1.0);
            assert!((orbiter_rotation(&world).angle - 1.0).abs() < 1e-4);
        }

        #[test]
        fn counter_clockwise_wraps_below_zero() {
            let mut world = world();
            if let Some(rotation) = world.store.get_mut::<Rotation>(world.handles.orbiter) {
                rotation.clockwise = false;
                rotation.speed = 30.0;
            }
            RotationSystem.update(&mut world, 1.0);
            assert!((orbiter_rotation(&world).angle - 330.0).abs() < 1e-4);
        }

        #[test]
        fn radius_is_not_clamped_by_the_system() {
            let mut world = world();
            if let Some(rotation) = world.store.get_mut::<Rotation>(world.handles.orbiter) {
                rotation.radius = 1000.0;
            }
            RotationSystem.update(&mut world, 0.0);
            assert_eq!(orbiter_rotation(&world).radius, 1000.0);
        }
    }

    mod geometry_tests {
        use super::*;

        #[test]
        fn larger_orbiter_tightens_limits() {
            let geometry = OrbitGeometry::derive(Vec2::splat(800.0), Vec2::splat(30.0), 100.0);
            assert_eq!(geometry.center, Vec2::splat(385.0));
            assert_eq!(geometry.min_radius, 115.0);
            assert_eq!(geometry.max_radius, 385.0);
        }

        #[test]
        fn max_never_drops_below_min() {
            let geometry = OrbitGeometry::derive(Vec2::splat(200.0), Vec2::splat(60.0), 100.0);
            assert_eq!(geometry.min_radius, 130.0);
            assert_eq!(geometry.max_radius, 130.0);
        }

        #[test]
        fn apply_reclamps_radius() {
            let mut rotation = Rotation::new(80.0, Vec2::ZERO, 112.0, 110.0, 390.0);
            OrbitGeometry::derive(Vec2::splat(800.0), Vec2::splat(30.0), 100.0).apply(&mut rotation);
            assert_eq!(rotation.radius, 115.0);
            assert_eq!(rotation.center, Vec2::splat(385.0));
        }
    }

    proptest! {
        #[test]
        fn angle_stays_in_range(
            start in 0.0f32..360.0,
            speed in 0.0f32..2000.0,
            clockwise in any::<bool>(),
            steps in prop::collection::vec(0.0f32..0.25, 1..50),
        ) {
            let mut rotation = Rotation::new(speed, Vec2::ZERO, 200.0, 110.0, 390.0);
            rotation.angle = start;
            rotation.clockwise = clockwise;
            for dt in steps {
                rotation.advance(dt);
                prop_assert!((0.0..360.0).contains(&rotation.angle));
            }
        }

        #[test]
        fn radius_clamp_is_idempotent(
            radius in 110.0f32..390.0,
            step in 0.0f32..500.0,
        ) {
            let mut rotation = Rotation::new(80.0, Vec2::ZERO, radius, 110.0, 390.0);
            rotation.increase_radius(step);
            let once = rotation.radius;
            prop_assert!(once <= 390.0);
            rotation.radius = 390.0;
            rotation.increase_radius(step);
            prop_assert_eq!(rotation.radius, 390.0);
            rotation.decrease_radius(1000.0);
            prop_assert_eq!(rotation.radius, 110.0);
            rotation.decrease_radius(step);
            prop_assert_eq!(rotation.radius, 110.0);
        }
    }
}
