//! Test setup utilities.

use glam::Vec2;

use crate::config::SimConfig;
use crate::entity::{
    BoxCollider, Collider, Color, EntityId, EntityKind, Health, Rect, Renderable, Rotation, Shape,
    SpriteRef, Transform, Velocity,
};
use crate::platform::{FixedSurface, HeldKeys};
use crate::render::Canvas;
use crate::simulation::Simulation;
use crate::world::World;

// =============================================================================
// Recording canvas
// =============================================================================

/// One call made on a [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    /// `draw_shape` with the transform position.
    Shape(Shape, Vec2),
    /// `draw_sprite` with the transform position.
    Sprite(SpriteRef, Vec2),
    /// `outline_rect`.
    Rect(Rect, Color),
    /// `outline_circle`.
    Circle(Vec2, f32, Color),
}

/// Canvas that remembers every call in order.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

impl Canvas for RecordingCanvas {
    fn draw_shape(&mut self, shape: &Shape, transform: &Transform) {
        self.calls.push(DrawCall::Shape(*shape, transform.position));
    }

    fn draw_sprite(&mut self, sprite: SpriteRef, transform: &Transform) {
        self.calls.push(DrawCall::Sprite(sprite, transform.position));
    }

    fn outline_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::Rect(rect, color));
    }

    fn outline_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.calls.push(DrawCall::Circle(center, radius, color));
    }
}

// =============================================================================
// Builders
// =============================================================================

/// A simulation on the default 800x800 surface.
pub fn default_sim() -> Simulation {
    sim_with(SimConfig::default())
}

/// A simulation built from `config` on the default surface.
pub fn sim_with(config: SimConfig) -> Simulation {
    Simulation::new(config, &FixedSurface::default())
}

/// Runs one frame of `dt` with no keys held on the default surface.
pub fn idle_step(sim: &mut Simulation, dt: f32) {
    sim.step(dt, &HeldKeys::none(), &FixedSurface::default());
}

/// Activates a stationary transient of `kind` with a 10x10 box collider at
/// `position`.
///
/// It carries a zero velocity so collision treats it as mobile without it
/// drifting between frames.
pub fn place_transient(world: &mut World, kind: EntityKind, position: Vec2) -> EntityId {
    let id = world
        .activate_pooled()
        .expect("pool has room for test transients");
    world.store.add(id, kind);
    world.store.add(id, Transform::at(position));
    world.store.add(id, Velocity::default());
    world
        .store
        .add(id, Renderable::shape(Shape::circle(5.0, kind.fill_color())));
    world.store.add(
        id,
        Collider::Box(BoxCollider::new(position.x, position.y, 10.0, 10.0)),
    );
    id
}

/// Places a stationary projectile inside the base.
pub fn projectile_at_base(world: &mut World) -> EntityId {
    place_transient(world, EntityKind::Projectile, Vec2::splat(395.0))
}

// =============================================================================
// State readers
// =============================================================================

/// The base's current health.
pub fn base_health(world: &World) -> i32 {
    world
        .store
        .get::<Health>(world.handles.base)
        .map_or(i32::MIN, |health| health.current)
}

/// A copy of the orbiter's rotation.
pub fn orbiter_rotation(world: &World) -> Rotation {
    *world
        .store
        .get::<Rotation>(world.handles.orbiter)
        .expect("orbiter has a rotation")
}

/// The orbiter's transform position.
pub fn orbiter_position(world: &World) -> Vec2 {
    world
        .store
        .get::<Transform>(world.handles.orbiter)
        .expect("orbiter has a transform")
        .position
}

/// The base's current fill colour.
pub fn base_fill(world: &World) -> Option<Color> {
    world
        .store
        .get::<Renderable>(world.handles.base)
        .and_then(Renderable::as_shape)
        .map(|shape| shape.fill)
}
