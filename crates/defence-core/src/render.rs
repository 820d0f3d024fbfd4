//! Read-only drawing passes.
//!
//! The core does not rasterize anything. It walks the store and hands each
//! drawable to a [`Canvas`] supplied by the platform layer, positioned and
//! rotated by the entity's [`Transform`].
//!
//! - [`RenderSystem`]: every active entity with {Renderable, Transform}
//! - [`DebugOverlay`]: outlines of every active collider
//! - [`base_tint`]: fill colour of the base for its remaining health

use glam::Vec2;

use crate::entity::{Collider, Color, Health, Rect, Renderable, Shape, SpriteRef, Transform, Visual};
use crate::store::ComponentStore;
use crate::world::World;

/// Drawing collaborator.
pub trait Canvas {
    /// Draws a filled shape with its top-left at the transform position.
    fn draw_shape(&mut self, shape: &Shape, transform: &Transform);

    /// Draws a sprite with its origin at the transform position.
    fn draw_sprite(&mut self, sprite: SpriteRef, transform: &Transform);

    /// Outlines a rectangle.
    fn outline_rect(&mut self, rect: Rect, color: Color);

    /// Outlines a circle around `center`.
    fn outline_circle(&mut self, center: Vec2, radius: f32, color: Color);
}

/// Draws every visible entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderSystem;

impl RenderSystem {
    /// Hands every active drawable to `canvas`. Returns how many were drawn.
    pub fn render(&self, store: &ComponentStore, canvas: &mut dyn Canvas) -> usize {
        let mut drawn = 0;
        for id in store.query::<(Renderable, Transform)>() {
            if !store.is_in_use(id) {
                continue;
            }
            let (Some(renderable), Some(transform)) =
                (store.get::<Renderable>(id), store.get::<Transform>(id))
            else {
                continue;
            };
            match &renderable.visual {
                Visual::Shape(shape) => canvas.draw_shape(shape, transform),
                Visual::Sprite(sprite) => canvas.draw_sprite(*sprite, transform),
            }
            drawn += 1;
        }
        drawn
    }
}

/// Collider outlines for debugging.
#[derive(Debug, Clone, Copy)]
pub struct DebugOverlay {
    /// Outline colour.
    pub color: Color,
}

impl Default for DebugOverlay {
    fn default() -> Self {
        Self {
            color: Color::GREEN,
        }
    }
}

impl DebugOverlay {
    /// Outlines every active collider: boxes first, then circles.
    pub fn render_colliders(&self, store: &ComponentStore, canvas: &mut dyn Canvas) {
        for collider in active_colliders(store) {
            if let Collider::Box(collider) = collider {
                canvas.outline_rect(collider.bounds, self.color);
            }
        }
        for collider in active_colliders(store) {
            if let Collider::Circle(collider) = collider {
                canvas.outline_circle(collider.center, collider.radius, self.color);
            }
        }
    }
}

fn active_colliders(store: &ComponentStore) -> impl Iterator<Item = &Collider> + '_ {
    store
        .query::<(Collider,)>()
        .into_iter()
        .filter(move |&id| store.is_in_use(id))
        .filter_map(move |id| store.get::<Collider>(id))
}

/// Base fill colour for `health`.
///
/// Full health is white; each lost point shifts the colour towards red,
/// reaching pure red at one point left. A base with a maximum of one or less
/// stays white.
///
/// # Example
///
/// ```
/// use defence_core::entity::{Color, Health};
/// use defence_core::render::base_tint;
///
/// assert_eq!(base_tint(&Health::new(4)), Color::WHITE);
/// assert_eq!(base_tint(&Health { current: 1, max: 4 }), Color::RED);
/// ```
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn base_tint(health: &Health) -> Color {
    if health.max <= 1 {
        return Color::WHITE;
    }
    let ratio = (health.current - 1) as f32 / (health.max - 1) as f32;
    let red = ((1.0 - ratio) * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::rgb(255, 255 - red, 255 - red)
}

/// Sets the base's fill colour from its health.
pub fn tint_base(world: &mut World) {
    let base = world.handles.base;
    let Some(tint) = world.store.get::<Health>(base).map(base_tint) else {
        return;
    };
    if let Some(shape) = world
        .store
        .get_mut::<Renderable>(base)
        .and_then(Renderable::as_shape_mut)
    {
        shape.fill = tint;
    }
}
