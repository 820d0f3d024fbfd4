//! Component data types.
//!
//! Components are plain data. Each one implements
//! [`Component`](crate::store::Component) so the store can keep it in its own
//! per-kind storage. Behaviour lives in the systems, with a few exceptions
//! where a method protects an invariant of the data itself (radius clamping
//! on [`Rotation`], angle wrapping).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::EntityKind;
use crate::store::Component;

// =============================================================================
// Transform / Velocity
// =============================================================================

/// Position and facing of an entity.
///
/// For orbiting entities this is derived every frame from [`Rotation`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Top-left anchor of the entity in surface coordinates.
    pub position: Vec2,
    /// Facing angle in degrees.
    pub angle: f32,
}

impl Transform {
    /// Creates a transform at `position` with the given facing.
    #[must_use]
    pub const fn new(position: Vec2, angle: f32) -> Self {
        Self { position, angle }
    }

    /// Creates a transform at `position` facing angle zero.
    #[must_use]
    pub const fn at(position: Vec2) -> Self {
        Self::new(position, 0.0)
    }
}

/// Linear speed in surface units per second.
///
/// Present only on mobile pooled entities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    /// Velocity vector (dx, dy).
    pub linear: Vec2,
}

impl Velocity {
    /// Creates a velocity from a vector.
    #[must_use]
    pub const fn new(linear: Vec2) -> Self {
        Self { linear }
    }
}

// =============================================================================
// Rotation
// =============================================================================

/// Orbital motion state.
///
/// `Rotation` is the source of truth for an orbiting entity's position: the
/// rotation system overwrites the [`Transform`] from it every frame.
///
/// # Invariants
///
/// - `0 <= angle < 360`
/// - `min_radius <= radius <= max_radius`, enforced by every mutator here
///
/// # Example
///
/// ```
/// use defence_core::entity::Rotation;
/// use glam::Vec2;
///
/// let mut rotation = Rotation::new(80.0, Vec2::new(390.0, 390.0), 200.0, 110.0, 390.0);
/// rotation.increase_radius(1000.0);
/// assert_eq!(rotation.radius, 390.0);
/// rotation.decrease_radius(1000.0);
/// assert_eq!(rotation.radius, 110.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    /// Current angle in degrees, in `[0, 360)`.
    pub angle: f32,
    /// Angular speed in degrees per second.
    pub speed: f32,
    /// Angular speed restored on reset.
    pub start_speed: f32,
    /// `true` advances the angle, `false` rewinds it.
    pub clockwise: bool,
    /// Orbit centre.
    pub center: Vec2,
    /// Current orbit radius.
    pub radius: f32,
    /// Smallest permitted radius.
    pub min_radius: f32,
    /// Largest permitted radius.
    pub max_radius: f32,
}

impl Rotation {
    /// Creates a clockwise rotation at angle zero.
    ///
    /// `radius` is clamped into the given limits.
    #[must_use]
    pub fn new(start_speed: f32, center: Vec2, radius: f32, min_radius: f32, max_radius: f32) -> Self {
        let mut rotation = Self {
            angle: 0.0,
            speed: start_speed,
            start_speed,
            clockwise: true,
            center,
            radius,
            min_radius,
            max_radius,
        };
        rotation.set_radius_limits(min_radius, max_radius);
        rotation
    }

    /// Grows the radius by `amount`, stopping at `max_radius`.
    pub fn increase_radius(&mut self, amount: f32) {
        self.radius = (self.radius + amount).min(self.max_radius);
    }

    /// Shrinks the radius by `amount`, stopping at `min_radius`.
    pub fn decrease_radius(&mut self, amount: f32) {
        self.radius = (self.radius - amount).max(self.min_radius);
    }

    /// Replaces both radius limits and re-clamps the current radius.
    ///
    /// A `max` below `min` is raised to `min` so the range never inverts.
    pub fn set_radius_limits(&mut self, min: f32, max: f32) {
        self.min_radius = min;
        self.max_radius = max.max(min);
        self.radius = self.radius.clamp(self.min_radius, self.max_radius);
    }

    /// Advances the angle by `speed * dt` in the current direction and wraps
    /// it back into `[0, 360)`.
    pub fn advance(&mut self, dt: f32) {
        let step = self.speed * dt;
        let signed = if self.clockwise { step } else { -step };
        self.angle = wrap_degrees(self.angle + signed);
    }

    /// Position on the orbit for the current angle and radius.
    #[must_use]
    pub fn orbit_position(&self) -> Vec2 {
        let radians = self.angle.to_radians();
        self.center + self.radius * Vec2::new(radians.cos(), radians.sin())
    }
}

/// Wraps an angle in degrees into `[0, 360)`.
#[must_use]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

// =============================================================================
// Health
// =============================================================================

/// Integer hit points.
///
/// `current` may dip below zero between the damage and the health check of
/// the same frame; the check then resets the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Remaining hit points.
    pub current: i32,
    /// Hit points restored on reset.
    pub max: i32,
}

impl Health {
    /// Creates full health.
    #[must_use]
    pub const fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Returns `true` once the owner has no health left.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.current <= 0
    }

    /// Restores `current` to `max`.
    pub fn restore(&mut self) {
        self.current = self.max;
    }
}

// =============================================================================
// Rendering data
// =============================================================================

/// 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Opaque red.
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Opaque green.
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// Opaque magenta.
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
    /// Opaque cyan.
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Creates an opaque colour.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Axis-aligned rectangle with a top-left origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Rect {
    /// Creates a rectangle.
    #[must_use]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Returns `true` if the two rectangles overlap with positive area.
    ///
    /// Rectangles that only share an edge do not intersect.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        left < right && top < bottom
    }

    /// Closest point inside the rectangle to `point`.
    #[must_use]
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.left, self.right()),
            point.y.clamp(self.top, self.bottom()),
        )
    }
}

/// Circle drawable with a top-left origin and per-axis scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Unscaled radius.
    pub radius: f32,
    /// Per-axis scale factor.
    pub scale: Vec2,
    /// Fill colour.
    pub fill: Color,
}

impl Shape {
    /// Creates an unscaled circle.
    #[must_use]
    pub const fn circle(radius: f32, fill: Color) -> Self {
        Self {
            radius,
            scale: Vec2::ONE,
            fill,
        }
    }

    /// Unscaled bounds, anchored at the origin.
    #[must_use]
    pub fn local_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.radius * 2.0, self.radius * 2.0)
    }

    /// Scaled bounds when drawn with its top-left at `position`.
    #[must_use]
    pub fn global_bounds(&self, position: Vec2) -> Rect {
        let size = self.scaled_size();
        Rect::new(position.x, position.y, size.x, size.y)
    }

    /// Scaled width and height.
    #[must_use]
    pub fn scaled_size(&self) -> Vec2 {
        Vec2::splat(self.radius * 2.0) * self.scale
    }

    /// Half of the largest scaled dimension.
    #[must_use]
    pub fn scaled_radius(&self) -> f32 {
        self.scaled_size().max_element() / 2.0
    }
}

/// Handle to a texture-backed sprite owned by the drawing collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteRef(pub u32);

/// What to draw for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Visual {
    /// A filled circle.
    Shape(Shape),
    /// A sprite supplied by the drawing collaborator.
    Sprite(SpriteRef),
}

/// Drawable attached to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Renderable {
    /// Exactly one drawable.
    pub visual: Visual,
}

impl Renderable {
    /// Wraps a shape.
    #[must_use]
    pub const fn shape(shape: Shape) -> Self {
        Self {
            visual: Visual::Shape(shape),
        }
    }

    /// Wraps a sprite.
    #[must_use]
    pub const fn sprite(sprite: SpriteRef) -> Self {
        Self {
            visual: Visual::Sprite(sprite),
        }
    }

    /// The shape, if this renderable draws one.
    #[must_use]
    pub const fn as_shape(&self) -> Option<&Shape> {
        match &self.visual {
            Visual::Shape(shape) => Some(shape),
            Visual::Sprite(_) => None,
        }
    }

    /// Mutable shape, if this renderable draws one.
    #[must_use]
    pub fn as_shape_mut(&mut self) -> Option<&mut Shape> {
        match &mut self.visual {
            Visual::Shape(shape) => Some(shape),
            Visual::Sprite(_) => None,
        }
    }
}

// =============================================================================
// Colliders
// =============================================================================

/// Axis-aligned box collider. Its origin is the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxCollider {
    /// Collider bounds.
    pub bounds: Rect,
}

impl BoxCollider {
    /// Creates a box collider.
    #[must_use]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            bounds: Rect::new(left, top, width, height),
        }
    }
}

/// Circle collider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CircleCollider {
    /// Circle centre.
    pub center: Vec2,
    /// Circle radius.
    pub radius: f32,
}

impl CircleCollider {
    /// Creates a circle collider.
    #[must_use]
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Collision capability.
///
/// An entity holds at most one collider. Queries can ask for the base
/// capability ([`Collider`]) or for one shape through the
/// [`BoxShaped`](crate::store::BoxShaped) and
/// [`CircleShaped`](crate::store::CircleShaped) capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Collider {
    /// Axis-aligned box.
    Box(BoxCollider),
    /// Circle.
    Circle(CircleCollider),
}

impl Collider {
    /// Returns the box variant, if any.
    #[must_use]
    pub const fn as_box(&self) -> Option<&BoxCollider> {
        match self {
            Self::Box(collider) => Some(collider),
            Self::Circle(_) => None,
        }
    }

    /// Returns the mutable box variant, if any.
    #[must_use]
    pub fn as_box_mut(&mut self) -> Option<&mut BoxCollider> {
        match self {
            Self::Box(collider) => Some(collider),
            Self::Circle(_) => None,
        }
    }

    /// Returns the circle variant, if any.
    #[must_use]
    pub const fn as_circle(&self) -> Option<&CircleCollider> {
        match self {
            Self::Circle(collider) => Some(collider),
            Self::Box(_) => None,
        }
    }

    /// Returns the mutable circle variant, if any.
    #[must_use]
    pub fn as_circle_mut(&mut self) -> Option<&mut CircleCollider> {
        match self {
            Self::Circle(collider) => Some(collider),
            Self::Box(_) => None,
        }
    }

    /// Returns `true` for the box variant.
    #[must_use]
    pub const fn is_box(&self) -> bool {
        matches!(self, Self::Box(_))
    }

    /// Returns `true` for the circle variant.
    #[must_use]
    pub const fn is_circle(&self) -> bool {
        matches!(self, Self::Circle(_))
    }
}

// =============================================================================
// Component registrations
// =============================================================================

impl Component for Transform {
    const NAME: &'static str = "Transform";
}

impl Component for Velocity {
    const NAME: &'static str = "Velocity";
}

impl Component for Rotation {
    const NAME: &'static str = "Rotation";
}

impl Component for Health {
    const NAME: &'static str = "Health";
}

impl Component for Renderable {
    const NAME: &'static str = "Renderable";
}

impl Component for Collider {
    const NAME: &'static str = "Collider";
}

impl Component for EntityKind {
    const NAME: &'static str = "EntityKind";
}
