//! Entity identities and semantic tags.
//!
//! Entities carry no behaviour of their own. An entity is an [`EntityId`];
//! everything it can do comes from the components attached to it in the
//! [`ComponentStore`](crate::store::ComponentStore).
//!
//! - [`EntityId`]: Opaque, stable identifier (never renumbered)
//! - [`EntityKind`]: Explicit semantic tag used by game logic
//! - [`EntityHandles`]: Named handles for the two persistent actors
//!
//! # Reserved identities
//!
//! The orbiter and the base are created once at startup and are permanently
//! in use. Every other identity belongs to the
//! [`EntityPool`](crate::pool::EntityPool) and is recycled through
//! acquire/release rather than reallocated.
//!
//! # Example
//!
//! ```
//! use defence_core::entity::{EntityHandles, EntityId};
//!
//! let handles = EntityHandles::default();
//! assert_eq!(handles.orbiter, EntityId::new(0));
//! assert_eq!(handles.base, EntityId::new(1));
//! assert_eq!(EntityHandles::FIRST_POOLED, EntityId::new(2));
//! ```

pub mod components;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use components::{
    BoxCollider, CircleCollider, Collider, Color, Health, Rect, Renderable, Rotation, Shape,
    SpriteRef, Transform, Velocity, Visual, wrap_degrees,
};

/// Unique identifier for an entity.
///
/// `EntityId` is a newtype wrapper around `u32`. Identifiers are assigned
/// once and never renumbered; reuse of pooled identities is tracked by an
/// in-use flag, not by handing out new numbers.
///
/// # Example
///
/// ```
/// use defence_core::entity::EntityId;
///
/// let id = EntityId::new(7);
/// assert_eq!(id.as_u32(), 7);
/// assert_eq!(id.index(), 7);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new `EntityId` from a raw `u32` value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw `u32` value of this identifier.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns the identifier as a dense array index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self::new(id)
    }
}

impl From<EntityId> for u32 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// Semantic classification of an entity.
///
/// Stored as its own component so that game logic never has to infer what
/// an entity is from presentation data such as its fill colour.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// The player-controlled defender circling the base.
    Orbiter,
    /// The stationary base at the centre of the surface.
    Base,
    /// A hostile projectile heading for the centre.
    Projectile,
    /// Power-up that raises the orbiter's angular speed.
    SpeedPowerUp,
    /// Power-up that enlarges the orbiter.
    SizePowerUp,
}

impl EntityKind {
    /// Returns `true` for the two power-up kinds.
    #[must_use]
    pub const fn is_power_up(self) -> bool {
        matches!(self, Self::SpeedPowerUp | Self::SizePowerUp)
    }

    /// Returns `true` for kinds that come from the pool.
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::Projectile | Self::SpeedPowerUp | Self::SizePowerUp)
    }

    /// Fill colour the drawing collaborator uses for this kind.
    #[must_use]
    pub const fn fill_color(self) -> Color {
        match self {
            Self::Orbiter => Color::CYAN,
            Self::Base => Color::WHITE,
            Self::Projectile => Color::RED,
            Self::SpeedPowerUp => Color::GREEN,
            Self::SizePowerUp => Color::MAGENTA,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Orbiter => write!(f, "Orbiter"),
            Self::Base => write!(f, "Base"),
            Self::Projectile => write!(f, "Projectile"),
            Self::SpeedPowerUp => write!(f, "SpeedPowerUp"),
            Self::SizePowerUp => write!(f, "SizePowerUp"),
        }
    }
}

/// Named handles for the persistent actors.
///
/// Systems receive these through the [`World`](crate::world::World) instead
/// of assuming literal identifiers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityHandles {
    /// The player-controlled orbiter.
    pub orbiter: EntityId,
    /// The stationary base.
    pub base: EntityId,
}

impl EntityHandles {
    /// First identity handed to the pool; everything below is reserved.
    pub const FIRST_POOLED: EntityId = EntityId::new(2);

    /// Returns `true` if `id` is one of the persistent actors.
    #[must_use]
    pub fn is_reserved(&self, id: EntityId) -> bool {
        id == self.orbiter || id == self.base
    }
}

impl Default for EntityHandles {
    fn default() -> Self {
        Self {
            orbiter: EntityId::new(0),
            base: EntityId::new(1),
        }
    }
}
