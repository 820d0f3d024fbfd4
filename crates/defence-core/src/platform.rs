//! Seams to the platform collaborators.
//!
//! The core never owns a window or polls devices. It reads the surface size
//! through [`Surface`] and the held keys through [`KeyboardState`]. The
//! in-memory implementations here ([`FixedSurface`], [`HeldKeys`]) serve
//! tests and headless drivers.

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Render/display surface dimensions.
pub trait Surface {
    /// Current width and height in surface units.
    fn size(&self) -> Vec2;
}

/// A surface with a fixed size.
///
/// # Example
///
/// ```
/// use defence_core::platform::{FixedSurface, Surface};
/// use glam::Vec2;
///
/// let surface = FixedSurface::square(800.0);
/// assert_eq!(surface.size(), Vec2::new(800.0, 800.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedSurface {
    /// Width and height.
    pub size: Vec2,
}

impl FixedSurface {
    /// Default window edge length.
    pub const DEFAULT_EDGE: f32 = 800.0;

    /// Creates a surface of the given size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    /// Creates a square surface.
    #[must_use]
    pub const fn square(edge: f32) -> Self {
        Self::new(edge, edge)
    }
}

impl Default for FixedSurface {
    fn default() -> Self {
        Self::square(Self::DEFAULT_EDGE)
    }
}

impl Surface for FixedSurface {
    fn size(&self) -> Vec2 {
        self.size
    }
}

bitflags! {
    /// Keys the simulation reacts to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Keys: u8 {
        /// Right arrow.
        const RIGHT = 1 << 0;
        /// Left arrow.
        const LEFT = 1 << 1;
        /// Up arrow.
        const UP = 1 << 2;
        /// Down arrow.
        const DOWN = 1 << 3;
    }
}

/// Keyboard state query.
pub trait KeyboardState {
    /// Keys held down right now.
    fn pressed(&self) -> Keys;
}

/// Keyboard state fixed at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys(pub Keys);

impl HeldKeys {
    /// No keys held.
    #[must_use]
    pub const fn none() -> Self {
        Self(Keys::empty())
    }
}

impl KeyboardState for HeldKeys {
    fn pressed(&self) -> Keys {
        self.0
    }
}
