//! Per-frame systems.
//!
//! Systems are the only code that changes simulation state during a frame.
//! Each one reads and writes the [`World`] through capability queries and
//! treats a missing component as "skip this entity".
//!
//! # Frame order
//!
//! The [`Simulation`](crate::simulation::Simulation) runs them in a fixed
//! sequence, and each system sees the writes of the ones before it:
//!
//! 1. input commands
//! 2. [`MovementSystem`]: integrate velocity
//! 3. [`RotationSystem`]: derive orbit positions
//! 4. [`CollisionSystem`]: sync colliders, detect and resolve hits
//! 5. [`SpawnScheduler`]: spawn transients, advance levels
//! 6. [`HealthSystem`]: detect depletion, trigger the reset
//!
//! # Invariants
//!
//! - An id obtained earlier in the frame is re-checked with
//!   [`World::is_active`] before it is acted on
//! - No system caches query results across frames

pub mod collision;
pub mod health;
pub mod movement;
pub mod rotation;
pub mod spawn;

pub use collision::{CollisionPolicy, CollisionSystem};
pub use health::HealthSystem;
pub use movement::MovementSystem;
pub use rotation::{OrbitGeometry, RotationSystem};
pub use spawn::SpawnScheduler;

use crate::world::World;

/// A stage of the frame update.
///
/// # Example
///
/// ```
/// use defence_core::systems::System;
/// use defence_core::world::World;
///
/// struct Idle;
///
/// impl System for Idle {
///     fn name(&self) -> &'static str {
///         "idle"
///     }
///
///     fn update(&mut self, _world: &mut World, _dt: f32) {}
/// }
/// ```
pub trait System {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Advances the world by `dt` seconds.
    fn update(&mut self, world: &mut World, dt: f32);
}
