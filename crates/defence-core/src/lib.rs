//! # Defence Core
//!
//! Entity/component runtime and per-frame systems for Central Defence.
//!
//! An orbiter circles a central base while projectiles and power-ups stream
//! in from the edges of the surface. This crate holds everything between
//! input and drawing: component storage, capability queries, the entity
//! pool and the systems that move, collide, spawn and reset.
//!
//! ## Architecture
//!
//! - **Store**: one sparse set per component kind behind a type-erased
//!   registry, queried by capability (`(Transform, Velocity)`,
//!   `(BoxShaped, Transform)`, ...)
//! - **World**: store, pool, named actor handles, surface size and the
//!   frame's events
//! - **Systems**: movement, rotation, collision, spawn and health, run in a
//!   fixed order by [`Simulation`]
//!
//! Window, input polling and drawing stay with the caller, behind the
//! [`platform`] and [`render::Canvas`] traits.
//!
//! ## Usage
//!
//! ```
//! use defence_core::{FixedSurface, HeldKeys, SimConfig, Simulation};
//!
//! let surface = FixedSurface::default();
//! let mut sim = Simulation::new(SimConfig::default(), &surface);
//! sim.step(1.0 / 60.0, &HeldKeys::none(), &surface);
//! assert_eq!(sim.level(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod commands;
pub mod config;
pub mod entity;
pub mod error;
pub mod events;
pub mod platform;
pub mod pool;
pub mod render;
pub mod simulation;
pub mod store;
pub mod systems;
pub mod world;

#[cfg(test)]
mod tests;

pub use commands::{Command, InputBindings, OrbiterCommand};
pub use config::SimConfig;
pub use entity::{EntityHandles, EntityId, EntityKind};
pub use error::ConfigError;
pub use events::{EventLog, SimEvent};
pub use platform::{FixedSurface, HeldKeys, KeyboardState, Keys, Surface};
pub use pool::EntityPool;
pub use render::{Canvas, DebugOverlay, RenderSystem};
pub use simulation::Simulation;
pub use store::{Component, ComponentStore};
pub use systems::{CollisionPolicy, System};
pub use world::World;
