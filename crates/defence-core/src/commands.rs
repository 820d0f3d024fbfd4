//! Player commands.
//!
//! A command mutates exactly the [`Rotation`] component of one entity and
//! does nothing when that entity has no rotation. Every player action has a
//! concrete [`Command`] type; [`OrbiterCommand`] carries the same actions as
//! serializable data for scripted or replayed input.
//!
//! [`InputBindings`] maps held keys to commands each frame.
//!
//! # Example
//!
//! ```
//! use defence_core::commands::{Command, IncreaseRadius};
//! use defence_core::entity::{EntityId, Rotation};
//! use defence_core::store::ComponentStore;
//! use glam::Vec2;
//!
//! let mut store = ComponentStore::new();
//! let orbiter = EntityId::new(0);
//! store.add(orbiter, Rotation::new(80.0, Vec2::ZERO, 200.0, 110.0, 202.0));
//!
//! IncreaseRadius { step: 4.0 }.execute(&mut store, orbiter);
//! assert_eq!(store.get::<Rotation>(orbiter).map(|r| r.radius), Some(202.0));
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::OrbiterConfig;
use crate::entity::{EntityId, Rotation};
use crate::platform::Keys;
use crate::store::ComponentStore;

/// An action applied to one entity's rotation.
pub trait Command {
    /// Applies the action to `entity`. No-op if it has no [`Rotation`].
    fn execute(&self, store: &mut ComponentStore, entity: EntityId);
}

fn with_rotation(store: &mut ComponentStore, entity: EntityId, f: impl FnOnce(&mut Rotation)) {
    match store.get_mut::<Rotation>(entity) {
        Some(rotation) => f(rotation),
        None => trace!(entity = %entity, "command skipped: no rotation"),
    }
}

// =============================================================================
// Concrete commands
// =============================================================================

/// Orbit with increasing angle.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotateClockwise;

impl Command for RotateClockwise {
    fn execute(&self, store: &mut ComponentStore, entity: EntityId) {
        with_rotation(store, entity, |rotation| rotation.clockwise = true);
    }
}

/// Orbit with decreasing angle.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotateAnticlockwise;

impl Command for RotateAnticlockwise {
    fn execute(&self, store: &mut ComponentStore, entity: EntityId) {
        with_rotation(store, entity, |rotation| rotation.clockwise = false);
    }
}

/// Reverse the orbit direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToggleDirection;

impl Command for ToggleDirection {
    fn execute(&self, store: &mut ComponentStore, entity: EntityId) {
        with_rotation(store, entity, |rotation| rotation.clockwise = !rotation.clockwise);
    }
}

/// Widen the orbit, clamped at the maximum radius.
#[derive(Debug, Clone, Copy)]
pub struct IncreaseRadius {
    /// Radius change per execution.
    pub step: f32,
}

impl Command for IncreaseRadius {
    fn execute(&self, store: &mut ComponentStore, entity: EntityId) {
        with_rotation(store, entity, |rotation| rotation.increase_radius(self.step));
    }
}

/// Tighten the orbit, clamped at the minimum radius.
#[derive(Debug, Clone, Copy)]
pub struct DecreaseRadius {
    /// Radius change per execution.
    pub step: f32,
}

impl Command for DecreaseRadius {
    fn execute(&self, store: &mut ComponentStore, entity: EntityId) {
        with_rotation(store, entity, |rotation| rotation.decrease_radius(self.step));
    }
}

/// Orbit faster.
#[derive(Debug, Clone, Copy)]
pub struct IncreaseSpeed {
    /// Angular speed gained per execution, degrees per second.
    pub step: f32,
}

impl Command for IncreaseSpeed {
    fn execute(&self, store: &mut ComponentStore, entity: EntityId) {
        with_rotation(store, entity, |rotation| rotation.speed += self.step);
    }
}

// =============================================================================
// Serializable commands
// =============================================================================

/// Every orbiter action as plain data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OrbiterCommand {
    /// See [`RotateClockwise`].
    RotateClockwise,
    /// See [`RotateAnticlockwise`].
    RotateAnticlockwise,
    /// See [`ToggleDirection`].
    ToggleDirection,
    /// See [`IncreaseRadius`].
    IncreaseRadius {
        /// Radius change
        step: f32,
    },
    /// See [`DecreaseRadius`].
    DecreaseRadius {
        /// Radius change
        step: f32,
    },
    /// See [`IncreaseSpeed`].
    IncreaseSpeed {
        /// Speed change
        step: f32,
    },
}

impl Command for OrbiterCommand {
    fn execute(&self, store: &mut ComponentStore, entity: EntityId) {
        match *self {
            Self::RotateClockwise => RotateClockwise.execute(store, entity),
            Self::RotateAnticlockwise => RotateAnticlockwise.execute(store, entity),
            Self::ToggleDirection => ToggleDirection.execute(store, entity),
            Self::IncreaseRadius { step } => IncreaseRadius { step }.execute(store, entity),
            Self::DecreaseRadius { step } => DecreaseRadius { step }.execute(store, entity),
            Self::IncreaseSpeed { step } => IncreaseSpeed { step }.execute(store, entity),
        }
    }
}

// =============================================================================
// Input bindings
// =============================================================================

/// Ordered list of key-set to command bindings.
///
/// A binding fires when every key in its set is held. All matching bindings
/// fire, in list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputBindings {
    bindings: Vec<(Keys, OrbiterCommand)>,
}

impl InputBindings {
    /// Creates bindings from an explicit list.
    #[must_use]
    pub fn new(bindings: Vec<(Keys, OrbiterCommand)>) -> Self {
        Self { bindings }
    }

    /// Arrow-key bindings using the configured radius step.
    #[must_use]
    pub fn arrows(orbiter: &OrbiterConfig) -> Self {
        Self::new(vec![
            (Keys::RIGHT, OrbiterCommand::RotateClockwise),
            (Keys::LEFT, OrbiterCommand::RotateAnticlockwise),
            (
                Keys::UP,
                OrbiterCommand::IncreaseRadius {
                    step: orbiter.radius_step,
                },
            ),
            (
                Keys::DOWN,
                OrbiterCommand::DecreaseRadius {
                    step: orbiter.radius_step,
                },
            ),
        ])
    }

    /// The current bindings.
    #[must_use]
    pub fn bindings(&self) -> &[(Keys, OrbiterCommand)] {
        &self.bindings
    }

    /// Replaces every binding.
    pub fn replace(&mut self, bindings: Vec<(Keys, OrbiterCommand)>) {
        self.bindings = bindings;
    }

    /// Commands triggered by `held`, in binding order.
    pub fn triggered(&self, held: Keys) -> impl Iterator<Item = OrbiterCommand> + '_ {
        self.bindings
            .iter()
            .filter(move |(keys, _)| !keys.is_empty() && held.contains(*keys))
            .map(|(_, command)| *command)
    }

    /// Executes every command triggered by `held` on `entity`.
    ///
    /// Returns how many commands ran.
    pub fn apply(&self, held: Keys, store: &mut ComponentStore, entity: EntityId) -> usize {
        let mut executed = 0;
        for command in self.triggered(held) {
            command.execute(store, entity);
            executed += 1;
        }
        executed
    }
}

impl Default for InputBindings {
    fn default() -> Self {
        Self::arrows(&OrbiterConfig::default())
    }
}
