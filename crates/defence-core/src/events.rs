//! Per-frame event log.
//!
//! Systems record what happened during a frame as [`SimEvent`]s. Events do
//! not feed back into the simulation; they exist for callers that want to
//! react to outcomes (sound, score, replays, debugging) without diffing
//! component state.
//!
//! The log is drained by the caller, usually once per frame through
//! [`Simulation::drain_events`](crate::simulation::Simulation::drain_events).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::entity::{EntityId, EntityKind};

/// Something notable that happened during a frame.
///
/// # Event Types
///
/// - `Spawned` / `SpawnSkipped`: spawn scheduler outcomes
/// - `LevelAdvanced`: the scheduler moved to a harder level
/// - `ProjectileHit` / `ProjectileBlocked`: a projectile met something
/// - `PowerUpCollected` / `PowerUpWasted`: a power-up met something
/// - `BaseDepleted` / `GameReset`: terminal condition and its reset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A pooled entity was activated.
    Spawned {
        /// Entity that was activated
        entity: EntityId,
        /// What it was spawned as
        kind: EntityKind,
        /// Where it appeared
        position: Vec2,
    },
    /// The pool was exhausted, so a spawn was dropped.
    SpawnSkipped {
        /// What would have been spawned
        kind: EntityKind,
    },
    /// The scheduler finished a level.
    LevelAdvanced {
        /// New level number
        level: u32,
        /// New spawn window in seconds
        time_window: f32,
        /// Spawns in the new level
        total: u32,
    },
    /// A projectile damaged a health-bearing entity.
    ProjectileHit {
        /// The projectile, now released
        projectile: EntityId,
        /// Entity that took the damage
        target: EntityId,
        /// Target health after the hit
        health: i32,
    },
    /// A projectile struck an entity without health and was destroyed.
    ProjectileBlocked {
        /// The projectile, now released
        projectile: EntityId,
        /// Entity it struck
        blocker: EntityId,
    },
    /// The orbiter picked up a power-up.
    PowerUpCollected {
        /// The power-up, now released
        power_up: EntityId,
        /// Which power-up
        kind: EntityKind,
        /// Entity that collected it
        collector: EntityId,
    },
    /// A power-up struck something other than the orbiter and was destroyed.
    PowerUpWasted {
        /// The power-up, now released
        power_up: EntityId,
        /// Which power-up
        kind: EntityKind,
    },
    /// An entity ran out of health.
    BaseDepleted {
        /// Entity whose health reached zero
        entity: EntityId,
    },
    /// The game was reset to its initial state.
    GameReset,
}

/// Ordered record of events since the last drain.
///
/// # Example
///
/// ```
/// use defence_core::events::{EventLog, SimEvent};
///
/// let mut log = EventLog::new();
/// log.record(SimEvent::GameReset);
/// assert_eq!(log.len(), 1);
///
/// let events = log.drain();
/// assert_eq!(events, vec![SimEvent::GameReset]);
/// assert!(log.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn record(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    /// Removes and returns every event in recording order.
    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events recorded so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
