//! Leveled spawn scheduler.
//!
//! Every `time_window` seconds the scheduler spawns one transient from the
//! pool at a random point on a random surface edge, aimed at the centre.
//! A level holds `total` spawns; when they run out the window shrinks by
//! `window_decay` and the next level's total is recomputed so that a level
//! keeps lasting roughly the same time.
//!
//! # Power-ups
//!
//! Exactly one spawn per level is a power-up. Before each spawn an integer
//! is drawn uniformly from `0..remaining`; a zero turns the spawn into a
//! power-up if none has appeared yet this level. Drawing over the shrinking
//! `remaining` count places the power-up uniformly among the level's
//! spawns, and the last spawn of a level always draws zero. The power-up is
//! speed or size with equal odds.
//!
//! # Determinism
//!
//! All randomness comes from a `ChaCha8Rng` seeded at construction, so a
//! given seed and frame sequence always spawns the same things in the same
//! places.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::SpawnConfig;
use crate::entity::{
    BoxCollider, Collider, EntityId, EntityKind, Renderable, Shape, Transform, Velocity,
};
use crate::events::SimEvent;
use crate::world::World;

use super::System;

/// Timer-driven generator of projectiles and power-ups.
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    config: SpawnConfig,
    rng: ChaCha8Rng,
    level: u32,
    time_window: f32,
    elapsed: f32,
    total: u32,
    remaining: u32,
    power_up_spawned: bool,
}

impl SpawnScheduler {
    /// Creates a scheduler on level one.
    #[must_use]
    pub fn new(config: &SpawnConfig, seed: u64) -> Self {
        let mut scheduler = Self {
            config: config.clone(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            level: 1,
            time_window: config.initial_time_window,
            elapsed: 0.0,
            total: 0,
            remaining: 0,
            power_up_spawned: false,
        };
        scheduler.restart();
        scheduler
    }

    /// Replaces the RNG with a fresh one seeded from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Current level, starting at one.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Seconds between spawns on the current level.
    #[must_use]
    pub fn time_window(&self) -> f32 {
        self.time_window
    }

    /// Seconds accumulated towards the next spawn.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Spawns on the current level.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Spawns left on the current level.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether this level's power-up has been decided.
    #[must_use]
    pub fn power_up_spawned(&self) -> bool {
        self.power_up_spawned
    }

    /// Retires every transient entity and returns to level one.
    pub fn reset(&mut self, world: &mut World) {
        let transients: Vec<EntityId> = world
            .store
            .query::<(EntityKind,)>()
            .into_iter()
            .filter(|&id| {
                world
                    .store
                    .get::<EntityKind>(id)
                    .is_some_and(|kind| kind.is_transient())
            })
            .collect();
        for id in transients {
            world.deactivate(id);
        }
        self.restart();
        info!("spawn scheduler reset");
    }

    fn restart(&mut self) {
        self.level = 1;
        self.time_window = self.config.initial_time_window;
        self.elapsed = 0.0;
        self.total = self.config.projectiles_per_level;
        self.remaining = self.total;
        self.power_up_spawned = false;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn next_level(&mut self, world: &mut World) {
        self.power_up_spawned = false;
        self.level += 1;
        self.time_window *= self.config.window_decay;
        let total = (self.config.level_time() / self.time_window).round();
        self.total = (total as u32).max(1);
        self.remaining = self.total;

        info!(
            level = self.level,
            time_window = self.time_window,
            total = self.total,
            "level advanced"
        );
        world.events.record(SimEvent::LevelAdvanced {
            level: self.level,
            time_window: self.time_window,
            total: self.total,
        });
    }

    fn choose_kind(&mut self) -> EntityKind {
        let draw = self.rng.gen_range(0..self.remaining.max(1));
        if self.power_up_spawned || draw != 0 {
            return EntityKind::Projectile;
        }
        // Set even when the pool turns out to be exhausted.
        self.power_up_spawned = true;
        if self.rng.gen_range(0..2) == 0 {
            EntityKind::SpeedPowerUp
        } else {
            EntityKind::SizePowerUp
        }
    }

    /// Random point on one of the four surface edges.
    fn edge_position(&mut self, size: Vec2) -> Vec2 {
        let edge = self.rng.gen_range(0..4);
        match edge {
            0 => Vec2::new(random_coord(&mut self.rng, size.x), 0.0),
            1 => Vec2::new(size.x, random_coord(&mut self.rng, size.y)),
            2 => Vec2::new(random_coord(&mut self.rng, size.x), size.y),
            _ => Vec2::new(0.0, random_coord(&mut self.rng, size.y)),
        }
    }

    /// Activates a pooled entity as `kind`.
    ///
    /// Returns `None` and records [`SimEvent::SpawnSkipped`] when the pool
    /// is exhausted.
    pub fn launch(&mut self, world: &mut World, kind: EntityKind) -> Option<EntityId> {
        let Some(id) = world.activate_pooled() else {
            debug!(%kind, "spawn skipped: pool exhausted");
            world.events.record(SimEvent::SpawnSkipped { kind });
            return None;
        };

        let size = world.surface_size;
        let position = self.edge_position(size);
        let speed = if kind.is_power_up() {
            self.config.power_up_speed
        } else {
            self.config.projectile_speed
        };
        let velocity = (size / 2.0 - position).normalize_or_zero() * speed;
        let radius = self.config.transient_radius;

        world.store.add(id, kind);
        world.store.add(id, Transform::at(position));
        world.store.add(id, Velocity::new(velocity));
        world
            .store
            .add(id, Renderable::shape(Shape::circle(radius, kind.fill_color())));
        world.store.add(
            id,
            Collider::Box(BoxCollider::new(
                position.x,
                position.y,
                radius * 2.0,
                radius * 2.0,
            )),
        );

        debug!(entity = %id, %kind, x = position.x, y = position.y, "spawned");
        world.events.record(SimEvent::Spawned {
            entity: id,
            kind,
            position,
        });
        Some(id)
    }
}

fn random_coord(rng: &mut ChaCha8Rng, extent: f32) -> f32 {
    if extent > 0.0 {
        rng.gen_range(0.0..extent)
    } else {
        0.0
    }
}

impl System for SpawnScheduler {
    fn name(&self) -> &'static str {
        "spawn"
    }

    fn update(&mut self, world: &mut World, dt: f32) {
        self.elapsed += dt;
        if self.elapsed < self.time_window {
            return;
        }
        self.elapsed = 0.0;

        let kind = self.choose_kind();
        self.launch(world, kind);

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.next_level(world);
        }
    }
}
