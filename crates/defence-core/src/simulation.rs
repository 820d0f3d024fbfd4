//! Frame orchestration.
//!
//! [`Simulation`] owns the [`World`] and one instance of every system and
//! runs them in the fixed frame order:
//!
//! 1. **INPUT**: held keys are turned into commands on the orbiter
//! 2. **MOVEMENT**: velocities are integrated
//! 3. **ROTATION**: orbit positions are derived
//! 4. **COLLISION**: colliders are synced, hits detected and resolved
//! 5. **SPAWN**: the scheduler spawns transients and advances levels
//! 6. **HEALTH**: a depleted base resets the whole game
//!
//! Drawing is a separate, read-only call ([`Simulation::render`]) so the
//! embedding loop decides when to present. Frame pacing stays outside too:
//! [`Simulation::step`] never sleeps.
//!
//! # Determinism
//!
//! Every random draw comes from the spawn scheduler's seeded RNG, so two
//! simulations built from the same config and fed the same deltas and keys
//! end in the same state and emit the same events.
//!
//! # Example
//!
//! ```
//! use defence_core::config::SimConfig;
//! use defence_core::platform::{FixedSurface, HeldKeys};
//! use defence_core::simulation::Simulation;
//!
//! let surface = FixedSurface::default();
//! let mut sim = Simulation::new(SimConfig::default(), &surface);
//!
//! for _ in 0..10 {
//!     sim.step(0.5, &HeldKeys::none(), &surface);
//! }
//!
//! assert_eq!(sim.level(), 1);
//! assert!(!sim.drain_events().is_empty());
//! ```

use tracing::{debug, info};

use crate::commands::{Command, InputBindings, OrbiterCommand};
use crate::config::SimConfig;
use crate::entity::Rotation;
use crate::error::ConfigError;
use crate::events::SimEvent;
use crate::platform::{KeyboardState, Surface};
use crate::render::{tint_base, Canvas, DebugOverlay, RenderSystem};
use crate::systems::collision::rescale_orbiter_collider;
use crate::systems::{
    CollisionSystem, HealthSystem, MovementSystem, RotationSystem, SpawnScheduler, System,
};
use crate::world::World;

// =============================================================================
// Simulation
// =============================================================================

/// The per-frame orchestrator.
#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    world: World,
    bindings: InputBindings,
    movement: MovementSystem,
    rotation: RotationSystem,
    collision: CollisionSystem,
    spawn: SpawnScheduler,
    health: HealthSystem,
    overlay: DebugOverlay,
}

impl Simulation {
    /// Builds the world for `surface` and every system from `config`.
    ///
    /// `config` is taken as given; use [`Simulation::from_json_str`] or
    /// [`SimConfig::validate`] to check it first.
    #[must_use]
    pub fn new(config: SimConfig, surface: &dyn Surface) -> Self {
        let world = World::new(&config, surface.size());
        let spawn = SpawnScheduler::new(&config.spawn, config.seed);
        let collision = CollisionSystem::new(&config);
        let bindings = InputBindings::arrows(&config.orbiter);
        info!(
            seed = config.seed,
            pool_capacity = config.pool_capacity,
            policy = ?config.collision_policy,
            "simulation created"
        );
        Self {
            config,
            world,
            bindings,
            movement: MovementSystem,
            rotation: RotationSystem,
            collision,
            spawn,
            health: HealthSystem,
            overlay: DebugOverlay::default(),
        }
    }

    /// Parses and validates a JSON config, then builds the simulation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the JSON is malformed or a value is out of
    /// range.
    pub fn from_json_str(json: &str, surface: &dyn Surface) -> Result<Self, ConfigError> {
        let config = SimConfig::from_json_str(json)?;
        Ok(Self::new(config, surface))
    }

    /// Runs one frame of `dt` seconds.
    pub fn step(&mut self, dt: f32, keyboard: &dyn KeyboardState, surface: &dyn Surface) {
        self.track_surface(surface);

        let orbiter = self.world.handles.orbiter;
        self.bindings
            .apply(keyboard.pressed(), &mut self.world.store, orbiter);

        self.movement.update(&mut self.world, dt);
        self.rotation.update(&mut self.world, dt);
        self.collision.update(&mut self.world, dt);
        self.spawn.update(&mut self.world, dt);

        if self.health.check(&mut self.world).is_some() {
            self.reset_game(surface);
        }
    }

    /// Draws the frame: tints the base, draws every visible entity and,
    /// with `debug`, outlines every collider.
    ///
    /// Returns how many entities were drawn.
    pub fn render(&mut self, canvas: &mut dyn Canvas, debug: bool) -> usize {
        tint_base(&mut self.world);
        let drawn = RenderSystem.render(&self.world.store, canvas);
        if debug {
            self.overlay.render_colliders(&self.world.store, canvas);
        }
        drawn
    }

    /// Puts the game back at its start.
    ///
    /// The base is centred on the current surface, the orbiter returns to its initial size, orbit and speed, every
    /// health is refilled, every transient is retired and the scheduler
    /// restarts on level one. The RNG keeps its stream.
    pub fn reset_game(&mut self, surface: &dyn Surface) {
        self.world.surface_size = surface.size();
        self.world.reset_base();
        self.world.reset_orbiter(self.config.orbiter.start_speed);
        HealthSystem::restore_all(&mut self.world.store);
        self.spawn.reset(&mut self.world);
        rescale_orbiter_collider(&mut self.world);

        info!("game reset");
        self.world.events.record(SimEvent::GameReset);
    }

    /// Executes `command` on the orbiter outside the key bindings.
    pub fn execute(&mut self, command: OrbiterCommand) {
        let orbiter = self.world.handles.orbiter;
        command.execute(&mut self.world.store, orbiter);
    }

    /// Restarts the spawn RNG from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.spawn.reseed(seed);
    }

    /// Takes every event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        self.world.events.drain()
    }

    fn track_surface(&mut self, surface: &dyn Surface) {
        let size = surface.size();
        if size == self.world.surface_size {
            return;
        }
        debug!(width = size.x, height = size.y, "surface resized");
        self.world.surface_size = size;
        self.world.reset_base();
        let orbiter = self.world.handles.orbiter;
        if let Some(geometry) = self.world.orbit_geometry() {
            if let Some(rotation) = self.world.store.get_mut::<Rotation>(orbiter) {
                geometry.apply(rotation);
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The configuration this simulation was built from.
    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The shared simulation context.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the simulation context.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The spawn scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &SpawnScheduler {
        &self.spawn
    }

    /// The collision system.
    #[must_use]
    pub fn collision(&self) -> &CollisionSystem {
        &self.collision
    }

    /// Current level, starting at one.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.spawn.level()
    }

    /// Seconds between spawns on the current level.
    #[must_use]
    pub fn time_window(&self) -> f32 {
        self.spawn.time_window()
    }

    /// Spawns left on the current level.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.spawn.remaining()
    }

    /// The active key bindings.
    #[must_use]
    pub fn bindings(&self) -> &InputBindings {
        &self.bindings
    }

    /// Mutable access to the key bindings.
    pub fn bindings_mut(&mut self) -> &mut InputBindings {
        &mut self.bindings
    }
}
