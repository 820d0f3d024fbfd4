//! End-to-end scenarios through the full frame pipeline.
//!
//! These drive [`Simulation::step`](crate::simulation::Simulation::step)
//! and check the observable outcome:
//! - Base damage, tinting and the game reset
//! - Level progression of the spawn scheduler
//! - Size power-up pickup
//! - Both collision policies

use glam::Vec2;

use crate::commands::OrbiterCommand;
use crate::config::SimConfig;
use crate::entity::{Collider, Color, EntityKind, Renderable, Transform, Velocity};
use crate::events::SimEvent;
use crate::platform::FixedSurface;
use crate::simulation::Simulation;
use crate::systems::CollisionPolicy;

use super::helpers::{
    base_fill, base_health, default_sim, idle_step, orbiter_position, orbiter_rotation,
    place_transient, projectile_at_base, sim_with, DrawCall, RecordingCanvas,
};

// =============================================================================
// Base damage and reset
// =============================================================================

#[test]
fn three_hits_leave_base_red() {
    let mut sim = default_sim();
    for expected in [3, 2, 1] {
        let projectile = projectile_at_base(sim.world_mut());
        idle_step(&mut sim, 0.0);
        assert!(!sim.world().is_active(projectile));
        assert_eq!(base_health(sim.world()), expected);
    }

    let mut canvas = RecordingCanvas::default();
    sim.render(&mut canvas, false);
    assert_eq!(base_fill(sim.world()), Some(Color::RED));
    assert!(canvas
        .calls
        .iter()
        .any(|call| matches!(call, DrawCall::Shape(shape, at) if shape.fill == Color::RED && *at == Vec2::splat(300.0))));
}

#[test]
fn fourth_hit_resets_the_game() {
    let mut sim = default_sim();
    for _ in 0..3 {
        projectile_at_base(sim.world_mut());
        idle_step(&mut sim, 0.0);
    }
    sim.execute(OrbiterCommand::IncreaseSpeed { step: 50.0 });
    idle_step(&mut sim, 1.0);
    assert!(orbiter_rotation(sim.world()).angle > 0.0);
    sim.drain_events();

    projectile_at_base(sim.world_mut());
    idle_step(&mut sim, 0.0);

    let rotation = orbiter_rotation(sim.world());
    assert_eq!(rotation.angle, 0.0);
    assert_eq!(rotation.speed, 80.0);
    assert!(rotation.clockwise);
    assert_eq!(base_health(sim.world()), 4);
    assert_eq!(sim.world().pool.active_count(), 0);
    assert_eq!(sim.level(), 1);
    assert_eq!(sim.scheduler().elapsed(), 0.0);

    let events = sim.drain_events();
    let base = sim.world().handles.base;
    assert!(events.contains(&SimEvent::BaseDepleted { entity: base }));
    assert_eq!(events.last(), Some(&SimEvent::GameReset));

    let mut canvas = RecordingCanvas::default();
    sim.render(&mut canvas, false);
    assert_eq!(base_fill(sim.world()), Some(Color::WHITE));
}

// =============================================================================
// Spawn levels
// =============================================================================

#[test]
fn one_second_window_reaches_level_two() {
    let mut config = SimConfig::default();
    config.spawn.initial_time_window = 1.0;
    // Enough health to absorb every projectile that reaches the base.
    config.base.max_health = 100;
    let mut sim = sim_with(config);

    for _ in 0..9 {
        idle_step(&mut sim, 1.0);
    }
    assert_eq!(sim.level(), 1);
    assert_eq!(sim.remaining(), 1);

    idle_step(&mut sim, 1.0);
    assert_eq!(sim.level(), 2);
    assert!((sim.time_window() - 0.9).abs() < 1e-6);
    assert_eq!(sim.remaining(), 11);

    let events = sim.drain_events();
    let spawned = events
        .iter()
        .filter(|event| matches!(event, SimEvent::Spawned { .. }))
        .count();
    let power_ups = events
        .iter()
        .filter(|event| matches!(event, SimEvent::Spawned { kind, .. } if kind.is_power_up()))
        .count();
    assert_eq!(spawned, 10);
    assert_eq!(power_ups, 1);
    assert!(events
        .iter()
        .any(|event| matches!(event, SimEvent::LevelAdvanced { level: 2, total: 11, .. })));
}

#[test]
fn spawns_head_for_the_centre() {
    let mut sim = default_sim();
    idle_step(&mut sim, 4.0);

    let world = sim.world();
    let id = world.pool.active().next().expect("one transient spawned");
    let position = world
        .store
        .get::<Transform>(id)
        .map(|t| t.position)
        .unwrap_or_default();
    let velocity = world
        .store
        .get::<Velocity>(id)
        .map(|v| v.linear)
        .unwrap_or_default();

    let on_edge = position.x == 0.0 || position.y == 0.0 || position.x == 800.0 || position.y == 800.0;
    assert!(on_edge);
    let aim = (Vec2::splat(400.0) - position).normalize();
    assert!((velocity.normalize() - aim).length() < 1e-4);
}

// =============================================================================
// Power-ups
// =============================================================================

#[test]
fn size_pickup_refits_collider_to_shape() {
    let mut sim = default_sim();
    let at = orbiter_position(sim.world()) + Vec2::splat(5.0);
    let power_up = place_transient(sim.world_mut(), EntityKind::SizePowerUp, at);
    idle_step(&mut sim, 0.0);

    let world = sim.world();
    let orbiter = world.handles.orbiter;
    assert!(!world.is_active(power_up));

    let shape = world
        .store
        .get::<Renderable>(orbiter)
        .and_then(Renderable::as_shape)
        .copied()
        .expect("orbiter keeps its shape");
    assert_eq!(shape.scale, Vec2::splat(1.5));

    let bounds = world
        .store
        .get::<Collider>(orbiter)
        .and_then(Collider::as_box)
        .map(|collider| collider.bounds)
        .expect("orbiter keeps a box collider");
    let global = shape.global_bounds(orbiter_position(world));
    assert_eq!(bounds.width, global.width);
    assert_eq!(bounds.height, global.height);
    assert_eq!(bounds.width, 30.0);

    let rotation = orbiter_rotation(world);
    assert_eq!(rotation.min_radius, 115.0);
    assert_eq!(rotation.center, Vec2::splat(385.0));

    // The next frame moves the grown orbiter onto the new centre.
    idle_step(&mut sim, 0.0);
    assert_eq!(orbiter_position(sim.world()), Vec2::new(585.0, 385.0));
}

#[test]
fn speed_pickup_speeds_up_the_orbiter() {
    let mut sim = default_sim();
    let at = orbiter_position(sim.world()) + Vec2::splat(5.0);
    place_transient(sim.world_mut(), EntityKind::SpeedPowerUp, at);
    idle_step(&mut sim, 0.0);

    assert_eq!(orbiter_rotation(sim.world()).speed, 130.0);
    let events = sim.drain_events();
    assert!(events
        .iter()
        .any(|event| matches!(event, SimEvent::PowerUpCollected { kind: EntityKind::SpeedPowerUp, .. })));
}

// =============================================================================
// Collision policies
// =============================================================================

fn double_hit(policy: CollisionPolicy) -> Simulation {
    let mut config = SimConfig::default();
    config.collision_policy = policy;
    let mut sim = sim_with(config);
    place_transient(sim.world_mut(), EntityKind::Projectile, Vec2::new(350.0, 395.0));
    place_transient(sim.world_mut(), EntityKind::Projectile, Vec2::new(440.0, 395.0));
    sim
}

#[test]
fn per_pass_policy_takes_both_hits_at_once() {
    let mut sim = double_hit(CollisionPolicy::PerPass);
    assert_eq!(sim.collision().policy(), CollisionPolicy::PerPass);
    idle_step(&mut sim, 0.0);
    assert_eq!(base_health(sim.world()), 2);
    assert_eq!(sim.world().pool.active_count(), 0);
}

#[test]
fn once_per_frame_policy_defers_second_hit() {
    let mut sim = double_hit(CollisionPolicy::OncePerFrame);
    assert_eq!(sim.collision().policy(), CollisionPolicy::OncePerFrame);
    idle_step(&mut sim, 0.0);
    assert_eq!(base_health(sim.world()), 3);
    assert_eq!(sim.world().pool.active_count(), 1);

    idle_step(&mut sim, 0.0);
    assert_eq!(base_health(sim.world()), 2);
    assert_eq!(sim.world().pool.active_count(), 0);
}

#[test]
fn policy_loads_from_json() {
    let sim = Simulation::from_json_str(
        r#"{"collision_policy": "once_per_frame"}"#,
        &FixedSurface::default(),
    )
    .unwrap();
    assert_eq!(sim.collision().policy(), CollisionPolicy::OncePerFrame);
}
