//! Collider sync, pairwise detection and hit resolution.
//!
//! The system runs in two phases every frame.
//!
//! # Sync phase
//!
//! Colliders are moved to their entity's [`Transform`]. The two shapes use
//! different anchors: a box's top-left corner sits on the transform
//! position, a circle's centre sits one radius right of and below it.
//!
//! # Detection phase
//!
//! Three passes cover every pairing of shapes: box/box, box/circle and
//! circle/circle. Within a pass each active entity `e1` of the first set is
//! tested against every other active entity `e2` of the second set, in
//! storage order; the first hit is resolved and the scan moves on to the
//! next `e1`.
//!
//! [`CollisionPolicy`] decides whether an entity resolved in one pass may be
//! resolved again in a later pass of the same frame.
//!
//! # Resolution
//!
//! Both sides of a hit are evaluated independently, first `e1` acting on
//! `e2`, then `e2` acting on `e1`. Only mobile transients act:
//!
//! | Acting side | Other side | Effect |
//! |-------------|------------|--------|
//! | projectile | has [`Health`] | 1 damage, projectile retired |
//! | projectile | anything else | projectile retired |
//! | speed power-up | orbiter | orbit speed up, power-up retired |
//! | size power-up | orbiter | orbiter grows, power-up retired |
//! | power-up | anything else | power-up retired |

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::commands::{Command, IncreaseSpeed};
use crate::config::SimConfig;
use crate::entity::{
    BoxCollider, CircleCollider, Collider, EntityId, EntityKind, Health, Renderable, Rotation,
    Transform, Velocity,
};
use crate::events::SimEvent;
use crate::store::{BoxShaped, CircleShaped};
use crate::world::World;

use super::health::apply_damage;
use super::System;

/// How often one entity may be resolved per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// At most one partner per entity per pass; up to three per frame.
    #[default]
    PerPass,
    /// At most one resolved collision per entity per frame.
    OncePerFrame,
}

// =============================================================================
// Intersection tests
// =============================================================================

/// Axis-aligned overlap with positive area.
#[must_use]
pub fn box_box(a: &BoxCollider, b: &BoxCollider) -> bool {
    a.bounds.intersects(&b.bounds)
}

/// Closest point of the box to the circle centre lies within the radius.
#[must_use]
pub fn box_circle(rect: &BoxCollider, circle: &CircleCollider) -> bool {
    let closest = rect.bounds.clamp_point(circle.center);
    closest.distance_squared(circle.center) <= circle.radius * circle.radius
}

/// Centre distance no greater than the sum of the radii.
#[must_use]
pub fn circle_circle(a: &CircleCollider, b: &CircleCollider) -> bool {
    let reach = a.radius + b.radius;
    a.center.distance_squared(b.center) <= reach * reach
}

/// Tests any two colliders. The result does not depend on argument order.
///
/// # Example
///
/// ```
/// use defence_core::entity::{BoxCollider, CircleCollider, Collider};
/// use defence_core::systems::collision::intersects;
/// use glam::Vec2;
///
/// let boxed = Collider::Box(BoxCollider::new(0.0, 0.0, 10.0, 10.0));
/// let circle = Collider::Circle(CircleCollider::new(Vec2::new(14.0, 5.0), 5.0));
/// assert!(intersects(&boxed, &circle));
/// assert!(intersects(&circle, &boxed));
/// ```
#[must_use]
pub fn intersects(a: &Collider, b: &Collider) -> bool {
    match (a, b) {
        (Collider::Box(a), Collider::Box(b)) => box_box(a, b),
        (Collider::Box(rect), Collider::Circle(circle))
        | (Collider::Circle(circle), Collider::Box(rect)) => box_circle(rect, circle),
        (Collider::Circle(a), Collider::Circle(b)) => circle_circle(a, b),
    }
}

// =============================================================================
// Orbiter rescale
// =============================================================================

/// Fits the orbiter's collider to its shape's current global bounds.
///
/// A box takes the bounds outright; a circle takes half the larger side as
/// radius and the middle of the bounds as centre.
pub fn rescale_orbiter_collider(world: &mut World) {
    let orbiter = world.handles.orbiter;
    let Some(position) = world.store.get::<Transform>(orbiter).map(|t| t.position) else {
        return;
    };
    let Some(bounds) = world
        .store
        .get::<Renderable>(orbiter)
        .and_then(Renderable::as_shape)
        .map(|shape| shape.global_bounds(position))
    else {
        return;
    };
    match world.store.get_mut::<Collider>(orbiter) {
        Some(Collider::Box(collider)) => collider.bounds = bounds,
        Some(Collider::Circle(collider)) => {
            collider.radius = bounds.width.max(bounds.height) / 2.0;
            collider.center = glam::Vec2::new(
                bounds.left + bounds.width / 2.0,
                bounds.top + bounds.height / 2.0,
            );
        }
        None => {}
    }
}

// =============================================================================
// System
// =============================================================================

/// What a colliding entity does to the other side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Projectile,
    PowerUp(EntityKind),
    Inert,
}

/// Detects and resolves collisions.
#[derive(Debug, Clone)]
pub struct CollisionSystem {
    policy: CollisionPolicy,
    speed_step: f32,
    size_multiplier: f32,
}

impl Default for CollisionSystem {
    fn default() -> Self {
        Self::new(&SimConfig::default())
    }
}

impl CollisionSystem {
    /// Creates a system using the configured policy and power-up strengths.
    #[must_use]
    pub fn new(config: &SimConfig) -> Self {
        Self {
            policy: config.collision_policy,
            speed_step: config.orbiter.speed_step,
            size_multiplier: config.orbiter.size_multiplier,
        }
    }

    /// Replaces the resolution policy.
    #[must_use]
    pub fn with_policy(mut self, policy: CollisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The active resolution policy.
    #[must_use]
    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// Moves every collider to its entity's transform.
    pub fn sync_colliders(world: &mut World) {
        for id in world.store.query::<(Collider, Transform)>() {
            if !world.is_active(id) {
                continue;
            }
            let Some(position) = world.store.get::<Transform>(id).map(|t| t.position) else {
                trace!(entity = %id, "collider sync skipped: no transform");
                continue;
            };
            match world.store.get_mut::<Collider>(id) {
                Some(Collider::Box(collider)) => {
                    collider.bounds.left = position.x;
                    collider.bounds.top = position.y;
                }
                Some(Collider::Circle(collider)) => {
                    collider.center = position + collider.radius;
                }
                None => trace!(entity = %id, "collider sync skipped: no collider"),
            }
        }
    }

    /// Runs the three detection passes and returns how many hits were
    /// resolved.
    pub fn detect(&self, world: &mut World) -> usize {
        let boxes = world.store.query::<(BoxShaped, Transform)>();
        let circles = world.store.query::<(CircleShaped, Transform)>();
        let mut resolved = BTreeSet::new();

        self.run_pass(world, &boxes, &boxes, &mut resolved)
            + self.run_pass(world, &boxes, &circles, &mut resolved)
            + self.run_pass(world, &circles, &circles, &mut resolved)
    }

    fn run_pass(
        &self,
        world: &mut World,
        first: &[EntityId],
        second: &[EntityId],
        resolved: &mut BTreeSet<EntityId>,
    ) -> usize {
        let once = self.policy == CollisionPolicy::OncePerFrame;
        let mut hits = 0;

        for &e1 in first {
            if !world.is_active(e1) || (once && resolved.contains(&e1)) {
                continue;
            }
            let Some(c1) = world.store.get::<Collider>(e1).copied() else {
                trace!(entity = %e1, "collision skipped: no collider");
                continue;
            };
            for &e2 in second {
                if e1 == e2 || !world.is_active(e2) || (once && resolved.contains(&e2)) {
                    continue;
                }
                let Some(c2) = world.store.get::<Collider>(e2).copied() else {
                    continue;
                };
                if intersects(&c1, &c2) {
                    self.handle_collision(world, e1, e2);
                    if once {
                        resolved.insert(e1);
                        resolved.insert(e2);
                    }
                    hits += 1;
                    break;
                }
            }
        }
        hits
    }

    /// Applies the effects of `e1` and `e2` touching.
    ///
    /// Roles are read before either side acts, so a side retired by the
    /// first evaluation still has its own effect evaluated second.
    pub fn handle_collision(&self, world: &mut World, e1: EntityId, e2: EntityId) {
        let r1 = role_of(world, e1);
        let r2 = role_of(world, e2);
        self.act(world, e1, r1, e2);
        self.act(world, e2, r2, e1);
    }

    fn act(&self, world: &mut World, actor: EntityId, role: Role, other: EntityId) {
        match role {
            Role::Inert => return,
            Role::Projectile => {
                if world.store.has::<Health>(other) {
                    let health = apply_damage(&mut world.store, other, 1).unwrap_or_default();
                    debug!(projectile = %actor, target = %other, health, "projectile hit");
                    world.events.record(SimEvent::ProjectileHit {
                        projectile: actor,
                        target: other,
                        health,
                    });
                } else {
                    debug!(projectile = %actor, blocker = %other, "projectile blocked");
                    world.events.record(SimEvent::ProjectileBlocked {
                        projectile: actor,
                        blocker: other,
                    });
                }
            }
            Role::PowerUp(kind) => {
                if other == world.handles.orbiter {
                    match kind {
                        EntityKind::SizePowerUp => self.grow_orbiter(world),
                        _ => IncreaseSpeed {
                            step: self.speed_step,
                        }
                        .execute(&mut world.store, other),
                    }
                    debug!(power_up = %actor, %kind, collector = %other, "power-up collected");
                    world.events.record(SimEvent::PowerUpCollected {
                        power_up: actor,
                        kind,
                        collector: other,
                    });
                } else {
                    debug!(power_up = %actor, %kind, "power-up wasted");
                    world.events.record(SimEvent::PowerUpWasted {
                        power_up: actor,
                        kind,
                    });
                }
            }
        }
        world.deactivate(actor);
    }

    /// Scales the orbiter's shape, then refits its collider and orbit.
    fn grow_orbiter(&self, world: &mut World) {
        let orbiter = world.handles.orbiter;
        if let Some(shape) = world
            .store
            .get_mut::<Renderable>(orbiter)
            .and_then(Renderable::as_shape_mut)
        {
            shape.scale *= self.size_multiplier;
        }
        rescale_orbiter_collider(world);
        if let Some(geometry) = world.orbit_geometry() {
            if let Some(rotation) = world.store.get_mut::<Rotation>(orbiter) {
                geometry.apply(rotation);
            }
        }
    }
}

fn role_of(world: &World, id: EntityId) -> Role {
    if !world.store.has::<Velocity>(id) {
        return Role::Inert;
    }
    match world.store.get::<EntityKind>(id) {
        Some(EntityKind::Projectile) => Role::Projectile,
        Some(kind @ (EntityKind::SpeedPowerUp | EntityKind::SizePowerUp)) => Role::PowerUp(*kind),
        _ => Role::Inert,
    }
}

impl System for CollisionSystem {
    fn name(&self) -> &'static str {
        "collision"
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        Self::sync_colliders(world);
        self.detect(world);
    }
}
