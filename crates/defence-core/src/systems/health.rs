//! Damage and the terminal health check.
//!
//! Damage is subtracted without a floor, so health can dip below zero until
//! the check at the end of the same frame. The check scans every entity
//! with [`Health`] in storage order and reports the first one that has run
//! out; the [`Simulation`](crate::simulation::Simulation) answers with a
//! full game reset.

use tracing::{debug, info};

use crate::entity::{EntityId, Health};
use crate::events::SimEvent;
use crate::store::ComponentStore;
use crate::world::World;

/// Subtracts `amount` from the health of `target`.
///
/// Returns the health left, or `None` if `target` has no [`Health`].
///
/// # Example
///
/// ```
/// use defence_core::entity::{EntityId, Health};
/// use defence_core::store::ComponentStore;
/// use defence_core::systems::health::apply_damage;
///
/// let mut store = ComponentStore::new();
/// let base = EntityId::new(1);
/// store.add(base, Health::new(1));
/// assert_eq!(apply_damage(&mut store, base, 2), Some(-1));
/// assert_eq!(apply_damage(&mut store, EntityId::new(9), 1), None);
/// ```
pub fn apply_damage(store: &mut ComponentStore, target: EntityId, amount: i32) -> Option<i32> {
    let health = store.get_mut::<Health>(target)?;
    health.current -= amount;
    debug!(entity = %target, amount, health = health.current, "damage applied");
    Some(health.current)
}

/// Detects depleted health.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthSystem;

impl HealthSystem {
    /// Returns the first active entity whose health has run out.
    ///
    /// Records [`SimEvent::BaseDepleted`] for it. The scan stops at the
    /// first depleted entity.
    pub fn check(&self, world: &mut World) -> Option<EntityId> {
        let depleted = world
            .store
            .query::<(Health,)>()
            .into_iter()
            .filter(|&id| world.is_active(id))
            .find(|&id| world.store.get::<Health>(id).is_some_and(Health::is_depleted))?;

        info!(entity = %depleted, "health depleted");
        world.events.record(SimEvent::BaseDepleted { entity: depleted });
        Some(depleted)
    }

    /// Restores every entity's health to its maximum.
    pub fn restore_all(store: &mut ComponentStore) {
        for id in store.query::<(Health,)>() {
            if let Some(health) = store.get_mut::<Health>(id) {
                health.restore();
            }
        }
    }
}
