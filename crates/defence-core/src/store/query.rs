//! Capability sets and the queries built from them.

use crate::entity::{Collider, EntityId};

use super::{Component, ComponentStore};

/// Something an entity can have.
///
/// Every [`Component`] is a capability. Marker types narrow a component
/// kind to one of its variants.
pub trait Capability {
    /// Ids worth checking, in storage order.
    fn candidates(store: &ComponentStore) -> &[EntityId];

    /// Returns `true` if `id` has this capability right now.
    fn matches(store: &ComponentStore, id: EntityId) -> bool;
}

impl<T: Component> Capability for T {
    fn candidates(store: &ComponentStore) -> &[EntityId] {
        store.ids_of::<T>()
    }

    fn matches(store: &ComponentStore, id: EntityId) -> bool {
        store.has::<T>(id)
    }
}

/// Entities whose [`Collider`] is a box.
#[derive(Debug, Clone, Copy)]
pub struct BoxShaped;

impl Capability for BoxShaped {
    fn candidates(store: &ComponentStore) -> &[EntityId] {
        store.ids_of::<Collider>()
    }

    fn matches(store: &ComponentStore, id: EntityId) -> bool {
        store.get::<Collider>(id).is_some_and(Collider::is_box)
    }
}

/// Entities whose [`Collider`] is a circle.
#[derive(Debug, Clone, Copy)]
pub struct CircleShaped;

impl Capability for CircleShaped {
    fn candidates(store: &ComponentStore) -> &[EntityId] {
        store.ids_of::<Collider>()
    }

    fn matches(store: &ComponentStore, id: EntityId) -> bool {
        store.get::<Collider>(id).is_some_and(Collider::is_circle)
    }
}

/// A set of capabilities, expressed as a tuple.
pub trait Query {
    /// Entities holding every capability in the set.
    fn collect(store: &ComponentStore) -> Vec<EntityId>;
}

macro_rules! impl_query {
    ($first:ident $(, $rest:ident)*) => {
        impl<$first: Capability $(, $rest: Capability)*> Query for ($first, $($rest,)*) {
            fn collect(store: &ComponentStore) -> Vec<EntityId> {
                $first::candidates(store)
                    .iter()
                    .copied()
                    .filter(|&id| $first::matches(store, id) $(&& $rest::matches(store, id))*)
                    .collect()
            }
        }
    };
}

impl_query!(A);
impl_query!(A, B);
impl_query!(A, B, C);
impl_query!(A, B, C, D);
