//! Type-erased component store.
//!
//! The [`ComponentStore`] owns every component instance in the simulation.
//! Storage is keyed by component kind: each kind registered through
//! [`ComponentStore::add`] gets its own [`SparseSet`], found through a
//! `TypeId` map. Entities hold no references of their own; the store maps
//! `(kind, entity)` to data.
//!
//! # Capability queries
//!
//! [`ComponentStore::query`] answers "which entities have every capability
//! in this set". A capability is either a component kind or a marker that
//! narrows a kind to one of its variants ([`BoxShaped`], [`CircleShaped`]).
//! Asking for [`Collider`](crate::entity::Collider) matches both shapes.
//!
//! Queries are evaluated fresh on every call. Results follow the storage
//! order of the first capability in the set, filtered by the rest.
//!
//! # In-use tracking
//!
//! Adding a component marks its entity in use. Deactivation clears the flag
//! explicitly; systems re-check it before acting on an id they obtained
//! earlier in the same frame.
//!
//! # Example
//!
//! ```
//! use defence_core::entity::{EntityId, Transform, Velocity};
//! use defence_core::store::ComponentStore;
//! use glam::Vec2;
//!
//! let mut store = ComponentStore::new();
//! let a = EntityId::new(2);
//! let b = EntityId::new(3);
//!
//! store.add(a, Transform::at(Vec2::ZERO));
//! store.add(a, Velocity::new(Vec2::X));
//! store.add(b, Transform::at(Vec2::ONE));
//!
//! let moving = store.query::<(Transform, Velocity)>();
//! assert_eq!(moving, vec![a]);
//! assert!(store.is_in_use(b));
//! ```

mod query;
mod sparse;

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use crate::entity::EntityId;

pub use query::{BoxShaped, Capability, CircleShaped, Query};
pub use sparse::SparseSet;

use sparse::ErasedStorage;

/// Marker for types that can be stored as components.
pub trait Component: Any + fmt::Debug {
    /// Human-readable kind name used in logs.
    const NAME: &'static str;
}

/// Owner of all component data, keyed by kind then entity.
#[derive(Default)]
pub struct ComponentStore {
    storages: HashMap<TypeId, Box<dyn ErasedStorage>>,
    in_use: Vec<bool>,
}

impl ComponentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Component access
    // =========================================================================

    /// Inserts or replaces the `T` component of `id` and marks `id` in use.
    ///
    /// Returns the replaced component, if any.
    pub fn add<T: Component>(&mut self, id: EntityId, component: T) -> Option<T> {
        self.set_in_use(id, true);
        self.storage_or_insert::<T>().insert(id, component)
    }

    /// Removes the `T` component of `id`. Absent components are a no-op.
    pub fn remove<T: Component>(&mut self, id: EntityId) -> Option<T> {
        self.storage_mut::<T>()?.remove(id)
    }

    /// Returns the `T` component of `id`.
    #[must_use]
    pub fn get<T: Component>(&self, id: EntityId) -> Option<&T> {
        self.storage::<T>()?.get(id)
    }

    /// Returns the `T` component of `id` mutably.
    #[must_use]
    pub fn get_mut<T: Component>(&mut self, id: EntityId) -> Option<&mut T> {
        self.storage_mut::<T>()?.get_mut(id)
    }

    /// Returns `true` if `id` has a `T` component.
    #[must_use]
    pub fn has<T: Component>(&self, id: EntityId) -> bool {
        self.storages
            .get(&TypeId::of::<T>())
            .is_some_and(|storage| storage.contains(id))
    }

    /// Removes every component of `id` across all kinds.
    ///
    /// Returns how many components were removed. The in-use flag is left
    /// untouched.
    pub fn clear_entity(&mut self, id: EntityId) -> usize {
        self.storages
            .values_mut()
            .filter_map(|storage| storage.remove_entity(id).then_some(()))
            .count()
    }

    fn storage<T: Component>(&self) -> Option<&SparseSet<T>> {
        self.storages
            .get(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any().downcast_ref::<SparseSet<T>>())
    }

    fn storage_mut<T: Component>(&mut self) -> Option<&mut SparseSet<T>> {
        self.storages
            .get_mut(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any_mut().downcast_mut::<SparseSet<T>>())
    }

    fn storage_or_insert<T: Component>(&mut self) -> &mut SparseSet<T> {
        let storage = self
            .storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(SparseSet::<T>::new()) as Box<dyn ErasedStorage>);
        // The entry for TypeId::of::<T>() only ever holds a SparseSet<T>.
        match storage.as_any_mut().downcast_mut::<SparseSet<T>>() {
            Some(set) => set,
            None => unreachable!("storage registered under the wrong TypeId"),
        }
    }

    /// Ids holding a `T` component in storage order; empty if unregistered.
    #[must_use]
    pub fn ids_of<T: Component>(&self) -> &[EntityId] {
        self.storages
            .get(&TypeId::of::<T>())
            .map_or(&[][..], |storage| storage.ids())
    }

    /// Number of registered component kinds.
    #[must_use]
    pub fn kind_count(&self) -> usize {
        self.storages.len()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Entities that currently have every capability in `Q`.
    ///
    /// `Q` is a tuple of one to four [`Capability`] types. An unregistered
    /// kind yields an empty result.
    #[must_use]
    pub fn query<Q: Query>(&self) -> Vec<EntityId> {
        Q::collect(self)
    }

    // =========================================================================
    // In-use flags
    // =========================================================================

    /// Returns `true` if `id` is currently active.
    #[must_use]
    pub fn is_in_use(&self, id: EntityId) -> bool {
        self.in_use.get(id.index()).copied().unwrap_or(false)
    }

    /// Sets the in-use flag of `id`.
    pub fn set_in_use(&mut self, id: EntityId, in_use: bool) {
        let slot = id.index();
        if slot >= self.in_use.len() {
            if !in_use {
                return;
            }
            self.in_use.resize(slot + 1, false);
        }
        self.in_use[slot] = in_use;
    }
}

impl fmt::Debug for ComponentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self
            .storages
            .values()
            .map(|storage| (storage.name(), storage.len()))
            .collect();
        kinds.sort_unstable();
        f.debug_struct("ComponentStore")
            .field("kinds", &kinds)
            .field("in_use", &self.in_use.iter().filter(|flag| **flag).count())
            .finish()
    }
}
