//! Per-kind sparse-set storage.
//!
//! Each component kind lives in its own [`SparseSet`]: a sparse index from
//! entity slot to dense position, plus parallel dense arrays of values and
//! owning ids. Lookup is O(1), removal is O(1) via `swap_remove`, and
//! iteration walks contiguous memory in insertion order (modulo the swaps
//! done by removal).

use std::any::Any;

use crate::entity::EntityId;

use super::Component;

/// Dense storage for one component kind.
#[derive(Debug, Clone)]
pub struct SparseSet<T> {
    sparse: Vec<Option<usize>>,
    dense: Vec<T>,
    ids: Vec<EntityId>,
}

impl<T> Default for SparseSet<T> {
    fn default() -> Self {
        Self {
            sparse: Vec::new(),
            dense: Vec::new(),
            ids: Vec::new(),
        }
    }
}

impl<T> SparseSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the value for `id`, returning the previous one.
    pub fn insert(&mut self, id: EntityId, value: T) -> Option<T> {
        let slot = id.index();
        if slot >= self.sparse.len() {
            self.sparse.resize(slot + 1, None);
        }
        if let Some(dense) = self.sparse[slot] {
            return Some(std::mem::replace(&mut self.dense[dense], value));
        }
        self.sparse[slot] = Some(self.dense.len());
        self.dense.push(value);
        self.ids.push(id);
        None
    }

    /// Removes the value for `id`, if present.
    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        let dense = self.sparse.get_mut(id.index())?.take()?;
        let value = self.dense.swap_remove(dense);
        self.ids.swap_remove(dense);
        if let Some(&moved) = self.ids.get(dense) {
            self.sparse[moved.index()] = Some(dense);
        }
        Some(value)
    }

    /// Returns the value for `id`.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&T> {
        let dense = (*self.sparse.get(id.index())?)?;
        self.dense.get(dense)
    }

    /// Returns the value for `id` mutably.
    #[must_use]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        let dense = (*self.sparse.get(id.index())?)?;
        self.dense.get_mut(dense)
    }

    /// Returns `true` if `id` has a value here.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        matches!(self.sparse.get(id.index()), Some(Some(_)))
    }

    /// Owning ids in storage order.
    #[must_use]
    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    /// Iterates `(id, value)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.ids.iter().copied().zip(self.dense.iter())
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }
}

/// Object-safe view of a [`SparseSet`] with its value type erased.
pub(crate) trait ErasedStorage {
    fn name(&self) -> &'static str;
    fn len(&self) -> usize;
    fn contains(&self, id: EntityId) -> bool;
    fn remove_entity(&mut self, id: EntityId) -> bool;
    fn ids(&self) -> &[EntityId];
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedStorage for SparseSet<T> {
    fn name(&self) -> &'static str {
        T::NAME
    }

    fn len(&self) -> usize {
        SparseSet::len(self)
    }

    fn contains(&self, id: EntityId) -> bool {
        SparseSet::contains(self, id)
    }

    fn remove_entity(&mut self, id: EntityId) -> bool {
        self.remove(id).is_some()
    }

    fn ids(&self) -> &[EntityId] {
        SparseSet::ids(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
