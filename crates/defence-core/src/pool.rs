//! Fixed-capacity entity pool.
//!
//! The pool owns the identities of every transient entity. All slots are
//! allocated up front with ids starting at
//! [`EntityHandles::FIRST_POOLED`](crate::entity::EntityHandles::FIRST_POOLED);
//! ids are never renumbered. Reuse is tracked by an in-use flag per slot and
//! an ordered free set, so [`EntityPool::acquire`] always hands out the
//! lowest free id.
//!
//! The pool never touches the [`ComponentStore`](crate::store::ComponentStore).
//! Clearing a released entity's components is the caller's job.
//!
//! # Example
//!
//! ```
//! use defence_core::entity::EntityId;
//! use defence_core::pool::EntityPool;
//!
//! let mut pool = EntityPool::new(2);
//! let a = pool.acquire();
//! let b = pool.acquire();
//! assert_eq!(a, Some(EntityId::new(2)));
//! assert_eq!(b, Some(EntityId::new(3)));
//! assert_eq!(pool.acquire(), None);
//!
//! pool.release(EntityId::new(2));
//! assert_eq!(pool.acquire(), Some(EntityId::new(2)));
//! ```

use std::collections::BTreeSet;

use tracing::trace;

use crate::entity::{EntityHandles, EntityId};

/// Pre-allocated, recyclable entity identities.
#[derive(Debug, Clone)]
pub struct EntityPool {
    first: u32,
    in_use: Vec<bool>,
    free: BTreeSet<usize>,
}

impl EntityPool {
    /// Creates a pool of `capacity` slots, all free.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            first: EntityHandles::FIRST_POOLED.as_u32(),
            in_use: vec![false; capacity],
            free: (0..capacity).collect(),
        }
    }

    /// Marks the lowest free slot used and returns its id.
    ///
    /// Returns `None` when every slot is in use. Callers skip the spawn.
    pub fn acquire(&mut self) -> Option<EntityId> {
        let slot = self.free.pop_first()?;
        self.in_use[slot] = true;
        Some(self.id_of(slot))
    }

    /// Marks `id` free again.
    ///
    /// Ids outside the pool and ids that are already free are ignored.
    pub fn release(&mut self, id: EntityId) {
        let Some(slot) = self.slot_of(id) else {
            trace!(entity = %id, "release ignored: id outside pool");
            return;
        };
        if !self.in_use[slot] {
            trace!(entity = %id, "release ignored: already free");
            return;
        }
        self.in_use[slot] = false;
        self.free.insert(slot);
    }

    /// Calls `f` on every id currently in use, lowest first.
    pub fn for_each_active(&self, mut f: impl FnMut(EntityId)) {
        for id in self.active() {
            f(id);
        }
    }

    /// Ids currently in use, lowest first.
    pub fn active(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.in_use
            .iter()
            .enumerate()
            .filter(|(_, used)| **used)
            .map(|(slot, _)| self.id_of(slot))
    }

    /// Returns `true` if `id` belongs to the pool and is in use.
    #[must_use]
    pub fn is_active(&self, id: EntityId) -> bool {
        self.slot_of(id).is_some_and(|slot| self.in_use[slot])
    }

    /// Returns `true` if `id` falls inside the pool's id range.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.slot_of(id).is_some()
    }

    /// Total number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.in_use.len()
    }

    /// Number of slots in use.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.capacity() - self.free.len()
    }

    /// Number of free slots.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    fn slot_of(&self, id: EntityId) -> Option<usize> {
        let offset = id.as_u32().checked_sub(self.first)? as usize;
        (offset < self.in_use.len()).then_some(offset)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn id_of(&self, slot: usize) -> EntityId {
        EntityId::new(self.first + slot as u32)
    }
}
