//! Slot arena keyed by typed id.
//!
//! An `Arena<I, T>` is a `Vec<Option<T>>` indexed by `id.index()`.  Removal
//! leaves a hole; what happens to the freed id depends on the arena's
//! [`IdPolicy`].  Iteration is always in ascending id order, which keeps
//! every model's agent sequence deterministic.

use std::collections::BTreeSet;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use ms_core::{EntityId, MsError, MsResult};

/// How an arena hands out ids for new entities.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    /// Next id = highest id ever allocated + 1.  Freed ids are never reused.
    #[default]
    Monotonic,
    /// The lowest freed id is reused first; otherwise highest + 1.
    Recycle,
}

pub struct Arena<I: EntityId, T> {
    slots:  Vec<Option<T>>,
    live:   usize,
    free:   BTreeSet<u32>,
    policy: IdPolicy,
    _id:    PhantomData<I>,
}

impl<I: EntityId, T> Arena<I, T> {
    pub fn new(policy: IdPolicy) -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
            free: BTreeSet::new(),
            policy,
            _id: PhantomData,
        }
    }

    pub fn policy(&self) -> IdPolicy {
        self.policy
    }

    /// The id the next [`insert_with`](Self::insert_with) will use.
    pub fn next_id(&self) -> I {
        match (self.policy, self.free.first()) {
            (IdPolicy::Recycle, Some(&raw)) => I::from_raw(raw),
            _ => I::from_raw(self.slots.len() as u32),
        }
    }

    /// Allocate an id and store the value built from it.
    pub fn insert_with(&mut self, make: impl FnOnce(I) -> T) -> I {
        let id = self.next_id();
        let idx = id.index();
        if idx == self.slots.len() {
            self.slots.push(Some(make(id)));
        } else {
            self.free.remove(&id.raw());
            self.slots[idx] = Some(make(id));
        }
        self.live += 1;
        id
    }

    /// Store a value under an externally chosen id (initial population load).
    pub fn insert_at(&mut self, id: I, value: T) -> MsResult<()> {
        let idx = id.index();
        if idx >= self.slots.len() {
            for hole in self.slots.len()..idx {
                self.free.insert(hole as u32);
            }
            self.slots.resize_with(idx + 1, || None);
        } else if self.slots[idx].is_some() {
            return Err(MsError::DuplicateId(format!("{id:?}")));
        }
        self.free.remove(&id.raw());
        self.slots[idx] = Some(value);
        self.live += 1;
        Ok(())
    }

    pub fn remove(&mut self, id: I) -> Option<T> {
        let value = self.slots.get_mut(id.index())?.take()?;
        self.live -= 1;
        if self.policy == IdPolicy::Recycle {
            self.free.insert(id.raw());
        }
        Some(value)
    }

    #[inline]
    pub fn get(&self, id: I) -> Option<&T> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    #[inline]
    pub fn get_mut(&mut self, id: I) -> Option<&mut T> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    #[inline]
    pub fn contains(&self, id: I) -> bool {
        self.get(id).is_some()
    }

    /// Number of live entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Live `(id, value)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|v| (I::from_raw(i as u32), v)))
    }

    /// Live values in ascending id order.
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots.iter().filter_map(Option::as_ref)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }

    /// Snapshot of live ids.  Models iterate a snapshot so they can mutate
    /// the arena while walking it.
    pub fn ids(&self) -> Vec<I> {
        self.iter().map(|(id, _)| id).collect()
    }
}
