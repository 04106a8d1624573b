//! `VacancyIndex` — vacant dwellings or jobs grouped by zone.
//!
//! Relocation and job search read this index, and it is updated the moment a
//! unit is occupied or vacated, so later searches in the same year see the
//! current availability.  `BTreeMap`/`BTreeSet` keep iteration order stable
//! across runs.

use std::collections::{BTreeMap, BTreeSet};

use ms_core::{EntityId, ZoneId};

#[derive(Clone, Debug)]
pub struct VacancyIndex<I: EntityId> {
    by_zone: BTreeMap<ZoneId, BTreeSet<I>>,
    total:   usize,
}

impl<I: EntityId> Default for VacancyIndex<I> {
    fn default() -> Self {
        Self { by_zone: BTreeMap::new(), total: 0 }
    }
}

impl<I: EntityId> VacancyIndex<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// List `id` as vacant in `zone`.  Returns `false` if it already was.
    pub(crate) fn insert(&mut self, zone: ZoneId, id: I) -> bool {
        let added = self.by_zone.entry(zone).or_default().insert(id);
        if added {
            self.total += 1;
        }
        added
    }

    /// Unlist `id`.  Returns `false` if it was not listed.
    pub(crate) fn remove(&mut self, zone: ZoneId, id: I) -> bool {
        let Some(set) = self.by_zone.get_mut(&zone) else {
            return false;
        };
        let removed = set.remove(&id);
        if removed {
            self.total -= 1;
            if set.is_empty() {
                self.by_zone.remove(&zone);
            }
        }
        removed
    }

    pub fn contains(&self, zone: ZoneId, id: I) -> bool {
        self.by_zone.get(&zone).is_some_and(|s| s.contains(&id))
    }

    /// Vacant ids in one zone, ascending.
    pub fn in_zone(&self, zone: ZoneId) -> impl Iterator<Item = I> + '_ {
        self.by_zone.get(&zone).into_iter().flat_map(|s| s.iter().copied())
    }

    pub fn count_in_zone(&self, zone: ZoneId) -> usize {
        self.by_zone.get(&zone).map_or(0, BTreeSet::len)
    }

    /// All vacant ids, ordered by zone then id.
    pub fn iter(&self) -> impl Iterator<Item = I> + '_ {
        self.by_zone.values().flat_map(|s| s.iter().copied())
    }

    /// Zones with at least one vacancy, ascending.
    pub fn zones(&self) -> impl Iterator<Item = ZoneId> + '_ {
        self.by_zone.keys().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.total
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
