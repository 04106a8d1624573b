//! Zones, regions and the zone-centroid spatial index.
//!
//! Geography is read-only to the simulation core.  Zones are lookup keys for
//! region-level market statistics; the R-tree (via `rstar`) answers
//! "nearest zone satisfying X" queries for the employment proximity
//! heuristic.

use std::collections::BTreeMap;

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use serde::{Deserialize, Serialize};

use ms_core::{MsError, MsResult, RegionId, ZoneId};

/// Projected planar coordinate in metres.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in metres.
    #[inline]
    pub fn distance(self, other: Coord) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id:                ZoneId,
    pub region:            RegionId,
    pub centroid:          Coord,
    /// Accessibility index supplied by the travel-time collaborator.
    pub accessibility:     f64,
    /// Land available for new residential construction at the base year.
    pub developable_acres: f64,
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct ZoneEntry {
    point: [f64; 2],
    id:    ZoneId,
}

impl RTreeObject for ZoneEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for ZoneEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Geography ─────────────────────────────────────────────────────────────────

pub struct Geography {
    zones:   BTreeMap<ZoneId, Zone>,
    regions: Vec<RegionId>,
    index:   RTree<ZoneEntry>,
}

impl Geography {
    /// Build from a zone list.  Duplicate ids and non-finite centroids are
    /// rejected.
    pub fn new(zones: Vec<Zone>) -> MsResult<Self> {
        let mut by_id = BTreeMap::new();
        for zone in zones {
            if !zone.centroid.x.is_finite() || !zone.centroid.y.is_finite() {
                return Err(MsError::Config(format!("{} has a non-finite centroid", zone.id)));
            }
            if zone.developable_acres < 0.0 {
                return Err(MsError::Config(format!("{} has negative developable land", zone.id)));
            }
            let id = zone.id;
            if by_id.insert(id, zone).is_some() {
                return Err(MsError::DuplicateId(id.to_string()));
            }
        }

        let mut regions: Vec<RegionId> = by_id.values().map(|z| z.region).collect();
        regions.sort_unstable();
        regions.dedup();

        let entries = by_id
            .values()
            .map(|z| ZoneEntry { point: [z.centroid.x, z.centroid.y], id: z.id })
            .collect();

        Ok(Self { zones: by_id, regions, index: RTree::bulk_load(entries) })
    }

    #[inline]
    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.get(&id)
    }

    #[inline]
    pub fn contains(&self, id: ZoneId) -> bool {
        self.zones.contains_key(&id)
    }

    pub fn region_of(&self, id: ZoneId) -> Option<RegionId> {
        self.zones.get(&id).map(|z| z.region)
    }

    /// All region ids, ascending.
    pub fn regions(&self) -> &[RegionId] {
        &self.regions
    }

    /// All zones, ascending by id.
    pub fn zones(&self) -> impl Iterator<Item = &Zone> + '_ {
        self.zones.values()
    }

    pub fn zones_in_region(&self, region: RegionId) -> impl Iterator<Item = &Zone> + '_ {
        self.zones.values().filter(move |z| z.region == region)
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    /// Accessibility of a zone; `0.0` for unknown zones.
    pub fn accessibility(&self, id: ZoneId) -> f64 {
        self.zones.get(&id).map_or(0.0, |z| z.accessibility)
    }

    /// Closest zone to `from` (itself included) for which `accept` holds.
    ///
    /// When `from` is unknown the lowest-id accepted zone is returned.
    pub fn nearest_zone_where(
        &self,
        from:       ZoneId,
        mut accept: impl FnMut(ZoneId) -> bool,
    ) -> Option<ZoneId> {
        match self.zones.get(&from) {
            Some(origin) => self
                .index
                .nearest_neighbor_iter(&[origin.centroid.x, origin.centroid.y])
                .map(|e| e.id)
                .find(|&z| accept(z)),
            None => self.zones.keys().copied().find(|&z| accept(z)),
        }
    }
}
