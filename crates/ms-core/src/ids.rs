//! Strongly typed identifier wrappers.
//!
//! Entities never hold references to each other, only these ids, resolved
//! through the owning arena in `ms-registry`.  A missing link is expressed as
//! `Option<Id>` rather than a `-1` sentinel.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Common interface of every typed id, used by generic arenas, vacancy
/// indices and the keyed draw phase.
pub trait EntityId: Copy + Ord + std::hash::Hash + fmt::Debug + Send + Sync + 'static {
    /// Raw integer value (also the arena slot index).
    fn raw(self) -> u32;

    /// Inverse of [`raw`](Self::raw).
    fn from_raw(raw: u32) -> Self;

    #[inline]
    fn index(self) -> usize {
        self.raw() as usize
    }
}

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
        #[serde(transparent)]
        $vis struct $name(pub $inner);

        impl EntityId for $name {
            #[inline(always)]
            fn raw(self) -> u32 {
                self.0 as u32
            }

            #[inline(always)]
            fn from_raw(raw: u32) -> Self {
                $name(raw as $inner)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }
    };
}

typed_id! {
    /// A resident of the region.
    pub struct PersonId(u32);
}

typed_id! {
    /// A household: the unit that occupies a dwelling.
    pub struct HouseholdId(u32);
}

typed_id! {
    /// A housing unit.
    pub struct DwellingId(u32);
}

typed_id! {
    /// A job slot in a zone.
    pub struct JobId(u32);
}

typed_id! {
    /// A traffic-analysis zone.
    pub struct ZoneId(u32);
}

typed_id! {
    /// A group of zones sharing housing-market statistics.
    pub struct RegionId(u16);
}
