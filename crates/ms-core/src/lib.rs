//! `ms-core` — foundational types for the urban land-use microsimulation.
//!
//! Every other `ms-*` crate depends on this one.  It has no `ms-*`
//! dependencies and only three external ones (`rand`, `serde`, `thiserror`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                         |
//! |-------------|------------------------------------------------------------------|
//! | [`ids`]     | `PersonId`, `HouseholdId`, `DwellingId`, `JobId`, `ZoneId`, `RegionId` |
//! | [`attrs`]   | `Gender`, `Race`, `Role`, `Occupation`, `DwellingType`            |
//! | [`time`]    | `Year`, `SimClock`, `SimConfig`                                   |
//! | [`rng`]     | `SimRng` (the run's single stream), `AgentRng` (keyed sub-streams) |
//! | [`error`]   | `MsError`, `MsResult`                                             |

pub mod attrs;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use attrs::{DwellingType, Gender, Occupation, Race, Role};
pub use error::{MsError, MsResult};
pub use ids::{DwellingId, EntityId, HouseholdId, JobId, PersonId, RegionId, ZoneId};
pub use rng::{AgentRng, SimRng, StreamKey};
pub use time::{SimClock, SimConfig, Year};
