//! `ms-registry` — the shared entity registry.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                      |
//! |-----------------|---------------------------------------------------------------|
//! | [`arena`]       | `Arena<I, T>` slot storage with an `IdPolicy`                 |
//! | [`entity`]      | `Person`, `Household`, `Dwelling`, `Job` and their `*Spec`s    |
//! | [`vacancy`]     | `VacancyIndex<I>` — vacant dwellings / jobs by zone            |
//! | [`registry`]    | `Registry` — owns the four arenas and both vacancy indices     |
//! | [`geography`]   | `Zone`, `Coord`, `Geography` (R-tree over zone centroids)      |
//! | [`builder`]     | `RegistryBuilder` — validated initial population load          |
//!
//! # Ownership discipline
//!
//! Entities refer to each other only by typed id.  The link fields
//! (person→household, person→job, household→dwelling, dwelling→resident,
//! job→worker, household→persons) are crate-private and change only through
//! `Registry` methods, which update both directions and the vacancy indices
//! in one step.  Every other attribute is a plain `pub` field.

pub mod arena;
pub mod builder;
pub mod entity;
pub mod geography;
pub mod registry;
pub mod vacancy;

#[cfg(test)]
mod tests;

pub use arena::{Arena, IdPolicy};
pub use builder::{DwellingRecord, HouseholdRecord, JobRecord, PersonRecord, RegistryBuilder};
pub use entity::{Dwelling, DwellingSpec, Household, Job, Person, PersonSpec};
pub use geography::{Coord, Geography, Zone};
pub use registry::{Registry, RegistryConfig};
pub use vacancy::VacancyIndex;
