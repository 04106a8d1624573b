//! `ms-realestate` — supply-side models of the housing market.
//!
//! | Module           | Contents                                                     |
//! |------------------|--------------------------------------------------------------|
//! | [`config`]       | `RealEstateConfig` and one section per model                 |
//! | [`stats`]        | `MarketStats` — units, vacancy and price by type/zone/region |
//! | [`land`]         | `LandLedger` — developable acres and zoning                  |
//! | [`construction`] | `ConstructionModel` — plan in `prepare`, build in `run`      |
//! | [`demolition`]   | `DemolitionModel`                                            |
//! | [`renovation`]   | `RenovationModel` — quality drift with mean reversion        |
//! | [`pricing`]      | `PricingModel` — piecewise vacancy response                  |
//!
//! The models run after the demographic models each year, in the order
//! construction, demolition, renovation, pricing.

pub mod config;
pub mod construction;
pub mod demolition;
pub mod land;
pub mod pricing;
pub mod renovation;
pub mod stats;


pub use config::{
    ConstructionConfig, DemolitionConfig, LandConfig, PricingConfig, RealEstateConfig, RenovationConfig,
};
pub use construction::{ConstructionModel, PlannedUnit};
pub use demolition::DemolitionModel;
pub use land::LandLedger;
pub use pricing::PricingModel;
pub use renovation::RenovationModel;
pub use stats::{MarketStats, Segment, median_household_income};
