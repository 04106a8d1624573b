//! `ms-sim` — yearly pipeline driver for the microsimulation.
//!
//! # Yearly pipeline
//!
//! ```text
//! for year in start_year..end_year:
//!   ① Prepare   — Construction plans units from vacancy, price and land.
//!   ② Demography — Death, Aging, Birth, Leave-parents, Marriage, Divorce,
//!                  Employment.
//!   ③ Market    — Construction realizes its plan, then Demolition,
//!                  Renovation, Pricing.
//!   ④ Check     — registry invariants (debug builds).
//!   ⑤ Report    — year counters and trace lines to the observer.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                              |
//! |------------|-----------------------------------------------------|
//! | `parallel` | Runs every model's draw phase on Rayon's thread pool. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ms_sim::{NoopObserver, ScenarioConfig, SimBuilder};
//!
//! let config = ScenarioConfig::from_json_path("scenario.json")?;
//! let registry = RegistryBuilder::new(config.registry.clone())
//!     .dwellings(dwellings)
//!     .households(households)
//!     .persons(persons)
//!     .build(&geography)?;
//! let mut sim = SimBuilder::new(config, registry, geography).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::{SimBuilder, standard_pipeline};
pub use config::ScenarioConfig;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
