//! `ms-demography` — the demographic lifecycle models.
//!
//! | Module            | Contents                                                    |
//! |-------------------|-------------------------------------------------------------|
//! | [`agent_type`]    | `AgentType`, `GenderTable`, `UtilitySpec`, `ProbabilityTable` |
//! | [`config`]        | `DemographyConfig` and one section per model                |
//! | [`income`]        | `IncomeDistribution` — log-normal by agent type             |
//! | [`aging`]         | `AgingModel`                                                |
//! | [`birth`]         | `BirthModel`                                                |
//! | [`death`]         | `DeathModel`                                                |
//! | [`marriage`]      | `MarriageModel` — market matching and household merging     |
//! | [`divorce`]       | `DivorceModel`                                              |
//! | [`leave_parents`] | `LeaveParentsModel`                                         |
//! | [`employment`]    | `EmploymentModel` — find and quit jobs                      |
//!
//! Each model implements [`ms_model::YearlyModel`].

pub mod agent_type;
pub mod aging;
pub mod birth;
pub mod config;
pub mod death;
pub mod divorce;
pub mod employment;
pub mod income;
pub mod leave_parents;
pub mod marriage;

#[cfg(test)]
mod tests;

pub use agent_type::{AGE_BAND_YEARS, AGE_BANDS, AgentType, GenderTable, ProbabilityTable, UtilitySpec};
pub use aging::AgingModel;
pub use birth::BirthModel;
pub use config::{
    BirthConfig, DeathConfig, DemographyConfig, DivorceConfig, EmploymentConfig, IncomeConfig,
    LeaveParentsConfig, MarriageConfig,
};
pub use death::DeathModel;
pub use divorce::DivorceModel;
pub use employment::EmploymentModel;
pub use income::IncomeDistribution;
pub use leave_parents::LeaveParentsModel;
pub use marriage::MarriageModel;
