//! `ms-model` — shared machinery for the yearly transition models.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                        |
//! |----------------|-----------------------------------------------------------------|
//! | [`event`]      | `EventKind`, `Event`                                            |
//! | [`gate`]       | `GateRules`, `EventGate` — the per-event eligibility predicate  |
//! | [`counters`]   | `UnmetDemand`, `Counts`, `EventCounters`                        |
//! | [`trace`]      | `TraceLog` — lines about tracked entities                       |
//! | [`relocation`] | `RelocationSearch` trait, `AffordabilitySearch`                 |
//! | [`state`]      | `SimulationState`, `MarketSignals`                              |
//! | [`model`]      | `YearlyModel` trait, `draw_phase`                               |
//! | [`error`]      | `ModelError`, `ModelResult<T>`, parameter checks                |
//!
//! # Design notes
//!
//! Every stochastic model follows the same two-phase shape:
//!
//! 1. **Draw phase** (optionally parallel): for each candidate, evaluate the
//!    probability and draw with a keyed `AgentRng`.  Only reads state.
//!
//! 2. **Apply phase** (sequential, ascending id): for each successful draw,
//!    re-check `EventGate::is_eligible` against the *current* registry,
//!    mutate, then `SimulationState::commit`.
//!
//! Market-level choices (partner matching, site allocation, dwelling search)
//! happen in the apply phase with the run's single `SimRng`.

pub mod counters;
pub mod error;
pub mod event;
pub mod gate;
pub mod model;
pub mod relocation;
pub mod state;
pub mod trace;

#[cfg(test)]
mod tests;

pub use counters::{Counts, EventCounters, UnmetDemand};
pub use error::{ModelError, ModelResult, check_non_negative, check_probability};
pub use event::{Event, EventKind};
pub use gate::{EventGate, GateRules};
pub use model::{YearlyModel, draw_phase};
pub use relocation::{AffordabilitySearch, RelocationConfig, RelocationSearch};
pub use state::{MarketSignals, SimulationState};
pub use trace::{TraceLine, TraceLog, TraceSubject};
