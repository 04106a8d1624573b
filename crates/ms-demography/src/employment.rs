//! Employment change: finding and quitting jobs.

use log::debug;

use ms_core::{Occupation, PersonId, SimRng, ZoneId};
use ms_model::{
    Event, EventKind, ModelResult, RelocationSearch, SimulationState, UnmetDemand, YearlyModel,
    draw_phase,
};

use crate::{EmploymentConfig, IncomeConfig, IncomeDistribution, ProbabilityTable};

pub struct EmploymentModel {
    find_job: ProbabilityTable,
    quit_job: ProbabilityTable,
    income:   IncomeDistribution,
}

impl EmploymentModel {
    pub fn new(config: &EmploymentConfig, income: &IncomeConfig) -> ModelResult<Self> {
        Ok(Self {
            find_job: ProbabilityTable::from_spec("employment.find_job", &config.find_job)?,
            quit_job: ProbabilityTable::from_spec("employment.quit_job", &config.quit_job)?,
            income:   IncomeDistribution::new(income)?,
        })
    }

    pub fn with_tables(find_job: ProbabilityTable, quit_job: ProbabilityTable, income: IncomeDistribution) -> Self {
        Self { find_job, quit_job, income }
    }

    fn home_zone(state: &SimulationState, person: PersonId) -> Option<ZoneId> {
        let hh = state.registry.person(person)?.household()?;
        let dwelling = state.registry.household(hh)?.dwelling()?;
        state.registry.dwelling(dwelling).map(|d| d.zone)
    }

    fn find_jobs(&self, state: &mut SimulationState, rng: &mut SimRng, subjects: &[PersonId]) -> ModelResult<usize> {
        let key = rng.stream_key(state.year, EventKind::FindJob.stream());
        let (registry, gate) = (&state.registry, &state.gate);
        let seekers = draw_phase(subjects, key, |p, r| {
            if !gate.is_eligible(registry, Event::FindJob(p)) {
                return None;
            }
            let person = registry.person(p)?;
            if !r.gen_bool(self.find_job.get(person.age, person.gender)) {
                return None;
            }
            Some(self.income.sample(person.age, person.gender, r.inner()))
        });

        let mut hired = 0usize;
        for (person, income) in seekers {
            if !state.is_eligible(Event::FindJob(person)) {
                continue;
            }
            if state.registry.vacant_jobs().is_empty() {
                state.count_unmet(UnmetDemand::MissingJob);
                continue;
            }

            // Nearest zone to home with a vacancy; unhoused seekers take the
            // lowest zone with one.
            let vacant = state.registry.vacant_jobs();
            let origin = Self::home_zone(state, person).unwrap_or(ZoneId(u32::MAX));
            let job = state
                .geography
                .nearest_zone_where(origin, |z| vacant.count_in_zone(z) > 0)
                .and_then(|z| vacant.in_zone(z).next())
                .or_else(|| vacant.iter().next());
            let Some(job) = job else {
                state.count_unmet(UnmetDemand::MissingJob);
                continue;
            };

            state.registry.assign_job(person, job)?;
            let p = state.registry.get_person_mut(person)?;
            p.occupation = Occupation::Employed;
            p.income = income;
            state.commit(Event::FindJob(person), || format!("took {job} earning {income:.0}"));
            hired += 1;
        }
        Ok(hired)
    }

    fn quit_jobs(&self, state: &mut SimulationState, rng: &mut SimRng, subjects: &[PersonId]) -> ModelResult<usize> {
        let key = rng.stream_key(state.year, EventKind::QuitJob.stream());
        let (registry, gate) = (&state.registry, &state.gate);
        let quitters = draw_phase(subjects, key, |p, r| {
            if !gate.is_eligible(registry, Event::QuitJob(p)) {
                return None;
            }
            let person = registry.person(p)?;
            r.gen_bool(self.quit_job.get(person.age, person.gender)).then_some(())
        });

        let mut quit = 0usize;
        for (person, ()) in quitters {
            if !state.is_eligible(Event::QuitJob(person)) {
                continue;
            }
            let job = state.registry.vacate_job(person)?;
            let p = state.registry.get_person_mut(person)?;
            p.occupation = Occupation::Unemployed;
            p.income = 0.0;
            state.commit(Event::QuitJob(person), || format!("quit {job:?}"));
            quit += 1;
        }
        Ok(quit)
    }
}

impl YearlyModel for EmploymentModel {
    fn name(&self) -> &'static str {
        "employment"
    }

    fn run(
        &mut self,
        state:   &mut SimulationState,
        rng:     &mut SimRng,
        _search: &mut dyn RelocationSearch,
    ) -> ModelResult<()> {
        let subjects = state.registry.person_ids();
        let quit = self.quit_jobs(state, rng, &subjects)?;
        let hired = self.find_jobs(state, rng, &subjects)?;
        debug!("employment: {hired} hired, {quit} quit");
        Ok(())
    }
}
