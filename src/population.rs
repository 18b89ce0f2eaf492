/*!

The population is an ordered, fixed-size collection of `Individual`s stored as a data plugin in
the `Context`. It is created once by `ContextPopulationExt::init_population`; after that only
the simulation phases (through `ContextPopulationExtInternal`) may change an individual's state.

*/

use crate::context::{Context, DataPlugin};
use crate::error::EpiError;
use crate::random::{ContextRandomExt, RngId};
use log::trace;
use rand::Rng;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct PersonId(pub(crate) usize);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum HealthState {
    Susceptible,
    Infected,
    Recovered,
    Deceased,
}

impl HealthState {
    pub const ALL: [HealthState; 4] = [
        HealthState::Susceptible,
        HealthState::Infected,
        HealthState::Recovered,
        HealthState::Deceased,
    ];

    /// Recovered and deceased individuals never change state again.
    pub fn is_terminal(self) -> bool {
        matches!(self, HealthState::Recovered | HealthState::Deceased)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Individual {
    state: HealthState,
    days_infected: u32,
}

impl Default for Individual {
    fn default() -> Self {
        Individual {
            state: HealthState::Susceptible,
            days_infected: 0,
        }
    }
}

impl Individual {
    pub fn state(&self) -> HealthState {
        self.state
    }

    /// Consecutive days spent infected. Frozen once the individual leaves `Infected`.
    pub fn days_infected(&self) -> u32 {
        self.days_infected
    }
}

#[derive(Clone, Debug, Default)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl DataPlugin for Population {
    #[allow(non_upper_case_globals)]
    const new: &'static dyn Fn() -> Self = &Population::default;
}

impl Population {
    /// Creates `population_size` susceptible individuals and infects exactly
    /// `starting_infected_population` distinct ones, drawing uniformly random indices until
    /// enough distinct individuals have been hit.
    pub fn initialize<R: Rng + ?Sized>(
        population_size: usize,
        starting_infected_population: usize,
        rng: &mut R,
    ) -> Result<Self, EpiError> {
        if starting_infected_population > population_size {
            return Err(EpiError::ConfigError(format!(
                "starting infected population ({starting_infected_population}) exceeds population size ({population_size})"
            )));
        }

        let mut individuals = vec![Individual::default(); population_size];
        let mut infected = 0;
        while infected < starting_infected_population {
            let individual = &mut individuals[rng.random_range(0..population_size)];
            if individual.state != HealthState::Infected {
                individual.state = HealthState::Infected;
                infected += 1;
            }
        }

        Ok(Population { individuals })
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn get(&self, person_id: PersonId) -> Option<&Individual> {
        self.individuals.get(person_id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PersonId, &Individual)> {
        self.individuals
            .iter()
            .enumerate()
            .map(|(idx, individual)| (PersonId(idx), individual))
    }

    /// Number of individuals currently in `state`.
    pub fn count(&self, state: HealthState) -> usize {
        self.individuals
            .iter()
            .filter(|individual| individual.state == state)
            .count()
    }

    fn get_mut(&mut self, person_id: PersonId) -> &mut Individual {
        &mut self.individuals[person_id.0]
    }
}

pub trait ContextPopulationExt {
    /// Builds the population, seeding the starting infections from the stream `R`. Replaces any
    /// population that already exists in the context.
    fn init_population<R: RngId>(
        &mut self,
        population_size: usize,
        starting_infected_population: usize,
    ) -> Result<(), EpiError>;

    fn get_population(&self) -> Option<&Population>;

    fn get_population_size(&self) -> usize;

    /// Panics if `person_id` is not part of the population.
    fn get_health_state(&self, person_id: PersonId) -> HealthState;

    /// Returns every person currently in `state`, in population order.
    fn query_people(&self, state: HealthState) -> Vec<PersonId>;
}

impl ContextPopulationExt for Context {
    fn init_population<R: RngId>(
        &mut self,
        population_size: usize,
        starting_infected_population: usize,
    ) -> Result<(), EpiError> {
        trace!(
            "initializing population of {population_size} with {starting_infected_population} infected"
        );
        let population = self.sample::<R, _>(|rng| {
            Population::initialize(population_size, starting_infected_population, rng)
        })?;
        *self.get_data_container_mut::<Population>() = population;
        Ok(())
    }

    fn get_population(&self) -> Option<&Population> {
        self.get_data_container::<Population>()
    }

    fn get_population_size(&self) -> usize {
        match self.get_population() {
            None => 0,
            Some(population) => population.len(),
        }
    }

    fn get_health_state(&self, person_id: PersonId) -> HealthState {
        self.get_population()
            .and_then(|population| population.get(person_id))
            .map(Individual::state)
            .unwrap()
    }

    fn query_people(&self, state: HealthState) -> Vec<PersonId> {
        match self.get_population() {
            None => Vec::new(),
            Some(population) => population
                .iter()
                .filter(|(_, individual)| individual.state == state)
                .map(|(person_id, _)| person_id)
                .collect(),
        }
    }
}

/// Mutation is reserved for the simulation phases.
pub(crate) trait ContextPopulationExtInternal {
    fn set_health_state(&mut self, person_id: PersonId, state: HealthState);
    fn increment_days_infected(&mut self, person_id: PersonId);
}

impl ContextPopulationExtInternal for Context {
    fn set_health_state(&mut self, person_id: PersonId, state: HealthState) {
        self.get_data_container_mut::<Population>()
            .get_mut(person_id)
            .state = state;
    }

    fn increment_days_infected(&mut self, person_id: PersonId) {
        self.get_data_container_mut::<Population>()
            .get_mut(person_id)
            .days_infected += 1;
    }
}
