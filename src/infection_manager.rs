//! Phase one of a simulated day: every infected person either recovers, dies, or stays infected.

use crate::context::Context;
use crate::engine::SimulationRng;
use crate::parameters::SimulationParameters;
use crate::population::{ContextPopulationExt, ContextPopulationExtInternal, HealthState};
use crate::random::ContextRandomExt;
use log::trace;

/// Recovery is rolled first; the death roll only happens when recovery fails, so nobody can
/// both recover and die on the same day.
pub(crate) fn update_infected(context: &mut Context, parameters: &SimulationParameters) {
    let infected = context.query_people(HealthState::Infected);
    trace!("updating {} infected people", infected.len());

    for person_id in infected {
        context.increment_days_infected(person_id);
        if context.sample_unit::<SimulationRng>() < parameters.recovery_rate {
            context.set_health_state(person_id, HealthState::Recovered);
        } else if context.sample_unit::<SimulationRng>() < parameters.death_rate {
            context.set_health_state(person_id, HealthState::Deceased);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::population::Population;

    fn setup(
        population_size: usize,
        starting_infected_population: usize,
        recovery_rate: f64,
        death_rate: f64,
    ) -> (Context, SimulationParameters) {
        let mut context = Context::new();
        context.init_random(42);
        context
            .init_population::<SimulationRng>(population_size, starting_infected_population)
            .unwrap();
        let parameters = SimulationParameters {
            population_size,
            starting_infected_population,
            recovery_rate,
            death_rate,
            ..Default::default()
        };
        (context, parameters)
    }

    fn population(context: &Context) -> &Population {
        context.get_population().unwrap()
    }

    #[test]
    fn test_certain_recovery() {
        let (mut context, parameters) = setup(50, 20, 1.0, 1.0);
        let infected = context.query_people(HealthState::Infected);

        update_infected(&mut context, &parameters);

        assert_eq!(population(&context).count(HealthState::Recovered), 20);
        assert_eq!(population(&context).count(HealthState::Deceased), 0);
        for person_id in infected {
            assert_eq!(population(&context).get(person_id).unwrap().days_infected(), 1);
        }
    }

    #[test]
    fn test_certain_death() {
        let (mut context, parameters) = setup(50, 20, 0.0, 1.0);

        update_infected(&mut context, &parameters);

        assert_eq!(population(&context).count(HealthState::Deceased), 20);
        assert_eq!(population(&context).count(HealthState::Recovered), 0);
    }

    #[test]
    fn test_remain_infected_counts_days() {
        let (mut context, parameters) = setup(50, 20, 0.0, 0.0);

        for _ in 0..4 {
            update_infected(&mut context, &parameters);
        }

        assert_eq!(population(&context).count(HealthState::Infected), 20);
        for person_id in context.query_people(HealthState::Infected) {
            assert_eq!(population(&context).get(person_id).unwrap().days_infected(), 4);
        }
    }

    #[test]
    fn test_susceptible_untouched() {
        let (mut context, parameters) = setup(50, 20, 0.5, 0.5);

        update_infected(&mut context, &parameters);

        assert_eq!(population(&context).count(HealthState::Susceptible), 30);
        for person_id in context.query_people(HealthState::Susceptible) {
            assert_eq!(population(&context).get(person_id).unwrap().days_infected(), 0);
        }
    }

    #[test]
    fn test_out_of_range_rates() {
        let (mut context, parameters) = setup(50, 20, -1.0, -0.5);
        update_infected(&mut context, &parameters);
        assert_eq!(population(&context).count(HealthState::Infected), 20);

        let (mut context, parameters) = setup(50, 20, 3.0, 0.0);
        update_infected(&mut context, &parameters);
        assert_eq!(population(&context).count(HealthState::Recovered), 20);
    }

    #[test]
    fn test_terminal_states_never_change() {
        let (mut context, parameters) = setup(50, 20, 0.3, 0.3);
        update_infected(&mut context, &parameters);
        let recovered = context.query_people(HealthState::Recovered);
        let deceased = context.query_people(HealthState::Deceased);

        for _ in 0..10 {
            update_infected(&mut context, &parameters);
        }

        for person_id in recovered {
            assert_eq!(context.get_health_state(person_id), HealthState::Recovered);
        }
        for person_id in deceased {
            assert_eq!(context.get_health_state(person_id), HealthState::Deceased);
        }
    }
}
