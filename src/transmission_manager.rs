//! Phase two of a simulated day: every susceptible person makes a fixed number of random contacts
//! and may be infected by an infected contact.

use crate::context::Context;
use crate::engine::SimulationRng;
use crate::parameters::SimulationParameters;
use crate::population::{ContextPopulationExt, ContextPopulationExtInternal, HealthState, PersonId};
use crate::random::ContextRandomExt;
use log::trace;

/// Contacts are drawn uniformly from the whole population with replacement, self included.
/// Infections are applied only after every susceptible person has made their contacts, so a
/// person infected today cannot pass the infection on until tomorrow.
pub(crate) fn update_susceptible(context: &mut Context, parameters: &SimulationParameters) {
    let population_size = context.get_population_size();
    if population_size == 0 {
        return;
    }

    let susceptible = context.query_people(HealthState::Susceptible);
    trace!(
        "updating {} susceptible people with {} contacts each",
        susceptible.len(),
        parameters.person_interaction_amount
    );

    let mut newly_infected = Vec::new();
    for person_id in susceptible {
        let mut infected = false;
        // Every contact is rolled even after an infection so the random stream advances the
        // same way regardless of outcome.
        for _ in 0..parameters.person_interaction_amount {
            let contact =
                PersonId(context.sample_range::<SimulationRng, _, usize>(0..population_size));
            if context.get_health_state(contact) == HealthState::Infected
                && context.sample_unit::<SimulationRng>() <= parameters.infection_rate
            {
                infected = true;
            }
        }
        if infected {
            newly_infected.push(person_id);
        }
    }

    trace!("{} new infections", newly_infected.len());
    for person_id in newly_infected {
        context.set_health_state(person_id, HealthState::Infected);
    }
}
