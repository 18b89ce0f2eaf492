/*!

A discrete-time, agent-based epidemic simulator. A fixed population of individuals moves between
the health states `Susceptible`, `Infected`, `Recovered` and `Deceased` over a number of days,
driven by random contacts and daily recovery/death rolls. Each simulated day produces a
`DayReport` with the number of individuals in each state.

```rust
use episim::{SimulationEngine, SimulationParameters};

let parameters = SimulationParameters {
    population_size: 100,
    starting_infected_population: 10,
    infection_rate: 0.0,
    recovery_rate: 1.0,
    death_rate: 0.0,
    person_interaction_amount: 5,
    duration: 3,
};
let mut engine = SimulationEngine::new(parameters, 42).unwrap();
for report in engine.collect_reports() {
    assert_eq!(report.recovered, 10);
}
```

*/

pub mod context;
pub mod engine;
pub mod error;
mod hashing;
mod infection_manager;
pub mod log;
pub mod parameters;
pub mod population;
pub mod prompt;
pub mod random;
pub mod report;
pub mod runner;
mod transmission_manager;

// All modules import `crate::TypeId` in case we want to change the underlying type of `TypeId`.
pub(crate) use std::any::TypeId;

// Re-exported for `define_rng!`
pub use rand;

pub use context::Context;
pub use engine::SimulationEngine;
pub use error::EpiError;
pub use parameters::SimulationParameters;
pub use population::{HealthState, Individual, PersonId, Population};
pub use report::{ConsoleReport, CsvReport, DayReport, MultiReport, ReportSink, VecReport};

#[inline(always)]
pub fn type_of<T: 'static>() -> TypeId {
    TypeId::of::<T>()
}
