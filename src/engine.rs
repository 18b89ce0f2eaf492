/*!

The `SimulationEngine` owns a `Context` holding the population and the random stream, plus the
parameters of one run. Each call to `step` simulates one day in two phases, each finishing
before the next begins:

 1. infected people recover, die, or stay infected (`infection_manager`);
 2. susceptible people make their random contacts and may become infected
    (`transmission_manager`).

The day ends with a `DayReport` of the four state counts. A run is not restartable: once
`duration` days have been simulated the engine yields nothing further.

*/

use crate::context::Context;
use crate::define_rng;
use crate::error::EpiError;
use crate::infection_manager;
use crate::parameters::SimulationParameters;
use crate::population::{ContextPopulationExt, Population};
use crate::random::ContextRandomExt;
use crate::report::{DayReport, ReportSink};
use crate::transmission_manager;
use log::{debug, info, trace};

// Every random draw of a run, seeding included, comes from this one stream in a fixed order.
define_rng!(SimulationRng);

pub struct SimulationEngine {
    context: Context,
    parameters: SimulationParameters,
    current_day: u32,
}

impl SimulationEngine {
    /// Validates `parameters` and builds the population. Two engines built with the same
    /// parameters and seed produce identical reports.
    pub fn new(parameters: SimulationParameters, seed: u64) -> Result<Self, EpiError> {
        parameters.validate()?;

        let mut context = Context::new();
        context.init_random(seed);
        context.init_population::<SimulationRng>(
            parameters.population_size,
            parameters.starting_infected_population,
        )?;
        info!(
            "initialized simulation of {} people ({} infected) for {} days with seed {seed}",
            parameters.population_size, parameters.starting_infected_population, parameters.duration
        );

        Ok(SimulationEngine {
            context,
            parameters,
            current_day: 0,
        })
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.parameters
    }

    /// The index of the next day to simulate.
    pub fn current_day(&self) -> u32 {
        self.current_day
    }

    pub fn is_finished(&self) -> bool {
        self.current_day >= self.parameters.duration
    }

    pub fn population(&self) -> &Population {
        self.context
            .get_population()
            .unwrap() // Will never panic as the population is created in `new`
    }

    /// Simulates one day and returns its report, or `None` once the run is complete.
    pub fn step(&mut self) -> Option<DayReport> {
        if self.is_finished() {
            return None;
        }
        let day = self.current_day;
        trace!("simulating day {day}");

        infection_manager::update_infected(&mut self.context, &self.parameters);
        transmission_manager::update_susceptible(&mut self.context, &self.parameters);
        self.current_day += 1;

        let report = DayReport::from_population(day, self.population());
        debug!(
            "day {day}: susceptible={} infected={} recovered={} deceased={}",
            report.susceptible, report.infected, report.recovered, report.deceased
        );
        Some(report)
    }

    /// Runs every remaining day, sending each report to `sink` before the next day begins.
    pub fn run<S: ReportSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), EpiError> {
        info!(
            "running days {} through {}",
            self.current_day, self.parameters.duration
        );
        while let Some(report) = self.step() {
            sink.send_report(&report)?;
        }
        sink.finish()?;
        info!("simulation finished after {} days", self.current_day);
        Ok(())
    }

    /// Runs every remaining day and returns the reports in day order.
    pub fn collect_reports(&mut self) -> Vec<DayReport> {
        self.by_ref().collect()
    }
}

impl Iterator for SimulationEngine {
    type Item = DayReport;

    fn next(&mut self) -> Option<DayReport> {
        self.step()
    }
}
