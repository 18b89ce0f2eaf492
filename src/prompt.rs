//! Interactive collection of the seven simulation parameters, asked in the same order and wording
//! as the classic console front end. Answers are whitespace separated, so several may be typed on
//! one line; the remaining questions are still printed but consume the buffered answers.

use crate::error::EpiError;
use crate::parameters::SimulationParameters;
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::str::FromStr;

const INFECTION_RATE_QUESTION: &str =
    "What would you like the infection rate to be? (Enter percentage in decimal format.): ";
const RECOVERY_RATE_QUESTION: &str =
    "What would you like the recovery rate to be? (Enter percentage in decimal format.): ";
const DEATH_RATE_QUESTION: &str =
    "What would you like the death rate to be? (Enter percentage in decimal format.): ";
const INTERACTION_QUESTION: &str = "What would you like the person interaction amount to be (the amount of people a person interacts with each iteration.): ";
const POPULATION_QUESTION: &str = "What would you like the population size to be?: ";
const STARTING_INFECTED_QUESTION: &str = "What would you like the starting infected amount to be? (the amount of people who are already infected on the first iteration): ";
const DURATION_QUESTION: &str = "What would you like the sim duration to be? (the amount of iterations the simulation will go through): ";

/// Asks every question on `output` and reads the answers from `input`. Blank lines are skipped,
/// anything else that does not parse is an error.
pub fn collect_parameters<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<SimulationParameters, EpiError> {
    let mut answers = Answers::new(input);
    let infection_rate = answers.ask(output, INFECTION_RATE_QUESTION)?;
    let recovery_rate = answers.ask(output, RECOVERY_RATE_QUESTION)?;
    let death_rate = answers.ask(output, DEATH_RATE_QUESTION)?;
    let person_interaction_amount = answers.ask(output, INTERACTION_QUESTION)?;
    let population_size = answers.ask(output, POPULATION_QUESTION)?;
    let starting_infected_population = answers.ask(output, STARTING_INFECTED_QUESTION)?;
    let duration = answers.ask(output, DURATION_QUESTION)?;

    Ok(SimulationParameters {
        population_size,
        infection_rate,
        recovery_rate,
        death_rate,
        person_interaction_amount,
        starting_infected_population,
        duration,
    })
}

/// Whitespace separated answers, read a line at a time as they are needed.
struct Answers<'a, R: BufRead> {
    input: &'a mut R,
    pending: VecDeque<String>,
}

impl<'a, R: BufRead> Answers<'a, R> {
    fn new(input: &'a mut R) -> Self {
        Answers {
            input,
            pending: VecDeque::new(),
        }
    }

    fn next_answer(&mut self) -> Result<Option<String>, EpiError> {
        let mut line = String::new();
        while self.pending.is_empty() {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }

    fn ask<T: FromStr, W: Write>(
        &mut self,
        output: &mut W,
        question: &str,
    ) -> Result<T, EpiError> {
        write!(output, "{question}")?;
        output.flush()?;

        match self.next_answer()? {
            None => Err(EpiError::ParseError(format!(
                "input ended before answering: {}",
                question.trim_end()
            ))),
            Some(answer) => answer
                .parse()
                .map_err(|_| EpiError::ParseError(format!("'{answer}' is not a valid answer"))),
        }
    }
}
