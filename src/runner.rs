//! Command line front end: gathers the parameters from a JSON file, flags, or the interactive
//! prompt, then runs the simulation and sends the daily reports to stdout and/or a CSV file.

use crate::engine::SimulationEngine;
use crate::error::EpiError;
use crate::log::{set_log_level, LevelFilter};
use crate::parameters::SimulationParameters;
use crate::prompt;
use crate::report::{ConsoleReport, CsvReport, MultiReport};
use clap::Parser;
use log::info;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

const CLOSING_BANNER: &str = "************************";

/// Default cli arguments for the simulator
#[derive(Parser, Debug)]
#[command(name = "episim", version, about = "A discrete-time agent-based epidemic simulator")]
pub struct RunnerArgs {
    /// Optional path for a JSON parameters file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Ask for every parameter on the console. This is the default when neither a config file
    /// nor any parameter flag is given
    #[arg(short, long)]
    pub interactive: bool,

    /// Random seed. Defaults to the current time
    #[arg(short, long)]
    pub random_seed: Option<u64>,

    /// Optional path for a CSV copy of the daily reports
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Do not print the daily reports to stdout
    #[arg(short, long)]
    pub quiet: bool,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(flatten)]
    pub overrides: ParameterOverrides,
}

/// Per-parameter flags, applied on top of the config file or prompt answers.
#[derive(clap::Args, Debug, Default)]
pub struct ParameterOverrides {
    #[arg(long)]
    pub population_size: Option<usize>,

    #[arg(long)]
    pub infection_rate: Option<f64>,

    #[arg(long)]
    pub recovery_rate: Option<f64>,

    #[arg(long)]
    pub death_rate: Option<f64>,

    #[arg(long)]
    pub person_interaction_amount: Option<u32>,

    #[arg(long = "starting-infected")]
    pub starting_infected_population: Option<usize>,

    #[arg(long)]
    pub duration: Option<u32>,
}

impl ParameterOverrides {
    pub fn is_empty(&self) -> bool {
        self.population_size.is_none()
            && self.infection_rate.is_none()
            && self.recovery_rate.is_none()
            && self.death_rate.is_none()
            && self.person_interaction_amount.is_none()
            && self.starting_infected_population.is_none()
            && self.duration.is_none()
    }

    pub fn apply(&self, parameters: &mut SimulationParameters) {
        if let Some(value) = self.population_size {
            parameters.population_size = value;
        }
        if let Some(value) = self.infection_rate {
            parameters.infection_rate = value;
        }
        if let Some(value) = self.recovery_rate {
            parameters.recovery_rate = value;
        }
        if let Some(value) = self.death_rate {
            parameters.death_rate = value;
        }
        if let Some(value) = self.person_interaction_amount {
            parameters.person_interaction_amount = value;
        }
        if let Some(value) = self.starting_infected_population {
            parameters.starting_infected_population = value;
        }
        if let Some(value) = self.duration {
            parameters.duration = value;
        }
    }
}

/// Seconds since the Unix epoch.
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

/// Builds the parameter set: prompt answers or the config file (or defaults), then the override
/// flags on top.
pub fn resolve_parameters<R: BufRead, W: Write>(
    args: &RunnerArgs,
    input: &mut R,
    output: &mut W,
) -> Result<SimulationParameters, EpiError> {
    let prompt_for_everything =
        args.interactive || (args.config.is_none() && args.overrides.is_empty());

    let mut parameters = if prompt_for_everything {
        prompt::collect_parameters(input, output)?
    } else if let Some(path) = &args.config {
        SimulationParameters::from_json_file(path)?
    } else {
        SimulationParameters::default()
    };
    args.overrides.apply(&mut parameters);
    parameters.validate()?;

    Ok(parameters)
}

/// Runs a simulation configured by already parsed arguments.
///
/// # Errors
/// Returns an error if the parameters cannot be gathered or are invalid, or if a report cannot
/// be written.
pub fn run_with_args(args: RunnerArgs) -> Result<(), EpiError> {
    if let Some(log_level) = &args.log_level {
        let level: LevelFilter = log_level
            .parse()
            .map_err(|_| EpiError::ParseError(format!("unknown log level '{log_level}'")))?;
        set_log_level(level);
    }

    let parameters = {
        let stdin = io::stdin();
        resolve_parameters(&args, &mut stdin.lock(), &mut io::stdout())?
    };
    let seed = args.random_seed.unwrap_or_else(time_seed);
    info!("using random seed {seed}");

    let mut sinks = MultiReport::new();
    if !args.quiet {
        sinks.add(ConsoleReport::stdout());
    }
    if let Some(path) = &args.output {
        sinks.add(CsvReport::create(path)?);
    }

    let mut engine = SimulationEngine::new(parameters, seed)?;
    engine.run(&mut sinks)?;

    if !args.quiet {
        let mut stdout = io::stdout();
        writeln!(stdout, "{CLOSING_BANNER}")?;
        stdout.flush()?;
    }
    Ok(())
}

/// Parses the process arguments and runs the simulation.
pub fn run() -> Result<(), EpiError> {
    run_with_args(RunnerArgs::parse())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn args(argv: &[&str]) -> RunnerArgs {
        RunnerArgs::try_parse_from(std::iter::once("episim").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_prompt() {
        let args = args(&[]);
        let mut input = Cursor::new("0.2\n0.3\n0.01\n3\n80\n4\n6\n");

        let parameters = resolve_parameters(&args, &mut input, &mut io::sink()).unwrap();

        assert_eq!(parameters.population_size, 80);
        assert_eq!(parameters.starting_infected_population, 4);
        assert_eq!(parameters.duration, 6);
    }

    #[test]
    fn test_overrides_skip_prompt() {
        let args = args(&["--population-size", "40", "--starting-infected", "2"]);
        // Empty input would fail if the prompt were used.
        let parameters =
            resolve_parameters(&args, &mut Cursor::new(""), &mut io::sink()).unwrap();

        assert_eq!(parameters.population_size, 40);
        assert_eq!(parameters.starting_infected_population, 2);
        assert_eq!(parameters.duration, SimulationParameters::default().duration);
    }

    #[test]
    fn test_config_file_with_override() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("params.json");
        fs::write(
            &config_path,
            r#"{"population_size": 60, "starting_infected_population": 6, "duration": 9}"#,
        )
        .unwrap();

        let args = args(&["-c", config_path.to_str().unwrap(), "--duration", "2"]);
        let parameters =
            resolve_parameters(&args, &mut Cursor::new(""), &mut io::sink()).unwrap();

        assert_eq!(parameters.population_size, 60);
        assert_eq!(parameters.starting_infected_population, 6);
        assert_eq!(parameters.duration, 2);
    }

    #[test]
    fn test_invalid_override_combination() {
        let args = args(&["--population-size", "5", "--starting-infected", "6"]);
        let result = resolve_parameters(&args, &mut Cursor::new(""), &mut io::sink());

        assert!(matches!(result, Err(EpiError::ConfigError(_))));
    }

    #[test]
    fn test_run_writes_csv() {
        let temp_dir = tempdir().unwrap();
        let output_path = temp_dir.path().join("out").join("days.csv");
        let args = args(&[
            "--population-size",
            "50",
            "--starting-infected",
            "5",
            "--duration",
            "4",
            "-r",
            "42",
            "-q",
            "-o",
            output_path.to_str().unwrap(),
        ]);

        run_with_args(args).unwrap();

        let contents = fs::read_to_string(&output_path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "day,susceptible,infected,recovered,deceased");
        assert!(lines[1].starts_with("0,"));
        assert!(lines[4].starts_with("3,"));
    }

    #[test]
    fn test_unknown_log_level() {
        let args = args(&["--log-level", "loud", "--duration", "1"]);
        assert!(matches!(run_with_args(args), Err(EpiError::ParseError(_))));
    }
}
