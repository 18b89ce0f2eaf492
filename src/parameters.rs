use crate::error::EpiError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// The seven numbers that fully describe a simulation run. Rates are probabilities but are
/// deliberately not range checked: a rate below 0 never fires and a rate above 1 always fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationParameters {
    pub population_size: usize,
    /// Chance that contact with an infected person infects a susceptible one.
    pub infection_rate: f64,
    /// Chance, rolled every day, that an infected person recovers.
    pub recovery_rate: f64,
    /// Chance, rolled every day a recovery roll fails, that an infected person dies.
    pub death_rate: f64,
    /// Number of random contacts each susceptible person makes per day.
    pub person_interaction_amount: u32,
    pub starting_infected_population: usize,
    /// Number of days to simulate.
    pub duration: u32,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        SimulationParameters {
            population_size: 1000,
            infection_rate: 0.1,
            recovery_rate: 0.1,
            death_rate: 0.01,
            person_interaction_amount: 5,
            starting_infected_population: 10,
            duration: 30,
        }
    }
}

impl SimulationParameters {
    /// Checks the only constraint a run cannot recover from.
    pub fn validate(&self) -> Result<(), EpiError> {
        if self.starting_infected_population > self.population_size {
            return Err(EpiError::ConfigError(format!(
                "starting infected population ({}) exceeds population size ({})",
                self.starting_infected_population, self.population_size
            )));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, EpiError> {
        let parameters: SimulationParameters = serde_json::from_str(json)?;
        parameters.validate()?;
        Ok(parameters)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, EpiError> {
        let reader = BufReader::new(File::open(path)?);
        let parameters: SimulationParameters = serde_json::from_reader(reader)?;
        parameters.validate()?;
        Ok(parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SimulationParameters::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_too_many_infected() {
        let parameters = SimulationParameters {
            population_size: 5,
            starting_infected_population: 6,
            ..Default::default()
        };
        assert!(matches!(
            parameters.validate(),
            Err(EpiError::ConfigError(_))
        ));
    }

    #[test]
    fn test_out_of_range_rates_are_accepted() {
        let parameters = SimulationParameters {
            infection_rate: 2.5,
            recovery_rate: -1.0,
            death_rate: f64::NAN,
            ..Default::default()
        };
        assert!(parameters.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let parameters =
            SimulationParameters::from_json_str(r#"{"population_size": 200, "duration": 7}"#)
                .unwrap();
        assert_eq!(parameters.population_size, 200);
        assert_eq!(parameters.duration, 7);
        assert_eq!(
            parameters.infection_rate,
            SimulationParameters::default().infection_rate
        );
    }

    #[test]
    fn test_unknown_field_is_an_error() {
        let result = SimulationParameters::from_json_str(r#"{"populaton_size": 200}"#);
        assert!(matches!(result, Err(EpiError::JsonError(_))));
    }

    #[test]
    fn test_invalid_json_config() {
        let result = SimulationParameters::from_json_str(
            r#"{"population_size": 2, "starting_infected_population": 3}"#,
        );
        assert!(matches!(result, Err(EpiError::ConfigError(_))));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "population_size": 100,
                "infection_rate": 0.0,
                "recovery_rate": 1.0,
                "death_rate": 0.0,
                "person_interaction_amount": 5,
                "starting_infected_population": 10,
                "duration": 3
            }}"#
        )
        .unwrap();

        let parameters = SimulationParameters::from_json_file(file.path()).unwrap();
        assert_eq!(
            parameters,
            SimulationParameters {
                population_size: 100,
                infection_rate: 0.0,
                recovery_rate: 1.0,
                death_rate: 0.0,
                person_interaction_amount: 5,
                starting_infected_population: 10,
                duration: 3,
            }
        );
    }

    #[test]
    fn test_missing_file() {
        let result = SimulationParameters::from_json_file(Path::new("/nonexistent/params.json"));
        assert!(matches!(result, Err(EpiError::IoError(_))));
    }
}
