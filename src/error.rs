use std::fmt::{self, Display};
use std::io;

/// Provides `EpiError` and maps other errors to
/// convert to an `EpiError`
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum EpiError {
    IoError(io::Error),
    JsonError(serde_json::Error),
    CsvError(csv::Error),
    /// User supplied input (interactive prompt or command line) that could not be parsed.
    ParseError(String),
    /// A parameter set that cannot describe a simulation, e.g. more starting infections than
    /// people.
    ConfigError(String),
}

impl From<io::Error> for EpiError {
    fn from(error: io::Error) -> Self {
        EpiError::IoError(error)
    }
}

impl From<serde_json::Error> for EpiError {
    fn from(error: serde_json::Error) -> Self {
        EpiError::JsonError(error)
    }
}

impl From<csv::Error> for EpiError {
    fn from(error: csv::Error) -> Self {
        EpiError::CsvError(error)
    }
}

impl std::error::Error for EpiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EpiError::IoError(e) => Some(e),
            EpiError::JsonError(e) => Some(e),
            EpiError::CsvError(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for EpiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EpiError::IoError(e) => write!(f, "I/O error: {e}"),
            EpiError::JsonError(e) => write!(f, "invalid parameters file: {e}"),
            EpiError::CsvError(e) => write!(f, "report error: {e}"),
            EpiError::ParseError(msg) => write!(f, "could not parse input: {msg}"),
            EpiError::ConfigError(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        let error: EpiError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(error, EpiError::IoError(_)));

        let json_error = serde_json::from_str::<u32>("not json").unwrap_err();
        let error: EpiError = json_error.into();
        assert!(matches!(error, EpiError::JsonError(_)));
    }

    #[test]
    fn test_display() {
        let error = EpiError::ConfigError("starting infected exceeds population".to_string());
        assert_eq!(
            error.to_string(),
            "invalid configuration: starting infected exceeds population"
        );
    }
}
