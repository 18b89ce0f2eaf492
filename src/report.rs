/*!

Reporting receives one `DayReport` per simulated day, in day order, through the `ReportSink`
trait. Three sinks are provided:

 - `ConsoleReport` renders the labeled block of counts for each day to any writer (stdout by
   default) and flushes it before the next day begins.
 - `CsvReport` writes one row per day with the header `day,susceptible,infected,recovered,deceased`.
 - `VecReport` collects the reports in memory.

`MultiReport` fans each report out to several sinks.

*/

use crate::error::EpiError;
use crate::population::{HealthState, Population};
use csv::Writer;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{create_dir_all, File};
use std::io::{self, Stdout, Write};
use std::path::Path;

/// The number of individuals in each health state at the end of a day.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct DayReport {
    pub day: u32,
    pub susceptible: usize,
    pub infected: usize,
    pub recovered: usize,
    pub deceased: usize,
}

impl DayReport {
    pub fn from_population(day: u32, population: &Population) -> Self {
        let mut report = DayReport {
            day,
            susceptible: 0,
            infected: 0,
            recovered: 0,
            deceased: 0,
        };
        for (_, individual) in population.iter() {
            match individual.state() {
                HealthState::Susceptible => report.susceptible += 1,
                HealthState::Infected => report.infected += 1,
                HealthState::Recovered => report.recovered += 1,
                HealthState::Deceased => report.deceased += 1,
            }
        }
        report
    }

    pub fn count(&self, state: HealthState) -> usize {
        match state {
            HealthState::Susceptible => self.susceptible,
            HealthState::Infected => self.infected,
            HealthState::Recovered => self.recovered,
            HealthState::Deceased => self.deceased,
        }
    }

    /// Always equal to the population size.
    pub fn total(&self) -> usize {
        self.susceptible + self.infected + self.recovered + self.deceased
    }
}

pub trait ReportSink {
    fn send_report(&mut self, report: &DayReport) -> Result<(), EpiError>;

    /// Called once after the last day of a run.
    fn finish(&mut self) -> Result<(), EpiError> {
        Ok(())
    }
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn send_report(&mut self, report: &DayReport) -> Result<(), EpiError> {
        (**self).send_report(report)
    }

    fn finish(&mut self) -> Result<(), EpiError> {
        (**self).finish()
    }
}

pub struct ConsoleReport<W: Write> {
    writer: W,
}

impl ConsoleReport<Stdout> {
    pub fn stdout() -> Self {
        ConsoleReport::new(io::stdout())
    }
}

impl<W: Write> ConsoleReport<W> {
    pub fn new(writer: W) -> Self {
        ConsoleReport { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for ConsoleReport<W> {
    fn send_report(&mut self, report: &DayReport) -> Result<(), EpiError> {
        writeln!(self.writer, "Day {} Report: ", report.day)?;
        writeln!(self.writer, "Susceptible Count: {}", report.susceptible)?;
        writeln!(self.writer, "Infected Count: {}", report.infected)?;
        writeln!(self.writer, "Recovered Count: {}", report.recovered)?;
        writeln!(self.writer, "Deceased Count: {}", report.deceased)?;
        writeln!(self.writer, " ")?;
        self.writer.flush()?;
        Ok(())
    }
}

pub struct CsvReport<W: Write> {
    writer: Writer<W>,
}

impl CsvReport<File> {
    /// Creates the file and all parent directories if they do not exist. Only `.csv` paths are
    /// accepted.
    pub fn create(path: &Path) -> Result<Self, EpiError> {
        match path.extension().and_then(OsStr::to_str) {
            Some("csv") => {
                if let Some(parent) = path.parent() {
                    create_dir_all(parent)?;
                }
                Ok(CsvReport::from_writer(File::create(path)?))
            }
            _ => Err(EpiError::ConfigError(format!(
                "report output files must be CSVs, got {}",
                path.display()
            ))),
        }
    }
}

impl<W: Write> CsvReport<W> {
    pub fn from_writer(writer: W) -> Self {
        CsvReport {
            writer: Writer::from_writer(writer),
        }
    }
}

impl<W: Write> ReportSink for CsvReport<W> {
    fn send_report(&mut self, report: &DayReport) -> Result<(), EpiError> {
        self.writer.serialize(report)?;
        self.writer.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), EpiError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct VecReport {
    reports: Vec<DayReport>,
}

impl VecReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[DayReport] {
        &self.reports
    }

    pub fn into_reports(self) -> Vec<DayReport> {
        self.reports
    }
}

impl ReportSink for VecReport {
    fn send_report(&mut self, report: &DayReport) -> Result<(), EpiError> {
        self.reports.push(*report);
        Ok(())
    }
}

#[derive(Default)]
pub struct MultiReport {
    sinks: Vec<Box<dyn ReportSink>>,
}

impl MultiReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, sink: impl ReportSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl ReportSink for MultiReport {
    fn send_report(&mut self, report: &DayReport) -> Result<(), EpiError> {
        for sink in &mut self.sinks {
            sink.send_report(report)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), EpiError> {
        for sink in &mut self.sinks {
            sink.finish()?;
        }
        Ok(())
    }
}
