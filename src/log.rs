//! The `log` module configures where the crate's log messages go. Logging is about the internal
//! behavior of the simulator and is not to be confused with _reporting_, which is the per-day
//! output of a run (see `crate::report`).
//!
//! This module (re)exports the five logging macros: `error!`, `warn!`, `info!`, `debug!` and
//! `trace!`. Logging is _disabled_ by default. Log messages are enabled/disabled using:
//!
//!  - `enable_logging()`: turns on all log messages
//!  - `disable_logging()`: turns off all log messages
//!  - `set_log_level(level: LevelFilter)`: enables only log messages with priority at least `level`
//!
//! Messages are written to stderr so they never interleave with reports on stdout.

pub use log::{debug, error, info, trace, warn, LevelFilter};
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::{Config, Handle};
use std::sync::{Mutex, PoisonError};

// Use an ISO 8601 timestamp format and color coded level tag
const DEFAULT_LOG_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%SZ)} {h({l})} {t} - {m}{n}";

/// The global logger can only be installed once; afterwards its configuration is swapped through
/// this handle.
static LOG_HANDLE: Mutex<Option<Handle>> = Mutex::new(None);

fn build_config(level: LevelFilter) -> Config {
    let encoder = Box::new(PatternEncoder::new(DEFAULT_LOG_PATTERN));
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(encoder)
        .build();

    // The `Root` determines the global log level
    let root = Root::builder().appender("stderr").build(level);
    match Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(root)
    {
        Err(e) => {
            panic!("failed to build config: {e}");
        }
        Ok(config) => config,
    }
}

/// Enables only log messages with priority at least `level`.
pub fn set_log_level(level: LevelFilter) {
    let config = build_config(level);
    let mut handle = LOG_HANDLE.lock().unwrap_or_else(PoisonError::into_inner);

    if let Some(existing) = handle.as_ref() {
        existing.set_config(config);
        return;
    }
    match log4rs::init_config(config) {
        Ok(new_handle) => *handle = Some(new_handle),
        // Some other logger owns the global slot; leave it alone.
        Err(e) => eprintln!("logging unavailable: {e}"),
    }
}

/// Equivalent to `set_log_level(LevelFilter::Trace)`.
pub fn enable_logging() {
    set_log_level(LevelFilter::Trace);
}

pub fn disable_logging() {
    set_log_level(LevelFilter::Off);
}
