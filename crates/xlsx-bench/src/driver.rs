//! Filter → skip → availability → time → report, one routine at a time.

use std::io;
use std::time::{Duration, Instant};

use regex::Regex;
use thiserror::Error;

use crate::registry::{Availability, Registry, Routine};
use crate::report::Reporter;
use crate::routines::RoutineError;
use crate::workload::Workload;

pub const DEFAULT_REPEATS: u32 = 10;

#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Matched anywhere in the routine name (`Regex::is_match`), not anchored.
    pub filter: Regex,
    /// Consecutive invocations per routine; always at least 1.
    pub repeats: u32,
    pub workload: Workload,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimingResult {
    pub name: &'static str,
    pub repeats: u32,
    pub total: Duration,
}

impl TimingResult {
    /// Mean seconds per invocation.
    pub fn mean_secs(&self) -> f64 {
        self.total.as_secs_f64() / f64::from(self.repeats.max(1))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub timed: usize,
    pub skipped: usize,
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("routine {name} failed")]
    Routine {
        name: &'static str,
        #[source]
        source: RoutineError,
    },
    #[error("failed to write report")]
    Report(#[source] io::Error),
}

/// Routines the filter selects, in report order.
pub fn select<'a>(registry: &'a Registry, filter: &Regex) -> Vec<&'a Routine> {
    registry
        .sorted()
        .into_iter()
        .filter(|routine| filter.is_match(routine.name()))
        .collect()
}

/// Run every selected routine, reporting each one before moving to the next.
///
/// A routine whose library turns out to be missing is reported as skipped; any other routine
/// error stops the run.
pub fn run(
    registry: &Registry,
    config: &RunConfig,
    reporter: &mut dyn Reporter,
) -> Result<RunSummary, DriverError> {
    let mut summary = RunSummary::default();

    for routine in select(registry, &config.filter) {
        let name = routine.name();

        if let Some(reason) = routine.skip_reason() {
            reporter.skipped(name, reason).map_err(DriverError::Report)?;
            summary.skipped += 1;
            continue;
        }

        if let Availability::Unavailable(reason) = routine.availability() {
            log::debug!("{name} unavailable: {reason}");
            reporter.skipped(name, &reason).map_err(DriverError::Report)?;
            summary.skipped += 1;
            continue;
        }

        log::debug!("timing {name} ({} runs)", config.repeats);
        match time_routine(routine, config) {
            Ok(result) => {
                reporter.timed(&result).map_err(DriverError::Report)?;
                summary.timed += 1;
            }
            Err(RoutineError::Unavailable(reason)) => {
                reporter.skipped(name, &reason).map_err(DriverError::Report)?;
                summary.skipped += 1;
            }
            Err(source) => return Err(DriverError::Routine { name, source }),
        }
    }

    Ok(summary)
}

fn time_routine(routine: &Routine, config: &RunConfig) -> Result<TimingResult, RoutineError> {
    let start = Instant::now();
    for _ in 0..config.repeats {
        routine.invoke(&config.workload)?;
    }
    Ok(TimingResult {
        name: routine.name(),
        repeats: config.repeats,
        total: start.elapsed(),
    })
}
