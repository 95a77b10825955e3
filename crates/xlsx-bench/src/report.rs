//! Result output. Each line is written as soon as the driver produces it.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use crate::driver::TimingResult;
use crate::registry::{Availability, Routine};

/// Width the routine name is padded to in text output.
pub const NAME_WIDTH: usize = 30;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub trait Reporter {
    fn skipped(&mut self, name: &str, reason: &str) -> io::Result<()>;
    fn timed(&mut self, result: &TimingResult) -> io::Result<()>;
}

/// `# SKIP <name> (<reason>)` and `<name:30> <mean seconds, 6 decimals>` lines.
pub struct TextReporter<W> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn skipped(&mut self, name: &str, reason: &str) -> io::Result<()> {
        writeln!(self.out, "# SKIP {name} ({reason})")
    }

    fn timed(&mut self, result: &TimingResult) -> io::Result<()> {
        writeln!(
            self.out,
            "{:<width$} {:.6}",
            result.name,
            result.mean_secs(),
            width = NAME_WIDTH
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum JsonLine<'a> {
    Skipped {
        name: &'a str,
        reason: &'a str,
    },
    Ok {
        name: &'a str,
        repeats: u32,
        total_secs: f64,
        mean_secs: f64,
    },
}

/// One JSON object per line.
pub struct JsonReporter<W> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &JsonLine<'_>) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, line)?;
        self.out.write_all(b"\n")
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn skipped(&mut self, name: &str, reason: &str) -> io::Result<()> {
        self.write_line(&JsonLine::Skipped { name, reason })
    }

    fn timed(&mut self, result: &TimingResult) -> io::Result<()> {
        self.write_line(&JsonLine::Ok {
            name: result.name,
            repeats: result.repeats,
            total_secs: result.total.as_secs_f64(),
            mean_secs: result.mean_secs(),
        })
    }
}

/// What `--list` prints for a routine.
pub fn routine_status(routine: &Routine) -> String {
    if let Some(reason) = routine.skip_reason() {
        return format!("skip: {reason}");
    }
    match routine.availability() {
        Availability::Available => "ok".to_string(),
        Availability::Unavailable(reason) => format!("unavailable: {reason}"),
    }
}

pub fn write_listing<'a>(
    out: &mut impl Write,
    routines: impl IntoIterator<Item = &'a Routine>,
) -> io::Result<()> {
    for routine in routines {
        writeln!(out, "{:<40} {}", routine.name(), routine_status(routine))?;
    }
    Ok(())
}
