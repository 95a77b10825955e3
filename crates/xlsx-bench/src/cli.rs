use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use regex::Regex;

use crate::driver::{self, DriverError, RunConfig, DEFAULT_REPEATS};
use crate::report::{self, JsonReporter, OutputFormat, TextReporter};
use crate::routines;
use crate::workload::{Workload, DEFAULT_COLUMNS, DEFAULT_ROWS, MAX_COLUMNS, MAX_ROWS};

#[derive(Parser, Debug)]
#[command(about = "Simple write benchmark for spreadsheet-writing libraries.")]
pub struct Args {
    /// Only run routines whose name matches this regex (searched anywhere in the name).
    #[arg(long, short = 'f', value_name = "REGEX", value_parser = parse_filter)]
    filter: Option<Regex>,

    /// Number of timed runs per routine.
    #[arg(
        long,
        short = 't',
        visible_alias = "repeats",
        value_name = "N",
        default_value_t = DEFAULT_REPEATS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    tests: u32,

    /// Number of spreadsheet columns (at most 16384).
    #[arg(
        long,
        short = 'c',
        value_name = "N",
        default_value_t = DEFAULT_COLUMNS,
        value_parser = clap::value_parser!(u16).range(0..=i64::from(MAX_COLUMNS))
    )]
    columns: u16,

    /// Number of spreadsheet rows (at most 1048576).
    #[arg(
        long,
        short = 'r',
        value_name = "N",
        default_value_t = DEFAULT_ROWS,
        value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_ROWS))
    )]
    rows: u32,

    /// Directory the benchmark artifacts are written to (created if missing).
    #[arg(long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// List the selected routines and their status without running anything.
    #[arg(long)]
    list: bool,
}

fn parse_filter(input: &str) -> Result<Regex, regex::Error> {
    Regex::new(input)
}

/// Install the stderr logger. `RUST_LOG` overrides the default `warn` level.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("warn");
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

pub fn run() -> Result<()> {
    init_logging();
    let args = Args::parse();
    run_with_args(args)
}

pub fn run_with_args(args: Args) -> Result<()> {
    let registry = routines::builtin().context("register built-in routines")?;
    let filter = match args.filter {
        Some(filter) => filter,
        None => Regex::new("").context("build match-all filter")?,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.list {
        let selected = driver::select(&registry, &filter);
        return quiet_broken_pipe(report::write_listing(&mut out, selected))
            .context("write routine listing");
    }

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("create output directory {}", args.output_dir.display()))?;

    let config = RunConfig {
        filter,
        repeats: args.tests,
        workload: Workload::new(args.rows, args.columns, args.output_dir),
    };
    log::info!(
        "{} rows x {} columns, {} runs per routine, artifacts in {}",
        config.workload.rows,
        config.workload.columns,
        config.repeats,
        config.workload.output_dir.display()
    );

    let outcome = match args.format {
        OutputFormat::Text => driver::run(&registry, &config, &mut TextReporter::new(&mut out)),
        OutputFormat::Json => driver::run(&registry, &config, &mut JsonReporter::new(&mut out)),
    };

    match outcome {
        Ok(summary) => {
            log::info!("{} timed, {} skipped", summary.timed, summary.skipped);
            Ok(())
        }
        // Downstream reader went away (e.g. `| head`); nothing left to report to.
        Err(DriverError::Report(err)) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn quiet_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
