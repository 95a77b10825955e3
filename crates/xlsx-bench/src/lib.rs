//! Wall-clock write benchmarks for spreadsheet-writing libraries.
//!
//! Every routine fills a `rows × columns` grid with a repeating set of sample values (integer,
//! empty, text, float), saves the result to disk, and is timed over a fixed number of runs.
//! The harness reports the mean time per run; it does not check what the libraries wrote.
//!
//! ```text
//! $ xlsx_bench --filter xlsxwriter --tests 3
//! benchmark_rust_xlsxwriter      0.412345
//! # SKIP benchmark_rust_xlsxwriter_autofit (autofit rescans every cell and swamps the write timing)
//! ...
//! ```

pub mod cli;
pub mod driver;
pub mod registry;
pub mod report;
pub mod routines;
pub mod values;
pub mod workload;

pub use driver::{run, DriverError, RunConfig, RunSummary, TimingResult};
pub use registry::{Availability, Registry, RegistryError, Routine};
pub use routines::{builtin, RoutineError};
pub use workload::Workload;
