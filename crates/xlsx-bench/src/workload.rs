use std::path::{Path, PathBuf};

use crate::values::{sample_cycle, SampleValue};

pub const DEFAULT_ROWS: u32 = 1000;
pub const DEFAULT_COLUMNS: u16 = 100;

/// Largest grid an `.xlsx` worksheet can hold.
pub const MAX_ROWS: u32 = 1_048_576;
pub const MAX_COLUMNS: u16 = 16_384;

/// Grid dimensions and artifact location shared by every routine in a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Workload {
    pub rows: u32,
    pub columns: u16,
    pub output_dir: PathBuf,
}

impl Default for Workload {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Workload {
    pub fn new(rows: u32, columns: u16, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            rows,
            columns,
            output_dir: output_dir.into(),
        }
    }

    /// Zero-based row indices paired with a fresh value cycle.
    pub fn rows(&self) -> impl Iterator<Item = (u32, SampleValue)> {
        (0..self.rows).zip(sample_cycle())
    }

    pub fn columns(&self) -> impl Iterator<Item = u16> {
        0..self.columns
    }

    pub fn artifact_path(&self, file_name: &str) -> PathBuf {
        join_artifact(&self.output_dir, file_name)
    }
}

fn join_artifact(dir: &Path, file_name: &str) -> PathBuf {
    // Keep bare relative names for the default `.` directory so log lines match what the user
    // sees in their working directory.
    if dir.as_os_str().is_empty() || dir == Path::new(".") {
        PathBuf::from(file_name)
    } else {
        dir.join(file_name)
    }
}
