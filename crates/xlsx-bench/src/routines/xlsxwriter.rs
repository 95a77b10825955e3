//! `rust_xlsxwriter` routines: per-cell writes saved to a path, the same grid saved through an
//! in-memory buffer, and one `write_row` call per row.

use super::{feature_probe, RoutineError};
use crate::registry::{Availability, Routine};
use crate::workload::Workload;

const FEATURE: &str = "xlsxwriter";

pub const CELLS_ARTIFACT: &str = "benchmark_rust_xlsxwriter.xlsx";
pub const AUTOFIT_ARTIFACT: &str = "benchmark_rust_xlsxwriter_autofit.xlsx";
pub const BUFFER_ARTIFACT: &str = "benchmark_rust_xlsxwriter_buffer.xlsx";
/// Historical `.xslx` extension kept for parity with older result directories.
pub const ROWS_ARTIFACT: &str = "benchmark_rust_xlsxwriter_rows.xslx";

pub(super) fn routines() -> Vec<Routine> {
    vec![
        Routine::new("benchmark_rust_xlsxwriter", imp::write_cells).requires(probe),
        Routine::new("benchmark_rust_xlsxwriter_autofit", imp::write_cells_autofit)
            .requires(probe)
            .skip("autofit rescans every cell and swamps the write timing"),
        Routine::new("benchmark_rust_xlsxwriter_buffer", imp::write_buffered).requires(probe),
        Routine::new("benchmark_rust_xlsxwriter_rows", imp::write_rows).requires(probe),
    ]
}

fn probe() -> Availability {
    feature_probe(cfg!(feature = "xlsxwriter"), FEATURE)
}

#[cfg(feature = "xlsxwriter")]
mod imp {
    use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

    use super::{
        RoutineError, Workload, AUTOFIT_ARTIFACT, BUFFER_ARTIFACT, CELLS_ARTIFACT, ROWS_ARTIFACT,
    };
    use crate::routines::SHEET_NAME;
    use crate::values::SampleValue;

    const LIBRARY: &str = "rust_xlsxwriter";

    fn write_grid(worksheet: &mut Worksheet, workload: &Workload) -> Result<(), XlsxError> {
        for (row, value) in workload.rows() {
            for column in workload.columns() {
                // Without a format, a blank cell has nothing to store; leave it unwritten.
                match value {
                    SampleValue::Integer(n) => worksheet.write_number(row, column, n as f64)?,
                    SampleValue::Float(n) => worksheet.write_number(row, column, n)?,
                    SampleValue::Text(text) => worksheet.write_string(row, column, text)?,
                    SampleValue::Null => continue,
                };
            }
        }
        Ok(())
    }

    fn cell_workbook(workload: &Workload, autofit: bool) -> Result<Workbook, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;
        write_grid(worksheet, workload)?;
        if autofit {
            worksheet.autofit();
        }
        Ok(workbook)
    }

    fn save(
        workbook: &mut Workbook,
        workload: &Workload,
        file_name: &str,
    ) -> Result<(), RoutineError> {
        let path = workload.artifact_path(file_name);
        workbook.save(&path).map_err(RoutineError::library(LIBRARY))?;
        log::debug!("wrote {}", path.display());
        Ok(())
    }

    pub(super) fn write_cells(workload: &Workload) -> Result<(), RoutineError> {
        let mut workbook =
            cell_workbook(workload, false).map_err(RoutineError::library(LIBRARY))?;
        save(&mut workbook, workload, CELLS_ARTIFACT)
    }

    pub(super) fn write_cells_autofit(workload: &Workload) -> Result<(), RoutineError> {
        let mut workbook =
            cell_workbook(workload, true).map_err(RoutineError::library(LIBRARY))?;
        save(&mut workbook, workload, AUTOFIT_ARTIFACT)
    }

    /// Same grid as [`write_cells`], but the package is assembled in memory and written with a
    /// single file write.
    pub(super) fn write_buffered(workload: &Workload) -> Result<(), RoutineError> {
        let mut workbook =
            cell_workbook(workload, false).map_err(RoutineError::library(LIBRARY))?;
        let bytes = workbook
            .save_to_buffer()
            .map_err(RoutineError::library(LIBRARY))?;

        let path = workload.artifact_path(BUFFER_ARTIFACT);
        std::fs::write(&path, bytes)?;
        log::debug!("wrote {}", path.display());
        Ok(())
    }

    /// Every cell is written as text, one `write_row` call per row.
    pub(super) fn write_rows(workload: &Workload) -> Result<(), RoutineError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(SHEET_NAME)
            .map_err(RoutineError::library(LIBRARY))?;

        for (row, value) in workload.rows() {
            let text = value.to_string();
            worksheet
                .write_row(row, 0, workload.columns().map(|_| text.as_str()))
                .map_err(RoutineError::library(LIBRARY))?;
        }

        save(&mut workbook, workload, ROWS_ARTIFACT)
    }
}

#[cfg(not(feature = "xlsxwriter"))]
mod imp {
    use super::{RoutineError, Workload, FEATURE};

    macro_rules! unavailable_bodies {
        ($($name:ident),* $(,)?) => {
            $(
                pub(super) fn $name(_: &Workload) -> Result<(), RoutineError> {
                    Err(RoutineError::Unavailable(super::super::missing_feature(FEATURE)))
                }
            )*
        };
    }

    unavailable_bodies!(write_cells, write_cells_autofit, write_buffered, write_rows);
}
