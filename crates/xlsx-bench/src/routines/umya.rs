//! `umya-spreadsheet` routine: the whole workbook is held as an object model, addressed one cell
//! at a time, then serialized on save.

use super::{feature_probe, RoutineError};
use crate::registry::{Availability, Routine};
use crate::workload::Workload;

const NAME: &str = "benchmark_umya_spreadsheet";
const FEATURE: &str = "umya";

pub const ARTIFACT: &str = "benchmark_umya_spreadsheet.xlsx";

pub(super) fn routine() -> Routine {
    Routine::new(NAME, imp::write).requires(probe)
}

fn probe() -> Availability {
    feature_probe(cfg!(feature = "umya"), FEATURE)
}

#[cfg(feature = "umya")]
mod imp {
    use super::{RoutineError, Workload, ARTIFACT};
    use crate::routines::SHEET_NAME;
    use crate::values::SampleValue;

    const LIBRARY: &str = "umya-spreadsheet";

    /// Per-cell writes through `get_cell_mut`. Coordinates are 1-based `(column, row)`.
    pub(super) fn write(workload: &Workload) -> Result<(), RoutineError> {
        let mut book = umya_spreadsheet::new_file_empty_worksheet();
        let sheet = book
            .new_sheet(SHEET_NAME)
            .map_err(|msg| RoutineError::Library {
                library: LIBRARY,
                source: msg.into(),
            })?;

        for (row, value) in workload.rows() {
            for column in workload.columns() {
                let coordinate = (u32::from(column) + 1, row + 1);
                match value {
                    SampleValue::Integer(n) => {
                        sheet.get_cell_mut(coordinate).set_value_number(n as f64);
                    }
                    SampleValue::Float(n) => {
                        sheet.get_cell_mut(coordinate).set_value_number(n);
                    }
                    SampleValue::Text(text) => {
                        sheet.get_cell_mut(coordinate).set_value_string(text);
                    }
                    // Touching the cell would create an empty entry; leave it out.
                    SampleValue::Null => {}
                }
            }
        }

        let path = workload.artifact_path(ARTIFACT);
        umya_spreadsheet::writer::xlsx::write(&book, &path)
            .map_err(RoutineError::library(LIBRARY))?;
        log::debug!("wrote {}", path.display());
        Ok(())
    }
}

#[cfg(not(feature = "umya"))]
mod imp {
    use super::{RoutineError, Workload, FEATURE};

    pub(super) fn write(_: &Workload) -> Result<(), RoutineError> {
        Err(RoutineError::Unavailable(super::super::missing_feature(
            FEATURE,
        )))
    }
}
