//! `simple_excel_writer` routine: rows are streamed into the sheet XML one at a time and the
//! package is zipped on close.

use super::{feature_probe, RoutineError};
use crate::registry::{Availability, Routine};
use crate::workload::Workload;

const NAME: &str = "benchmark_simple_excel_writer";
const FEATURE: &str = "simple_excel";

pub const ARTIFACT: &str = "benchmark_simple_excel_writer.xlsx";

pub(super) fn routine() -> Routine {
    Routine::new(NAME, imp::write).requires(probe)
}

fn probe() -> Availability {
    feature_probe(cfg!(feature = "simple_excel"), FEATURE)
}

#[cfg(feature = "simple_excel")]
mod imp {
    use simple_excel_writer::{CellValue, Row, Workbook};

    use super::{RoutineError, Workload, ARTIFACT};
    use crate::routines::SHEET_NAME;
    use crate::values::SampleValue;

    const LIBRARY: &str = "simple_excel_writer";

    fn cell(value: SampleValue) -> CellValue {
        match value {
            SampleValue::Integer(n) => CellValue::Number(n as f64),
            SampleValue::Float(n) => CellValue::Number(n),
            SampleValue::Text(text) => CellValue::String(text.to_string()),
            SampleValue::Null => CellValue::Blank(1),
        }
    }

    /// One `append_row` per grid row with typed cells.
    ///
    /// The workbook is built in memory: a file-backed workbook panics when the target can't
    /// be created, while the buffer route surfaces that as an I/O error.
    pub(super) fn write(workload: &Workload) -> Result<(), RoutineError> {
        let mut workbook = Workbook::create_in_memory();
        let mut sheet = workbook.create_sheet(SHEET_NAME);

        workbook.write_sheet(&mut sheet, |writer| {
            for (_, value) in workload.rows() {
                let cell = cell(value);
                writer.append_row(Row::from_iter(workload.columns().map(|_| cell.clone())))?;
            }
            Ok(())
        })?;

        let Some(bytes) = workbook.close()? else {
            return Err(RoutineError::Library {
                library: LIBRARY,
                source: "in-memory workbook returned no bytes".into(),
            });
        };

        let path = workload.artifact_path(ARTIFACT);
        std::fs::write(&path, bytes)?;
        log::debug!("wrote {}", path.display());
        Ok(())
    }
}

#[cfg(not(feature = "simple_excel"))]
mod imp {
    use super::{RoutineError, Workload, FEATURE};

    pub(super) fn write(_: &Workload) -> Result<(), RoutineError> {
        Err(RoutineError::Unavailable(super::super::missing_feature(
            FEATURE,
        )))
    }
}
