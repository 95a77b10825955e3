//! Built-in routines, one submodule per library under test.
//!
//! Each routine is a straight call sequence into a library's public API: create a workbook,
//! write every cell of the workload grid, save. Nothing is shared between routines.

mod csv_writer;
mod simple_excel;
mod umya;
mod xlsxwriter;

use thiserror::Error;

use crate::registry::{Availability, Registry, RegistryError, Routine};

pub use csv_writer::ARTIFACT as CSV_ARTIFACT;
pub use simple_excel::ARTIFACT as SIMPLE_EXCEL_ARTIFACT;
pub use umya::ARTIFACT as UMYA_ARTIFACT;
pub use xlsxwriter::{
    AUTOFIT_ARTIFACT as XLSXWRITER_AUTOFIT_ARTIFACT,
    BUFFER_ARTIFACT as XLSXWRITER_BUFFER_ARTIFACT, CELLS_ARTIFACT as XLSXWRITER_ARTIFACT,
    ROWS_ARTIFACT as XLSXWRITER_ROWS_ARTIFACT,
};

/// Name of the single worksheet every spreadsheet routine writes.
pub const SHEET_NAME: &str = "Sheet1";

#[derive(Debug, Error)]
pub enum RoutineError {
    /// The library the routine exercises is not part of this build.
    #[error("{0}")]
    Unavailable(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{library} error")]
    Library {
        library: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl RoutineError {
    /// `map_err` adapter wrapping a library's own error type.
    pub(crate) fn library<E>(library: &'static str) -> impl FnOnce(E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        move |err| RoutineError::Library {
            library,
            source: Box::new(err),
        }
    }
}

pub(crate) fn missing_feature(feature: &str) -> String {
    format!("built without the `{feature}` feature")
}

fn feature_probe(enabled: bool, feature: &str) -> Availability {
    if enabled {
        Availability::Available
    } else {
        Availability::Unavailable(missing_feature(feature))
    }
}

/// Every routine this build knows about, including skipped and unavailable ones.
pub fn builtin() -> Result<Registry, RegistryError> {
    let mut registry = Registry::new();
    let routines: Vec<Routine> = [
        csv_writer::routine(),
        simple_excel::routine(),
        umya::routine(),
    ]
    .into_iter()
    .chain(xlsxwriter::routines())
    .collect();
    for routine in routines {
        registry.register(routine)?;
    }
    Ok(registry)
}
