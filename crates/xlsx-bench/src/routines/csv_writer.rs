use super::{feature_probe, RoutineError};
use crate::registry::{Availability, Routine};
use crate::workload::Workload;

const NAME: &str = "benchmark_csv";
const FEATURE: &str = "csv";

/// Historical artifact name (typo included) so old result directories still line up.
pub const ARTIFACT: &str = "benchmark_scv.csv";

pub(super) fn routine() -> Routine {
    Routine::new(NAME, imp::write).requires(probe)
}

fn probe() -> Availability {
    feature_probe(cfg!(feature = "csv"), FEATURE)
}

#[cfg(feature = "csv")]
mod imp {
    use super::{RoutineError, Workload, ARTIFACT};

    /// One record per row, the row's value repeated in every column.
    pub(super) fn write(workload: &Workload) -> Result<(), RoutineError> {
        let path = workload.artifact_path(ARTIFACT);
        let mut writer = csv::Writer::from_path(&path).map_err(RoutineError::library("csv"))?;

        for (_, value) in workload.rows() {
            let field = value.to_string();
            writer
                .write_record(workload.columns().map(|_| field.as_str()))
                .map_err(RoutineError::library("csv"))?;
        }

        writer.flush()?;
        log::debug!("wrote {}", path.display());
        Ok(())
    }
}

#[cfg(not(feature = "csv"))]
mod imp {
    use super::{RoutineError, Workload, FEATURE};

    pub(super) fn write(_: &Workload) -> Result<(), RoutineError> {
        Err(RoutineError::Unavailable(super::super::missing_feature(
            FEATURE,
        )))
    }
}
