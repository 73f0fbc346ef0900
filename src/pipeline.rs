//! Pipeline orchestration
//!
//! Drives path construction, column extraction and averaging over the study
//! tree and assembles the output documents.
//!
//! Pipeline stages per combination:
//! 1. StudyLayout - Build the expected file path
//! 2. ColumnReader - Extract and coerce the device's column
//! 3. Average - Mean of valid values, or the reason there is none
//! 4. Document - Append a record when an average was produced

use crate::average::Average;
use crate::encoder::JsonEncoder;
use crate::error::ComputeError;
use crate::layout::{participants, StudyLayout};
use crate::reader::{ColumnRead, ColumnReader};
use crate::types::{
    BvpDocument, BvpRecord, Condition, DeviceDocument, DeviceFile, MeasurementRecord,
    ParticipantId, Session,
};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Output file of the single-file run
pub const BVP_OUTPUT_FILE: &str = "empatica_bvp_post_baseline.json";

/// Output file of the all-files run
pub const ALL_DEVICES_OUTPUT_FILE: &str = "empatica_samsung_data.json";

/// Counts of what happened to each combination during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Combinations that produced a record
    pub produced: usize,
    /// Combinations whose file does not exist
    pub missing_files: usize,
    /// Files with no parsable value in the target column
    pub no_valid_values: usize,
    /// Files that exist but could not be opened or parsed
    pub unreadable_files: usize,
    /// Rows skipped across all files
    pub rejected_rows: usize,
}

/// Result of the single-file run
#[derive(Debug, Clone, PartialEq)]
pub struct BvpRun {
    pub document: BvpDocument,
    pub report: RunReport,
}

/// Result of the all-files run
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceRun {
    pub document: DeviceDocument,
    pub report: RunReport,
}

/// Average post/baseline Empatica BVP for every participant.
pub fn bvp_post_baseline(layout: &StudyLayout) -> BvpRun {
    let device = DeviceFile::EmpaticaBvp;
    let mut report = RunReport::default();
    let mut document = BvpDocument::new();

    for participant in participants() {
        let target = Target {
            participant,
            session: Session::Post,
            condition: Condition::Baseline,
            device,
        };
        if let Some(avg_bvp) = measure(layout, &target, &mut report) {
            document.push(BvpRecord {
                participant_id: participant,
                avg_bvp,
            });
        }
    }

    info!(
        produced = report.produced,
        missing_files = report.missing_files,
        no_valid_values = report.no_valid_values,
        rejected_rows = report.rejected_rows,
        "Single-file run finished"
    );

    BvpRun { document, report }
}

/// Average every device file for every participant, session and condition.
pub fn all_devices(layout: &StudyLayout) -> DeviceRun {
    let mut report = RunReport::default();
    let mut document = DeviceDocument::new();

    for participant in participants() {
        for condition in Condition::ALL {
            for session in Session::ALL {
                for device in DeviceFile::ALL {
                    let target = Target {
                        participant,
                        session,
                        condition,
                        device,
                    };
                    if let Some(avg_value) = measure(layout, &target, &mut report) {
                        document.push(
                            device,
                            session,
                            condition,
                            MeasurementRecord {
                                participant_id: participant,
                                avg_value,
                            },
                        );
                    }
                }
            }
        }
    }

    info!(
        produced = report.produced,
        missing_files = report.missing_files,
        no_valid_values = report.no_valid_values,
        unreadable_files = report.unreadable_files,
        rejected_rows = report.rejected_rows,
        "All-files run finished"
    );

    DeviceRun { document, report }
}

/// Run the single-file pipeline and write its summary into the study root
pub fn write_bvp_post_baseline(layout: &StudyLayout) -> Result<(BvpRun, PathBuf), ComputeError> {
    let run = bvp_post_baseline(layout);
    let path = layout.output_path(BVP_OUTPUT_FILE);
    JsonEncoder::new().write_to(&run.document, &path)?;
    Ok((run, path))
}

/// Run the all-files pipeline and write its summary into the study root
pub fn write_all_devices(layout: &StudyLayout) -> Result<(DeviceRun, PathBuf), ComputeError> {
    let run = all_devices(layout);
    let path = layout.output_path(ALL_DEVICES_OUTPUT_FILE);
    JsonEncoder::new().write_to(&run.document, &path)?;
    Ok((run, path))
}

/// One participant/session/condition/device combination
#[derive(Clone, Copy)]
struct Target {
    participant: ParticipantId,
    session: Session,
    condition: Condition,
    device: DeviceFile,
}

/// Read, average and log one combination. Never fails; every way of not
/// producing a value is logged and counted.
fn measure(layout: &StudyLayout, target: &Target, report: &mut RunReport) -> Option<f64> {
    let Target {
        participant,
        session,
        condition,
        device,
    } = *target;
    let path = layout.device_path(participant, session, condition, device);
    let column = device.column();

    let average = match ColumnReader::read(&path, column) {
        Ok(read) => {
            if let ColumnRead::Values(values) = &read {
                for rejected in &values.rejected {
                    warn!(
                        participant,
                        file = %path.display(),
                        row = rejected.row,
                        value = ?rejected.value,
                        fields = ?rejected.fields,
                        error = ?rejected.error,
                        "Invalid '{}' value",
                        column
                    );
                }
                debug!(
                    file = %path.display(),
                    rows = values.rows(),
                    rejected = values.rejected.len(),
                    "Read column '{}'",
                    column
                );
                report.rejected_rows += values.rejected.len();
            }
            Average::from_read(&read)
        }
        Err(e) => Average::Unreadable(e.to_string()),
    };

    match average {
        Average::Value(avg) => {
            debug!(
                participant,
                device = device.as_str(),
                session = session.as_str(),
                condition = condition.as_str(),
                avg,
                "Computed average"
            );
            report.produced += 1;
            Some(avg)
        }
        Average::NoFile => {
            warn!(
                participant,
                file = %path.display(),
                "File not found for {} in {} {}",
                device.file_name(),
                session.as_str(),
                condition.as_str()
            );
            report.missing_files += 1;
            None
        }
        Average::NoValidValues => {
            warn!(
                participant,
                file = %path.display(),
                "No valid '{}' values found for {} in {} {}",
                column,
                device.file_name(),
                session.as_str(),
                condition.as_str()
            );
            report.no_valid_values += 1;
            None
        }
        Average::Unreadable(reason) => {
            warn!(participant, file = %path.display(), %reason, "Skipping unreadable file");
            report.unreadable_files += 1;
            None
        }
    }
}
