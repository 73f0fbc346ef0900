//! Core types for the survey-signals pipeline
//!
//! This module defines the study dimensions (session, condition, device file),
//! the per-participant records, and the two output documents.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Participant identifier as it appears in the data directory
pub type ParticipantId = u32;

/// Measurement timing relative to the experimental intervention
///
/// Declaration order is the key order in the nested output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Session {
    Post,
    Pre,
}

impl Session {
    /// Traversal order used by the all-files run
    pub const ALL: [Session; 2] = [Session::Pre, Session::Post];

    pub fn as_str(&self) -> &'static str {
        match self {
            Session::Pre => "pre",
            Session::Post => "post",
        }
    }
}

/// Experimental condition under which a session was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Baseline,
    CognitiveLoad,
    Survey,
}

impl Condition {
    pub const ALL: [Condition; 3] = [
        Condition::Baseline,
        Condition::CognitiveLoad,
        Condition::Survey,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Baseline => "baseline",
            Condition::CognitiveLoad => "cognitive_load",
            Condition::Survey => "survey",
        }
    }
}

/// Per-device CSV export, one file per session/condition directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceFile {
    EmpaticaBvp,
    EmpaticaEda,
    EmpaticaTemp,
    SamsungBvp,
}

impl DeviceFile {
    pub const ALL: [DeviceFile; 4] = [
        DeviceFile::EmpaticaBvp,
        DeviceFile::EmpaticaEda,
        DeviceFile::EmpaticaTemp,
        DeviceFile::SamsungBvp,
    ];

    /// File stem, also the top-level key in the nested document
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceFile::EmpaticaBvp => "empatica_bvp",
            DeviceFile::EmpaticaEda => "empatica_eda",
            DeviceFile::EmpaticaTemp => "empatica_temp",
            DeviceFile::SamsungBvp => "samsung_bvp",
        }
    }

    /// File name inside a condition directory
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.as_str())
    }

    /// Header of the column averaged for this device
    pub fn column(&self) -> &'static str {
        match self {
            DeviceFile::EmpaticaBvp => "bvp",
            DeviceFile::EmpaticaEda => "eda",
            DeviceFile::EmpaticaTemp => "temp",
            DeviceFile::SamsungBvp => "PPG GREEN",
        }
    }
}

/// One participant's average BVP in the single-file run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BvpRecord {
    pub participant_id: ParticipantId,
    pub avg_bvp: f64,
}

/// One participant's average for a device/session/condition combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub participant_id: ParticipantId,
    pub avg_value: f64,
}

/// Flat output of the single-file run, in participant order
pub type BvpDocument = Vec<BvpRecord>;

type ConditionTable = BTreeMap<Condition, Vec<MeasurementRecord>>;
type SessionTable = BTreeMap<Session, ConditionTable>;

/// Nested output of the all-files run: device → session → condition → records
///
/// Every leaf list exists from construction, so combinations without data
/// serialize as empty arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceDocument {
    devices: BTreeMap<DeviceFile, SessionTable>,
}

impl Default for DeviceDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceDocument {
    /// Create a document with an empty list for every combination
    pub fn new() -> Self {
        let devices = DeviceFile::ALL
            .iter()
            .map(|device| {
                let sessions = Session::ALL
                    .iter()
                    .map(|session| {
                        let conditions = Condition::ALL
                            .iter()
                            .map(|condition| (*condition, Vec::new()))
                            .collect();
                        (*session, conditions)
                    })
                    .collect();
                (*device, sessions)
            })
            .collect();

        Self { devices }
    }

    /// Append a record to the list for one combination
    pub fn push(
        &mut self,
        device: DeviceFile,
        session: Session,
        condition: Condition,
        record: MeasurementRecord,
    ) {
        self.devices
            .entry(device)
            .or_default()
            .entry(session)
            .or_default()
            .entry(condition)
            .or_default()
            .push(record);
    }

    /// Records for one combination, in insertion order
    pub fn records(
        &self,
        device: DeviceFile,
        session: Session,
        condition: Condition,
    ) -> &[MeasurementRecord] {
        self.devices
            .get(&device)
            .and_then(|sessions| sessions.get(&session))
            .and_then(|conditions| conditions.get(&condition))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of records across all combinations
    pub fn len(&self) -> usize {
        self.devices
            .values()
            .flat_map(|sessions| sessions.values())
            .flat_map(|conditions| conditions.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
