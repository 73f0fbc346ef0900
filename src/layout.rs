//! Study directory layout
//!
//! Input files live at
//! `<root>/data/survey_gamification/<participant>/<session>/<condition>/<device_file>.csv`
//! and summaries are written to `<root>`. The participant range and the
//! directory shape are fixed.

use crate::types::{Condition, DeviceFile, ParticipantId, Session};
use serde::Serialize;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// Participants enrolled in the study
pub const PARTICIPANT_IDS: RangeInclusive<ParticipantId> = 11..=24;

/// Data directory relative to the study root
pub const DATA_DIR: &str = "data/survey_gamification";

/// Iterate the enrolled participants in ascending order
pub fn participants() -> RangeInclusive<ParticipantId> {
    PARTICIPANT_IDS
}

/// Resolves input and output paths against a study root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyLayout {
    root: PathBuf,
}

impl Default for StudyLayout {
    fn default() -> Self {
        Self::new(".")
    }
}

impl StudyLayout {
    /// Create a layout rooted at `root` (normally the working directory)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Base directory holding one subdirectory per participant
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR)
    }

    /// Join the base directory with participant, session, condition and file name.
    ///
    /// Nothing is checked here; callers test for existence before opening.
    pub fn file_path(
        &self,
        participant: ParticipantId,
        session: Session,
        condition: Condition,
        file_name: &str,
    ) -> PathBuf {
        self.data_dir()
            .join(participant.to_string())
            .join(session.as_str())
            .join(condition.as_str())
            .join(file_name)
    }

    pub fn device_path(
        &self,
        participant: ParticipantId,
        session: Session,
        condition: Condition,
        device: DeviceFile,
    ) -> PathBuf {
        self.file_path(participant, session, condition, &device.file_name())
    }

    /// Where a summary file named `file_name` is written
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    /// Count expected and present input files for every device
    pub fn inventory(&self) -> Inventory {
        let devices = DeviceFile::ALL
            .iter()
            .map(|&device| {
                let mut expected = 0;
                let mut present = 0;
                for participant in participants() {
                    for session in Session::ALL {
                        for condition in Condition::ALL {
                            expected += 1;
                            if self
                                .device_path(participant, session, condition, device)
                                .is_file()
                            {
                                present += 1;
                            }
                        }
                    }
                }
                DeviceInventory {
                    device,
                    expected,
                    present,
                }
            })
            .collect();

        Inventory {
            data_dir: self.data_dir(),
            data_dir_exists: self.data_dir().is_dir(),
            devices,
        }
    }
}

/// File presence for one device across the whole study
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInventory {
    pub device: DeviceFile,
    pub expected: usize,
    pub present: usize,
}

/// File presence across the study tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inventory {
    pub data_dir: PathBuf,
    pub data_dir_exists: bool,
    pub devices: Vec<DeviceInventory>,
}

impl Inventory {
    pub fn total_present(&self) -> usize {
        self.devices.iter().map(|d| d.present).sum()
    }

    pub fn total_expected(&self) -> usize {
        self.devices.iter().map(|d| d.expected).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_participant_range() {
        let ids: Vec<_> = participants().collect();
        assert_eq!(ids.first(), Some(&11));
        assert_eq!(ids.last(), Some(&24));
        assert_eq!(ids.len(), 14);
        assert!(!PARTICIPANT_IDS.contains(&10));
        assert!(!PARTICIPANT_IDS.contains(&25));
    }

    #[test]
    fn test_file_path_segments() {
        let layout = StudyLayout::new("/study");
        let path = layout.file_path(
            11,
            Session::Post,
            Condition::Baseline,
            "empatica_bvp.csv",
        );
        assert_eq!(
            path,
            PathBuf::from("/study/data/survey_gamification/11/post/baseline/empatica_bvp.csv")
        );
    }

    #[test]
    fn test_device_path_uses_file_name() {
        let layout = StudyLayout::default();
        let path = layout.device_path(
            24,
            Session::Pre,
            Condition::CognitiveLoad,
            DeviceFile::SamsungBvp,
        );
        assert!(path.ends_with("24/pre/cognitive_load/samsung_bvp.csv"));
        assert_eq!(
            layout.output_path("out.json"),
            PathBuf::from("./out.json")
        );
    }

    #[test]
    fn test_inventory_counts_present_files() {
        let dir = tempfile::tempdir().unwrap();
        let layout = StudyLayout::new(dir.path());

        let inventory = layout.inventory();
        assert!(!inventory.data_dir_exists);
        assert_eq!(inventory.total_present(), 0);
        assert_eq!(inventory.total_expected(), 14 * 2 * 3 * 4);

        let path = layout.device_path(13, Session::Pre, Condition::Survey, DeviceFile::EmpaticaTemp);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "temp\n31.5\n").unwrap();

        let inventory = layout.inventory();
        assert!(inventory.data_dir_exists);
        let temp = inventory
            .devices
            .iter()
            .find(|d| d.device == DeviceFile::EmpaticaTemp)
            .unwrap();
        assert_eq!(temp.present, 1);
        assert_eq!(temp.expected, 84);
        assert_eq!(inventory.total_present(), 1);
    }
}
