//! Survey Signals - per-participant biosignal averages for the survey gamification study
//!
//! Signals walks the study tree, averages one column of every wearable CSV
//! export and writes summary JSON: path layout → column extraction →
//! averaging → document assembly → JSON encoding.
//!
//! ## Runs
//!
//! - **Single-file**: Empatica BVP, post session, baseline condition, as a flat list
//! - **All-files**: every device, session and condition as a nested mapping

pub mod average;
pub mod encoder;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod reader;
pub mod types;

pub use average::{mean, Average};
pub use error::ComputeError;
pub use layout::{StudyLayout, PARTICIPANT_IDS};
pub use pipeline::{
    all_devices, bvp_post_baseline, write_all_devices, write_bvp_post_baseline, RunReport,
    ALL_DEVICES_OUTPUT_FILE, BVP_OUTPUT_FILE,
};

/// Signals version reported by the CLI
pub const SIGNALS_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name reported by the CLI
pub const PRODUCER_NAME: &str = "survey-signals";
