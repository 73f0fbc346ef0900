//! Signals CLI - Command-line interface for survey-signals
//!
//! Commands:
//! - bvp: Average post/baseline Empatica BVP into a flat list
//! - all: Average every device, session and condition into a nested mapping
//! - doctor: Diagnose the study tree

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use survey_signals::layout::{Inventory, StudyLayout, DATA_DIR};
use survey_signals::{
    write_all_devices, write_bvp_post_baseline, ComputeError, PRODUCER_NAME, SIGNALS_VERSION,
};

/// Signals - per-participant biosignal averages for the survey gamification study
#[derive(Parser)]
#[command(name = "signals")]
#[command(author = "Synheart AI Inc")]
#[command(version = SIGNALS_VERSION)]
#[command(about = "Average wearable CSV exports into summary JSON", long_about = None)]
struct Cli {
    /// Study root containing data/survey_gamification; summaries are written here
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Average post/baseline Empatica BVP per participant (flat list)
    Bvp,

    /// Average every device file per participant, session and condition (nested mapping)
    All,

    /// Diagnose the study tree
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

/// Warnings go to stdout alongside the completion message
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(verbose >= 2)
        .with_writer(std::io::stdout)
        .init();
}

fn run(cli: Cli) -> Result<(), SignalsCliError> {
    let layout = StudyLayout::new(cli.root);

    match cli.command {
        Commands::Bvp => {
            let (_, path) = write_bvp_post_baseline(&layout)?;
            println!("Data has been processed and saved to {}", display_name(&layout, &path));
            Ok(())
        }
        Commands::All => {
            let (_, path) = write_all_devices(&layout)?;
            println!("Data has been saved to {}", display_name(&layout, &path));
            Ok(())
        }
        Commands::Doctor { json } => cmd_doctor(&layout, json),
    }
}

/// Bare file name when running in the working directory, full path otherwise
fn display_name(layout: &StudyLayout, path: &Path) -> String {
    if layout.root() == Path::new(".") {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    } else {
        path.display().to_string()
    }
}

fn cmd_doctor(layout: &StudyLayout, json: bool) -> Result<(), SignalsCliError> {
    let inventory = layout.inventory();
    let checks = doctor_checks(&inventory);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: SIGNALS_VERSION.to_string(),
        checks,
        inventory,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Signals Doctor Report");
        println!("=====================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(SignalsCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

fn doctor_checks(inventory: &Inventory) -> Vec<DoctorCheck> {
    let mut checks = vec![DoctorCheck {
        name: "signals_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Signals version {}", SIGNALS_VERSION),
    }];

    if !inventory.data_dir_exists {
        checks.push(DoctorCheck {
            name: "data_dir".to_string(),
            status: CheckStatus::Error,
            message: format!(
                "{} does not exist (expected {} under the study root)",
                inventory.data_dir.display(),
                DATA_DIR
            ),
        });
        return checks;
    }

    checks.push(DoctorCheck {
        name: "data_dir".to_string(),
        status: CheckStatus::Ok,
        message: format!("{} found", inventory.data_dir.display()),
    });

    let files_status = if inventory.total_present() == 0 {
        CheckStatus::Warning
    } else {
        CheckStatus::Ok
    };
    checks.push(DoctorCheck {
        name: "files".to_string(),
        status: files_status,
        message: format!(
            "{}/{} files present across all devices",
            inventory.total_present(),
            inventory.total_expected()
        ),
    });

    for device in &inventory.devices {
        let status = if device.present == 0 {
            CheckStatus::Warning
        } else {
            CheckStatus::Ok
        };
        checks.push(DoctorCheck {
            name: device.device.as_str().to_string(),
            status,
            message: format!("{}/{} files present", device.present, device.expected),
        });
    }

    checks
}

// Error types

#[derive(Debug)]
enum SignalsCliError {
    Compute(ComputeError),
    Json(serde_json::Error),
    DoctorFailed,
}

impl From<ComputeError> for SignalsCliError {
    fn from(e: ComputeError) -> Self {
        SignalsCliError::Compute(e)
    }
}

impl From<serde_json::Error> for SignalsCliError {
    fn from(e: serde_json::Error) -> Self {
        SignalsCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<SignalsCliError> for CliError {
    fn from(e: SignalsCliError) -> Self {
        match e {
            SignalsCliError::Compute(e @ ComputeError::WriteFailed { .. }) => CliError {
                code: "WRITE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check that the study root is writable".to_string()),
            },
            SignalsCliError::Compute(e) => CliError {
                code: "COMPUTE_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            SignalsCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            SignalsCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Run from the directory containing data/survey_gamification or pass --root".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
    inventory: Inventory,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
