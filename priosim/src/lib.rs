//! # priosim
//!
//! Command-line front end for the priority scheduling simulator.
//!
//! ## Philosophy
//!
//! - **Host owns I/O**: The simulation never touches files; this crate
//!   reads the workload and writes the execution table.
//! - **Fail before the first tick**: Bad arguments or bad input stop the
//!   run before anything is simulated.
//! - **One exit code for failure**: Every fatal error exits with -1.

mod config;

pub use config::RunConfig;

use exec_log::{ExecLogError, ExecutionTable};
use sim_logger::LogLevel;
use sim_scheduler::{
    AdmissionOracle, AdmitAll, ResidentLimit, RunReport, SchedulerError, SimulationClock,
};
use thiserror::Error;
use workload::WorkloadError;

/// Fatal errors of a run
#[derive(Debug, Error)]
pub enum CliError {
    #[error("expected exactly one input file, found {found} arguments")]
    ArgumentCount { found: usize },

    #[error(transparent)]
    Workload(#[from] WorkloadError),

    #[error("Invalid workload: {0}")]
    Scheduler(#[from] SchedulerError),

    #[error(transparent)]
    Output(#[from] ExecLogError),

    #[error("Unable to render report: {0}")]
    Report(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        -1
    }
}

/// A finished run: the report plus the execution table that was written
#[derive(Debug)]
pub struct RunOutput {
    pub report: RunReport,
    pub table: ExecutionTable,
}

/// Loads the workload, simulates it and writes the execution table
pub fn run(config: &RunConfig) -> Result<RunOutput, CliError> {
    let processes = workload::load_workload(&config.input_path)?;
    let oracle: Box<dyn AdmissionOracle> = match config.resident_limit {
        Some(limit) => Box::new(ResidentLimit::new(limit)),
        None => Box::new(AdmitAll),
    };
    let mut clock = SimulationClock::with_config(
        processes,
        oracle,
        ExecutionTable::new(),
        config.scheduler.clone(),
    )?;

    let report = clock.run();
    let (_, table) = clock.into_parts();
    table.write_to(&config.output_path)?;

    Ok(RunOutput { report, table })
}

/// Diagnostic lines shown on stderr
pub fn warnings(report: &RunReport) -> Vec<String> {
    report
        .diagnostics_at_least(LogLevel::Warn)
        .map(|entry| entry.to_string())
        .collect()
}

/// Pretty JSON rendering of the report
pub fn render_report(report: &RunReport) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(report)?)
}
