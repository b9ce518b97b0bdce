//! Run configuration

use crate::CliError;
use exec_log::DEFAULT_OUTPUT_FILE;
use sim_scheduler::SchedulerConfig;
use std::path::PathBuf;

/// Everything a single invocation needs
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Workload file to read
    pub input_path: PathBuf,
    /// Where the execution table is written
    pub output_path: PathBuf,
    /// Clock settings
    pub scheduler: SchedulerConfig,
    /// Admit at most this many unfinished processes (unlimited if `None`)
    pub resident_limit: Option<usize>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::new(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            scheduler: SchedulerConfig::default(),
            resident_limit: None,
        }
    }
}

impl RunConfig {
    /// Config for one input file, everything else defaulted
    pub fn for_input(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            ..Self::default()
        }
    }

    /// Builds a config from the process arguments, program name included
    ///
    /// Exactly one argument, the input file, is accepted.
    pub fn from_args(args: &[String]) -> Result<Self, CliError> {
        match args {
            [_, input] => Ok(Self::for_input(input)),
            _ => Err(CliError::ArgumentCount {
                found: args.len().saturating_sub(1),
            }),
        }
    }
}
