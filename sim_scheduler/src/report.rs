//! Run report

use crate::{ProcessMetrics, RunOutcome, RunSummary};
use core_types::{Pid, RunId};
use serde::Serialize;
use sim_logger::{LogEntry, LogLevel};

/// Everything known about a finished run apart from the transitions
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: RunId,
    pub outcome: RunOutcome,
    /// Admitted processes, in admission order
    pub processes: Vec<ProcessMetrics>,
    pub summary: RunSummary,
    /// PIDs turned away by the admission oracle
    pub rejected: Vec<Pid>,
    pub diagnostics: Vec<LogEntry>,
}

impl RunReport {
    /// Returns true if the run hit the tick ceiling
    pub fn timed_out(&self) -> bool {
        matches!(self.outcome, RunOutcome::Timeout { .. })
    }

    /// Diagnostics at `level` and above
    pub fn diagnostics_at_least(&self, level: LogLevel) -> impl Iterator<Item = &LogEntry> {
        self.diagnostics.iter().filter(move |entry| entry.level >= level)
    }

    /// Metrics for one process
    pub fn process(&self, pid: Pid) -> Option<&ProcessMetrics> {
        self.processes.iter().find(|metrics| metrics.pid == pid)
    }
}
