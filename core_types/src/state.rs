//! Process lifecycle states

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a simulated process
///
/// There is no "idle" variant: an idle CPU is an empty slot,
/// not a process in some state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessState {
    /// Process exists but has not been admitted yet
    New,
    /// Process is waiting for the CPU
    Ready,
    /// Process is on the CPU
    Running,
    /// Process is on an I/O excursion
    Waiting,
    /// Process has consumed its whole burst
    Terminated,
}

impl ProcessState {
    /// Checks if the process can no longer change state
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProcessState::Terminated)
    }

    /// Upper-case name used in the execution table
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessState::New => "NEW",
            ProcessState::Ready => "READY",
            ProcessState::Running => "RUNNING",
            ProcessState::Waiting => "WAITING",
            ProcessState::Terminated => "TERMINATED",
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
