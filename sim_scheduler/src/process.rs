//! Simulated process records

use core_types::{Pid, ProcessState};
use serde::{Deserialize, Serialize};

/// One simulated process and its runtime state
///
/// The first six fields describe the process as read from the workload.
/// The remaining fields are mutated only by the simulation clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// Unique process identifier
    pub pid: Pid,
    /// Scheduling priority; lower values are more urgent
    pub priority: i32,
    /// Tick at which the process is offered for admission
    pub arrival_time: u64,
    /// Total CPU ticks the process needs
    pub burst: u64,
    /// CPU ticks between I/O excursions (0 = never)
    pub io_frequency: u64,
    /// Ticks spent per I/O excursion
    pub io_duration: u64,

    /// CPU ticks still needed
    pub remaining_time: u64,
    /// Ticks elapsed in the current I/O excursion
    pub time_in_io: u64,
    /// CPU ticks executed since the last dispatch
    pub time_since_last_io: u64,
    /// Current lifecycle state
    pub state: ProcessState,
}

impl ProcessRecord {
    /// Creates a CPU-only process in the NEW state
    pub fn new(pid: Pid, priority: i32, arrival_time: u64, burst: u64) -> Self {
        Self {
            pid,
            priority,
            arrival_time,
            burst,
            io_frequency: 0,
            io_duration: 0,
            remaining_time: burst,
            time_in_io: 0,
            time_since_last_io: 0,
            state: ProcessState::New,
        }
    }

    /// Sets the I/O excursion pattern
    pub fn with_io(mut self, io_frequency: u64, io_duration: u64) -> Self {
        self.io_frequency = io_frequency;
        self.io_duration = io_duration;
        self
    }

    /// Checks if the process is due for an I/O excursion
    ///
    /// A process that has just consumed its last CPU tick terminates
    /// instead, so a zero `remaining_time` is never due.
    pub fn io_due(&self) -> bool {
        self.io_frequency > 0
            && self.time_since_last_io >= self.io_frequency
            && self.remaining_time > 0
    }

    /// Checks if the current I/O excursion has lasted long enough
    pub fn io_complete(&self) -> bool {
        self.time_in_io >= self.io_duration
    }
}
