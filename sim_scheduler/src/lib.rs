//! # Priority Scheduling Simulator
//!
//! A deterministic, tick-driven simulation of one CPU running a batch of
//! processes under non-preemptive strict-priority scheduling.
//!
//! ## Philosophy
//!
//! - **Determinism first**: Same workload + same oracle => same transitions.
//! - **One owner per record**: Process records live in a single table; queues
//!   and the CPU slot refer to them by PID.
//! - **No preemption**: A running process leaves the CPU only for I/O or
//!   because it finished.
//! - **Explicit ticks**: Time advances only through [`SimulationClock::step`].
//!
//! ## Collaborators
//!
//! - [`AdmissionOracle`] decides, once per process, whether it is admitted.
//! - [`TransitionLog`] receives every state change as it happens.

mod admission;
mod clock;
pub mod metrics;
mod ordering;
mod process;
mod queues;
mod report;
mod transition;

pub use admission::{AdmissionOracle, AdmitAll, ResidentLimit};
pub use clock::{
    RunOutcome, SchedulerConfig, SchedulerError, SimulationClock, StepOutcome,
    DEFAULT_TICK_CEILING,
};
pub use metrics::{ProcessMetrics, RunSummary};
pub use ordering::PriorityOrdering;
pub use process::ProcessRecord;
pub use queues::{PidQueue, ProcessTable, QueueSet};
pub use report::RunReport;
pub use transition::{Transition, TransitionLog};
