//! Tick-driven simulation clock
//!
//! Each tick runs four phases in a fixed order:
//!
//! 1. **Admission**: processes arriving at this tick are offered to the
//!    admission oracle, once.
//! 2. **I/O aging**: waiting processes advance one tick through their
//!    excursion; finished ones become READY.
//! 3. **Execution**: the running process consumes one CPU tick, then may
//!    leave for I/O or terminate.
//! 4. **Dispatch**: an idle CPU takes the highest-priority READY process.
//!
//! Reordering the phases changes the tick stamped on transitions.

use crate::metrics;
use crate::{
    AdmissionOracle, PriorityOrdering, ProcessRecord, ProcessTable, QueueSet, RunReport,
    Transition, TransitionLog,
};
use core_types::{Pid, ProcessState, RunId};
use serde::{Deserialize, Serialize};
use sim_logger::{LogEntry, LogLevel, Logger};
use std::collections::{HashSet, VecDeque};
use thiserror::Error;

/// Tick ceiling used when none is configured
pub const DEFAULT_TICK_CEILING: u64 = 100_000;

/// Clock configuration
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// The run is aborted once the tick counter exceeds this value
    pub tick_ceiling: u64,
    /// Minimum level of diagnostics kept in the run report
    pub log_level: LogLevel,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_ceiling: DEFAULT_TICK_CEILING,
            log_level: LogLevel::Info,
        }
    }
}

/// Workload rejected before the first tick
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("PID {0} appears more than once in the workload")]
    DuplicatePid(Pid),

    #[error("PID {0} has a zero CPU burst")]
    ZeroBurst(Pid),
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The workload drained after `ticks_elapsed` ticks
    Completed { ticks_elapsed: u64 },
    /// The tick counter passed the ceiling and reached `tick`
    Timeout { tick: u64 },
}

/// Result of a single [`SimulationClock::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The tick with this number was simulated
    Advanced { tick: u64 },
    /// Nothing was simulated; the run is over
    Finished(RunOutcome),
}

/// Owns the workload and drives it one tick at a time
///
/// The CPU slot holds the PID of the running process, or nothing when the
/// CPU is idle.
pub struct SimulationClock<O, L> {
    config: SchedulerConfig,
    oracle: O,
    log: L,
    pending: VecDeque<ProcessRecord>,
    queues: QueueSet,
    running: Option<Pid>,
    tick: u64,
    outcome: Option<RunOutcome>,
    /// Every transition emitted so far, kept for metrics and tests
    audit_log: Vec<Transition>,
    logger: Logger,
    rejected: Vec<Pid>,
}

impl<O: AdmissionOracle, L: TransitionLog> SimulationClock<O, L> {
    /// Creates a clock with default configuration
    pub fn new(workload: Vec<ProcessRecord>, oracle: O, log: L) -> Result<Self, SchedulerError> {
        Self::with_config(workload, oracle, log, SchedulerConfig::default())
    }

    /// Creates a clock with custom configuration
    ///
    /// Processes are offered in arrival order; processes sharing an
    /// arrival tick keep their workload order.
    pub fn with_config(
        workload: Vec<ProcessRecord>,
        oracle: O,
        log: L,
        config: SchedulerConfig,
    ) -> Result<Self, SchedulerError> {
        let mut seen = HashSet::new();
        for record in &workload {
            if !seen.insert(record.pid) {
                return Err(SchedulerError::DuplicatePid(record.pid));
            }
            if record.burst == 0 {
                return Err(SchedulerError::ZeroBurst(record.pid));
            }
        }

        let mut pending: Vec<ProcessRecord> = workload
            .into_iter()
            .map(|mut record| {
                record.state = ProcessState::New;
                record.remaining_time = record.burst;
                record.time_in_io = 0;
                record.time_since_last_io = 0;
                record
            })
            .collect();
        pending.sort_by_key(|record| record.arrival_time);

        Ok(Self {
            logger: Logger::new(config.log_level),
            config,
            oracle,
            log,
            pending: pending.into(),
            queues: QueueSet::new(),
            running: None,
            tick: 0,
            outcome: None,
            audit_log: Vec::new(),
            rejected: Vec::new(),
        })
    }

    /// Simulates one tick
    ///
    /// Once the workload has drained or the ceiling has been passed,
    /// further calls do nothing and return the same outcome.
    pub fn step(&mut self) -> StepOutcome {
        if let Some(outcome) = self.outcome {
            return StepOutcome::Finished(outcome);
        }
        if self.is_drained() {
            let outcome = RunOutcome::Completed {
                ticks_elapsed: self.tick,
            };
            self.finish(outcome);
            return StepOutcome::Finished(outcome);
        }

        let tick = self.tick;
        self.admit_arrivals(tick);
        self.age_waiting(tick);
        self.execute_running(tick);
        self.dispatch(tick);
        debug_assert!(
            self.queues.misplaced().is_empty(),
            "queue placement out of sync at tick {tick}"
        );
        self.tick += 1;

        if self.tick > self.config.tick_ceiling {
            self.logger.log(
                LogEntry::new(LogLevel::Error, "simulation timeout")
                    .with_field("tick", self.tick)
                    .with_field("ceiling", self.config.tick_ceiling),
            );
            self.finish(RunOutcome::Timeout { tick: self.tick });
        }

        StepOutcome::Advanced { tick }
    }

    /// Runs until the workload drains or the ceiling is passed
    pub fn run(&mut self) -> RunReport {
        let outcome = loop {
            if let StepOutcome::Finished(outcome) = self.step() {
                break outcome;
            }
        };

        let (processes, summary) =
            metrics::collect(&self.queues.table, &self.audit_log, self.tick);
        RunReport {
            run_id: RunId::new(),
            outcome,
            processes,
            summary,
            rejected: self.rejected.clone(),
            diagnostics: self.logger.entries().to_vec(),
        }
    }

    /// The next tick to be simulated
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// PID occupying the CPU, if any
    pub fn running(&self) -> Option<Pid> {
        self.running
    }

    /// Looks up an admitted process
    pub fn record(&self, pid: Pid) -> Option<&ProcessRecord> {
        self.queues.table.get(pid)
    }

    /// All admitted processes, in admission order
    pub fn table(&self) -> &ProcessTable {
        &self.queues.table
    }

    /// READY PIDs in queue order
    pub fn ready_pids(&self) -> Vec<Pid> {
        self.queues.ready.iter().collect()
    }

    /// WAITING PIDs in queue order
    pub fn waiting_pids(&self) -> Vec<Pid> {
        self.queues.waiting.iter().collect()
    }

    /// PIDs the admission oracle turned away
    pub fn rejected(&self) -> &[Pid] {
        &self.rejected
    }

    /// Every transition emitted so far
    pub fn transitions(&self) -> &[Transition] {
        &self.audit_log
    }

    /// Diagnostics recorded so far
    pub fn diagnostics(&self) -> &[LogEntry] {
        self.logger.entries()
    }

    /// Outcome, once the run is over
    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    /// The transition log
    pub fn log(&self) -> &L {
        &self.log
    }

    /// Gives back the oracle and the transition log
    pub fn into_parts(self) -> (O, L) {
        (self.oracle, self.log)
    }

    /// Loop continuation test
    ///
    /// With something admitted, the workload drains when every admitted
    /// process has terminated. With nothing admitted yet, it drains only
    /// when no process is left to arrive.
    fn is_drained(&self) -> bool {
        if self.queues.table.is_empty() {
            self.pending.is_empty()
        } else {
            self.queues.table.all_terminated()
        }
    }

    fn admit_arrivals(&mut self, tick: u64) {
        while self
            .pending
            .front()
            .is_some_and(|record| record.arrival_time == tick)
        {
            let Some(record) = self.pending.pop_front() else {
                break;
            };
            let pid = record.pid;

            if self.oracle.admit(&record) {
                self.queues.admit(record);
                self.emit(tick, pid, ProcessState::New, ProcessState::Ready);
            } else {
                self.rejected.push(pid);
                self.logger.log(
                    LogEntry::new(LogLevel::Warn, "admission rejected")
                        .with_source(pid)
                        .with_field("tick", tick),
                );
            }
        }
    }

    fn age_waiting(&mut self, tick: u64) {
        let mut finished = Vec::new();
        for pid in self.queues.waiting.take_all() {
            let Some(record) = self.queues.table.get_mut(pid) else {
                continue;
            };
            record.time_in_io += 1;
            if record.io_complete() {
                record.state = ProcessState::Ready;
                record.time_in_io = 0;
                finished.push(pid);
            } else {
                self.queues.waiting.enqueue(pid);
            }
        }

        for pid in finished {
            self.queues.ready.enqueue(pid);
            self.emit(tick, pid, ProcessState::Waiting, ProcessState::Ready);
        }
    }

    fn execute_running(&mut self, tick: u64) {
        let Some(pid) = self.running else {
            return;
        };
        let Some(record) = self.queues.table.get_mut(pid) else {
            self.running = None;
            return;
        };

        record.remaining_time = record.remaining_time.saturating_sub(1);
        record.time_since_last_io += 1;

        let next = if record.io_due() {
            record.time_in_io = 0;
            ProcessState::Waiting
        } else if record.remaining_time == 0 {
            ProcessState::Terminated
        } else {
            return;
        };
        record.state = next;
        record.time_since_last_io = 0;
        self.running = None;

        if next == ProcessState::Waiting {
            self.queues.waiting.enqueue(pid);
        } else {
            self.oracle.release(pid);
        }
        self.emit(tick, pid, ProcessState::Running, next);
    }

    fn dispatch(&mut self, tick: u64) {
        if self.running.is_some() {
            return;
        }
        let table = &self.queues.table;
        let Some(pid) =
            PriorityOrdering::select(self.queues.ready.iter().filter_map(|pid| table.get(pid)))
        else {
            return;
        };

        self.queues.ready.remove(pid);
        if let Some(record) = self.queues.table.get_mut(pid) {
            record.state = ProcessState::Running;
            record.time_since_last_io = 0;
        }
        self.running = Some(pid);
        self.emit(tick, pid, ProcessState::Ready, ProcessState::Running);
        self.logger.log(
            LogEntry::new(LogLevel::Debug, "dispatched")
                .with_source(pid)
                .with_field("tick", tick),
        );
    }

    fn emit(&mut self, tick: u64, pid: Pid, from: ProcessState, to: ProcessState) {
        self.audit_log.push(Transition::new(tick, pid, from, to));
        self.log.record(tick, pid, from, to);
    }

    fn finish(&mut self, outcome: RunOutcome) {
        if let RunOutcome::Completed { ticks_elapsed } = outcome {
            self.logger.log(
                LogEntry::new(LogLevel::Info, "simulation complete")
                    .with_field("ticks", ticks_elapsed)
                    .with_field("admitted", self.queues.table.len())
                    .with_field(
                        "terminated",
                        self.queues.table.count_in(ProcessState::Terminated),
                    ),
            );
        }
        self.outcome = Some(outcome);
    }
}
