//! Scenario Test Utilities
//!
//! Shared helpers for end-to-end scheduling scenarios.
//!
//! ## Test Philosophy
//!
//! - **Observable output only**: Scenarios are checked against the
//!   execution table a user would read, not internal state.
//! - **Invariants every tick**: Stepped runs check CPU and queue
//!   consistency after each tick, not just at the end.
//! - **Reproducible**: Workloads are literal text; nothing is random.

use core_types::{Pid, ProcessState};
use priosim::{RunConfig, RunOutput};
use sim_scheduler::{AdmitAll, SimulationClock, StepOutcome, Transition};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// One parsed row of `execution.txt`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub tick: u64,
    pub pid: u32,
    pub from: String,
    pub to: String,
}

impl Row {
    pub fn new(tick: u64, pid: u32, from: ProcessState, to: ProcessState) -> Self {
        Self {
            tick,
            pid,
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// A workload file inside a scratch directory
pub struct Scratch {
    dir: TempDir,
    pub config: RunConfig,
}

impl Scratch {
    /// Writes `workload` to a fresh directory and points the config at it
    pub fn with_workload(workload: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let input_path = dir.path().join("input.txt");
        fs::write(&input_path, workload).expect("Failed to write workload");
        let config = RunConfig {
            input_path,
            output_path: dir.path().join("execution.txt"),
            ..RunConfig::default()
        };
        Self { dir, config }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Runs the workload through the full pipeline
    pub fn run(&self) -> RunOutput {
        priosim::run(&self.config).expect("Run failed")
    }

    /// Data rows of the written execution table
    pub fn rows(&self) -> Vec<Row> {
        let text = fs::read_to_string(&self.config.output_path).expect("No execution table");
        parse_rows(&text)
    }
}

/// Parses the data rows of an execution table, skipping borders and titles
pub fn parse_rows(text: &str) -> Vec<Row> {
    text.lines()
        .filter(|line| line.starts_with('|'))
        .filter_map(|line| {
            let cells: Vec<&str> = line
                .trim_matches('|')
                .split('|')
                .map(str::trim)
                .collect();
            match cells.as_slice() {
                [tick, pid, from, to] => Some(Row {
                    tick: tick.parse().ok()?,
                    pid: pid.parse().ok()?,
                    from: from.to_string(),
                    to: to.to_string(),
                }),
                _ => None,
            }
        })
        .collect()
}

/// Runs parsed workload text to completion, stepping and checking invariants
pub fn stepped_run(workload: &str) -> Vec<Transition> {
    let processes = workload::parse_workload(workload).expect("Invalid workload");
    let mut clock =
        SimulationClock::new(processes, AdmitAll, Vec::new()).expect("Invalid workload");
    let mut remaining: Vec<(Pid, u64)> = Vec::new();

    while let StepOutcome::Advanced { tick } = clock.step() {
        assert_single_runner(&clock, tick);
        assert_queues_consistent(&clock, tick);
        assert_remaining_non_increasing(&clock, &mut remaining, tick);
    }

    clock.transitions().to_vec()
}

fn assert_single_runner(clock: &SimulationClock<AdmitAll, Vec<Transition>>, tick: u64) {
    let running: Vec<Pid> = clock
        .table()
        .iter()
        .filter(|r| r.state == ProcessState::Running)
        .map(|r| r.pid)
        .collect();
    assert!(running.len() <= 1, "tick {tick}: several running {running:?}");
    assert_eq!(running.first().copied(), clock.running(), "tick {tick}: CPU slot");
}

fn assert_queues_consistent(clock: &SimulationClock<AdmitAll, Vec<Transition>>, tick: u64) {
    for pid in clock.ready_pids() {
        let state = clock.record(pid).map(|r| r.state);
        assert_eq!(state, Some(ProcessState::Ready), "tick {tick}: {pid} in ready queue");
    }
    for pid in clock.waiting_pids() {
        let state = clock.record(pid).map(|r| r.state);
        assert_eq!(state, Some(ProcessState::Waiting), "tick {tick}: {pid} in waiting queue");
    }
}

fn assert_remaining_non_increasing(
    clock: &SimulationClock<AdmitAll, Vec<Transition>>,
    seen: &mut Vec<(Pid, u64)>,
    tick: u64,
) {
    for record in clock.table().iter() {
        match seen.iter_mut().find(|(pid, _)| *pid == record.pid) {
            Some((_, last)) => {
                assert!(record.remaining_time <= *last, "tick {tick}: {} grew", record.pid);
                *last = record.remaining_time;
            }
            None => seen.push((record.pid, record.remaining_time)),
        }
        assert_eq!(
            record.remaining_time == 0,
            record.state == ProcessState::Terminated,
            "tick {tick}: {} remaining/state mismatch",
            record.pid
        );
    }
}
