//! Per-process and whole-run statistics
//!
//! Everything here is derived after the fact from the process table and
//! the transition history; nothing feeds back into scheduling.

use crate::{ProcessTable, Transition};
use core_types::{Pid, ProcessState};
use serde::Serialize;
use std::collections::HashMap;

/// Timing statistics for one admitted process
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessMetrics {
    pub pid: Pid,
    pub priority: i32,
    pub arrival_time: u64,
    pub burst: u64,
    pub final_state: ProcessState,
    /// Tick of the first READY → RUNNING transition
    pub first_dispatch: Option<u64>,
    /// Tick of the RUNNING → TERMINATED transition
    pub completion: Option<u64>,
    /// Completion minus arrival
    pub turnaround: Option<u64>,
    /// First dispatch minus arrival
    pub response: Option<u64>,
    /// Ticks spent READY, up to the end of the run for a process never
    /// dispatched again
    pub waiting: u64,
    /// Number of I/O excursions started
    pub io_excursions: u64,
}

impl ProcessMetrics {
    fn new(pid: Pid, priority: i32, arrival_time: u64, burst: u64, state: ProcessState) -> Self {
        Self {
            pid,
            priority,
            arrival_time,
            burst,
            final_state: state,
            first_dispatch: None,
            completion: None,
            turnaround: None,
            response: None,
            waiting: 0,
            io_excursions: 0,
        }
    }
}

/// Aggregate statistics for a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub admitted: usize,
    pub completed: usize,
    pub average_turnaround: f64,
    pub average_waiting: f64,
    pub average_response: f64,
    /// Completed processes per simulated tick
    pub throughput: f64,
}

/// Derives per-process metrics, in admission order, and the run summary
pub fn collect(
    table: &ProcessTable,
    transitions: &[Transition],
    ticks_elapsed: u64,
) -> (Vec<ProcessMetrics>, RunSummary) {
    let mut metrics: Vec<ProcessMetrics> = table
        .iter()
        .map(|r| ProcessMetrics::new(r.pid, r.priority, r.arrival_time, r.burst, r.state))
        .collect();
    let slots: HashMap<Pid, usize> = metrics
        .iter()
        .enumerate()
        .map(|(slot, m)| (m.pid, slot))
        .collect();
    let mut ready_since: HashMap<Pid, u64> = HashMap::new();

    for transition in transitions {
        let Some(&slot) = slots.get(&transition.pid) else {
            continue;
        };
        let entry = &mut metrics[slot];

        match (transition.from, transition.to) {
            (_, ProcessState::Ready) => {
                ready_since.insert(transition.pid, transition.tick);
            }
            (ProcessState::Ready, ProcessState::Running) => {
                if let Some(since) = ready_since.remove(&transition.pid) {
                    entry.waiting += transition.tick - since;
                }
                if entry.first_dispatch.is_none() {
                    entry.first_dispatch = Some(transition.tick);
                    entry.response = Some(transition.tick - entry.arrival_time);
                }
            }
            (_, ProcessState::Waiting) => entry.io_excursions += 1,
            (_, ProcessState::Terminated) => {
                entry.completion = Some(transition.tick);
                entry.turnaround = Some(transition.tick - entry.arrival_time);
            }
            _ => {}
        }
    }

    // Still READY when the run ended
    for (pid, since) in ready_since {
        if let Some(&slot) = slots.get(&pid) {
            metrics[slot].waiting += ticks_elapsed.saturating_sub(since);
        }
    }

    let summary = summarize(&metrics, ticks_elapsed);
    (metrics, summary)
}

fn summarize(metrics: &[ProcessMetrics], ticks_elapsed: u64) -> RunSummary {
    let completed = metrics.iter().filter(|m| m.completion.is_some()).count();
    let throughput = if ticks_elapsed == 0 {
        0.0
    } else {
        completed as f64 / ticks_elapsed as f64
    };

    RunSummary {
        admitted: metrics.len(),
        completed,
        average_turnaround: mean(metrics.iter().filter_map(|m| m.turnaround)),
        average_waiting: mean(metrics.iter().map(|m| m.waiting)),
        average_response: mean(metrics.iter().filter_map(|m| m.response)),
        throughput,
    }
}

fn mean(values: impl Iterator<Item = u64>) -> f64 {
    let (sum, count) = values.fold((0u64, 0u64), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}
