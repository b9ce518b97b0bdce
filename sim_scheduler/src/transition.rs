//! State transition events

use core_types::{Pid, ProcessState};
use serde::{Deserialize, Serialize};

/// One logged state change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub tick: u64,
    pub pid: Pid,
    pub from: ProcessState,
    pub to: ProcessState,
}

impl Transition {
    pub fn new(tick: u64, pid: Pid, from: ProcessState, to: ProcessState) -> Self {
        Self {
            tick,
            pid,
            from,
            to,
        }
    }
}

/// Sink for state transitions, in the order they happen
pub trait TransitionLog {
    fn record(&mut self, tick: u64, pid: Pid, from: ProcessState, to: ProcessState);
}

impl TransitionLog for Vec<Transition> {
    fn record(&mut self, tick: u64, pid: Pid, from: ProcessState, to: ProcessState) {
        self.push(Transition::new(tick, pid, from, to));
    }
}

impl<T: TransitionLog + ?Sized> TransitionLog for &mut T {
    fn record(&mut self, tick: u64, pid: Pid, from: ProcessState, to: ProcessState) {
        (**self).record(tick, pid, from, to)
    }
}
