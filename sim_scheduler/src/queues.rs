//! Process table and scheduling queues
//!
//! The [`ProcessTable`] is the only owner of process records. The ready and
//! waiting queues, like the CPU slot, hold PIDs and look records up in the
//! table, so a record can never disagree with a copy of itself.

use crate::ProcessRecord;
use core_types::{Pid, ProcessState};
use std::collections::{HashMap, VecDeque};

/// Append-only arena of admitted process records
///
/// Records are kept in admission order and are never removed, including
/// after they terminate.
#[derive(Debug, Default)]
pub struct ProcessTable {
    records: Vec<ProcessRecord>,
    index: HashMap<Pid, usize>,
}

impl ProcessTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record
    ///
    /// Returns false, leaving the table untouched, if the PID is present.
    pub fn insert(&mut self, record: ProcessRecord) -> bool {
        if self.contains(record.pid) {
            return false;
        }
        self.index.insert(record.pid, self.records.len());
        self.records.push(record);
        true
    }

    /// Returns the record for a PID
    pub fn get(&self, pid: Pid) -> Option<&ProcessRecord> {
        self.index.get(&pid).map(|&slot| &self.records[slot])
    }

    /// Returns the record for a PID mutably
    pub fn get_mut(&mut self, pid: Pid) -> Option<&mut ProcessRecord> {
        match self.index.get(&pid) {
            Some(&slot) => self.records.get_mut(slot),
            None => None,
        }
    }

    /// Checks if a PID has been admitted
    pub fn contains(&self, pid: Pid) -> bool {
        self.index.contains_key(&pid)
    }

    /// Number of admitted records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing has been admitted
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates records in admission order
    pub fn iter(&self) -> impl Iterator<Item = &ProcessRecord> {
        self.records.iter()
    }

    /// Returns true if every admitted record has terminated
    ///
    /// Vacuously true for an empty table.
    pub fn all_terminated(&self) -> bool {
        self.records.iter().all(|record| record.state.is_terminal())
    }

    /// Number of records in a given state
    pub fn count_in(&self, state: ProcessState) -> usize {
        self.records
            .iter()
            .filter(|record| record.state == state)
            .count()
    }
}

/// FIFO queue of PIDs
///
/// PIDs are enqueued at the back. Removal of an arbitrary PID keeps the
/// relative order of the rest.
#[derive(Debug, Default, Clone)]
pub struct PidQueue {
    queue: VecDeque<Pid>,
}

impl PidQueue {
    /// Creates an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, pid: Pid) {
        self.queue.push_back(pid);
    }

    /// Removes a PID; returns false if it was not queued
    pub fn remove(&mut self, pid: Pid) -> bool {
        match self.queue.iter().position(|&queued| queued == pid) {
            Some(index) => self.queue.remove(index).is_some(),
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Pid> + '_ {
        self.queue.iter().copied()
    }

    /// Takes every queued PID, leaving the queue empty
    pub fn take_all(&mut self) -> Vec<Pid> {
        self.queue.drain(..).collect()
    }
}

/// The process table plus the ready and waiting queues
#[derive(Debug, Default)]
pub struct QueueSet {
    pub table: ProcessTable,
    pub ready: PidQueue,
    pub waiting: PidQueue,
}

impl QueueSet {
    /// Creates an empty queue set
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits a record as READY
    ///
    /// The record enters the table and the back of the ready queue.
    /// Returns false if its PID was already admitted.
    pub fn admit(&mut self, mut record: ProcessRecord) -> bool {
        let pid = record.pid;
        record.state = ProcessState::Ready;
        if !self.table.insert(record) {
            return false;
        }
        self.ready.enqueue(pid);
        true
    }

    /// PIDs whose queue placement disagrees with their recorded state
    ///
    /// Empty whenever the queue set is consistent.
    pub fn misplaced(&self) -> Vec<Pid> {
        let mut misplaced = Vec::new();
        for (queue, expected) in [
            (&self.ready, ProcessState::Ready),
            (&self.waiting, ProcessState::Waiting),
        ] {
            for pid in queue.iter() {
                let state = self.table.get(pid).map(|record| record.state);
                if state != Some(expected) {
                    misplaced.push(pid);
                }
            }
        }
        misplaced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pid: u32) -> ProcessRecord {
        ProcessRecord::new(Pid::new(pid), 1, 0, 3)
    }

    #[test]
    fn test_table_insert_and_lookup() {
        let mut table = ProcessTable::new();
        assert!(table.is_empty());
        assert!(table.insert(record(1)));
        assert!(table.insert(record(2)));

        assert_eq!(table.len(), 2);
        assert!(table.contains(Pid::new(1)));
        assert_eq!(table.get(Pid::new(2)).map(|r| r.pid), Some(Pid::new(2)));
        assert!(table.get(Pid::new(3)).is_none());
    }

    #[test]
    fn test_table_rejects_duplicate_pid() {
        let mut table = ProcessTable::new();
        assert!(table.insert(record(1)));
        assert!(!table.insert(record(1)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_table_mutation_is_visible_through_lookup() {
        let mut table = ProcessTable::new();
        table.insert(record(1));
        if let Some(r) = table.get_mut(Pid::new(1)) {
            r.remaining_time = 1;
        }
        assert_eq!(table.get(Pid::new(1)).map(|r| r.remaining_time), Some(1));
    }

    #[test]
    fn test_table_keeps_admission_order() {
        let mut table = ProcessTable::new();
        table.insert(record(9));
        table.insert(record(2));
        table.insert(record(5));
        let pids: Vec<u32> = table.iter().map(|r| r.pid.get()).collect();
        assert_eq!(pids, vec![9, 2, 5]);
    }

    #[test]
    fn test_all_terminated() {
        let mut table = ProcessTable::new();
        assert!(table.all_terminated());

        table.insert(record(1));
        assert!(!table.all_terminated());

        if let Some(r) = table.get_mut(Pid::new(1)) {
            r.state = ProcessState::Terminated;
        }
        assert!(table.all_terminated());
        assert_eq!(table.count_in(ProcessState::Terminated), 1);
    }

    #[test]
    fn test_pid_queue_fifo() {
        let mut queue = PidQueue::new();
        queue.enqueue(Pid::new(1));
        queue.enqueue(Pid::new(2));
        queue.enqueue(Pid::new(3));
        let order: Vec<u32> = queue.iter().map(|p| p.get()).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_pid_queue_remove_keeps_order() {
        let mut queue = PidQueue::new();
        for pid in 1..=4 {
            queue.enqueue(Pid::new(pid));
        }
        assert!(queue.remove(Pid::new(2)));
        assert!(!queue.remove(Pid::new(2)));

        let rest: Vec<u32> = queue.iter().map(|p| p.get()).collect();
        assert_eq!(rest, vec![1, 3, 4]);
    }

    #[test]
    fn test_pid_queue_take_all() {
        let mut queue = PidQueue::new();
        queue.enqueue(Pid::new(1));
        queue.enqueue(Pid::new(2));
        assert_eq!(queue.take_all(), vec![Pid::new(1), Pid::new(2)]);
        assert_eq!(queue.iter().count(), 0);
    }

    #[test]
    fn test_admit_marks_ready_and_enqueues() {
        let mut queues = QueueSet::new();
        assert!(queues.admit(record(1)));

        assert_eq!(
            queues.table.get(Pid::new(1)).map(|r| r.state),
            Some(ProcessState::Ready)
        );
        assert_eq!(queues.ready.iter().collect::<Vec<_>>(), vec![Pid::new(1)]);
        assert!(queues.misplaced().is_empty());
    }

    #[test]
    fn test_admit_duplicate_does_not_enqueue_twice() {
        let mut queues = QueueSet::new();
        queues.admit(record(1));
        assert!(!queues.admit(record(1)));
        assert_eq!(queues.ready.iter().count(), 1);
    }

    #[test]
    fn test_misplaced_detects_state_drift() {
        let mut queues = QueueSet::new();
        queues.admit(record(1));
        if let Some(r) = queues.table.get_mut(Pid::new(1)) {
            r.state = ProcessState::Waiting;
        }
        assert_eq!(queues.misplaced(), vec![Pid::new(1)]);
    }
}
