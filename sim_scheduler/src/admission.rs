//! Admission oracles
//!
//! An oracle is consulted once per process, at its arrival tick. A
//! rejected process is never offered again.

use crate::ProcessRecord;
use core_types::Pid;
use std::collections::HashSet;

/// Yes/no capacity check consulted at arrival time
pub trait AdmissionOracle {
    /// Decides whether an arriving process enters the workload
    fn admit(&mut self, record: &ProcessRecord) -> bool;

    /// Called when an admitted process terminates
    fn release(&mut self, _pid: Pid) {}
}

impl<T: AdmissionOracle + ?Sized> AdmissionOracle for &mut T {
    fn admit(&mut self, record: &ProcessRecord) -> bool {
        (**self).admit(record)
    }

    fn release(&mut self, pid: Pid) {
        (**self).release(pid)
    }
}

impl<T: AdmissionOracle + ?Sized> AdmissionOracle for Box<T> {
    fn admit(&mut self, record: &ProcessRecord) -> bool {
        (**self).admit(record)
    }

    fn release(&mut self, pid: Pid) {
        (**self).release(pid)
    }
}

/// Admits every process
#[derive(Debug, Clone, Copy, Default)]
pub struct AdmitAll;

impl AdmissionOracle for AdmitAll {
    fn admit(&mut self, _record: &ProcessRecord) -> bool {
        true
    }
}

/// Admits while fewer than `limit` admitted processes are still live
///
/// A slot is returned when its process terminates, the way memory is
/// handed back by a finished process.
#[derive(Debug, Clone)]
pub struct ResidentLimit {
    limit: usize,
    resident: HashSet<Pid>,
}

impl ResidentLimit {
    /// Creates an oracle allowing at most `limit` live processes
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            resident: HashSet::new(),
        }
    }

    /// Number of admitted, not yet terminated processes
    pub fn resident(&self) -> usize {
        self.resident.len()
    }
}

impl AdmissionOracle for ResidentLimit {
    fn admit(&mut self, record: &ProcessRecord) -> bool {
        if self.resident.len() >= self.limit {
            return false;
        }
        self.resident.insert(record.pid)
    }

    fn release(&mut self, pid: Pid) {
        self.resident.remove(&pid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pid: u32) -> ProcessRecord {
        ProcessRecord::new(Pid::new(pid), 1, 0, 1)
    }

    #[test]
    fn test_admit_all() {
        let mut oracle = AdmitAll;
        assert!(oracle.admit(&record(1)));
        assert!(oracle.admit(&record(2)));
    }

    #[test]
    fn test_resident_limit_rejects_when_full() {
        let mut oracle = ResidentLimit::new(2);
        assert!(oracle.admit(&record(1)));
        assert!(oracle.admit(&record(2)));
        assert!(!oracle.admit(&record(3)));
        assert_eq!(oracle.resident(), 2);
    }

    #[test]
    fn test_resident_limit_release_frees_slot() {
        let mut oracle = ResidentLimit::new(1);
        assert!(oracle.admit(&record(1)));
        assert!(!oracle.admit(&record(2)));

        oracle.release(Pid::new(1));
        assert_eq!(oracle.resident(), 0);
        assert!(oracle.admit(&record(2)));
    }

    #[test]
    fn test_zero_limit_rejects_everything() {
        let mut oracle = ResidentLimit::new(0);
        assert!(!oracle.admit(&record(1)));
    }

    fn offer<O: AdmissionOracle>(mut oracle: O, record: &ProcessRecord) -> bool {
        oracle.admit(record)
    }

    #[test]
    fn test_oracle_through_mutable_reference() {
        let mut inner = ResidentLimit::new(1);
        assert!(offer(&mut inner, &record(1)));
        assert_eq!(inner.resident(), 1);
        assert!(!offer(&mut inner, &record(2)));
    }

    #[test]
    fn test_boxed_oracle() {
        let boxed: Box<dyn AdmissionOracle> = Box::new(AdmitAll);
        assert!(offer(boxed, &record(1)));
    }
}
