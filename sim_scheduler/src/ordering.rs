//! Priority selection policy

use crate::ProcessRecord;
use core_types::Pid;
use std::cmp::Ordering;

/// Strict-priority selection with first-come tie-break
///
/// The numerically smallest priority wins. Equal priorities go to the
/// earlier arrival. Records equal on both keep their candidate order, so
/// selection is deterministic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriorityOrdering;

impl PriorityOrdering {
    /// Compares two records; `Less` means `a` runs first
    pub fn compare(a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
        a.priority
            .cmp(&b.priority)
            .then_with(|| a.arrival_time.cmp(&b.arrival_time))
    }

    /// Picks the record that should run next
    pub fn select<'a, I>(candidates: I) -> Option<Pid>
    where
        I: IntoIterator<Item = &'a ProcessRecord>,
    {
        candidates
            .into_iter()
            .min_by(|a, b| Self::compare(a, b))
            .map(|record| record.pid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pid: u32, priority: i32, arrival_time: u64) -> ProcessRecord {
        ProcessRecord::new(Pid::new(pid), priority, arrival_time, 1)
    }

    #[test]
    fn test_lower_priority_value_wins() {
        let a = record(1, 2, 0);
        let b = record(2, 1, 0);
        assert_eq!(PriorityOrdering::select([&a, &b]), Some(Pid::new(2)));
        assert_eq!(PriorityOrdering::select([&b, &a]), Some(Pid::new(2)));
    }

    #[test]
    fn test_earlier_arrival_breaks_tie() {
        let late = record(1, 3, 2);
        let early = record(2, 3, 0);
        assert_eq!(PriorityOrdering::select([&late, &early]), Some(Pid::new(2)));
    }

    #[test]
    fn test_priority_beats_arrival() {
        let early_low = record(1, 5, 0);
        let late_high = record(2, 1, 9);
        assert_eq!(
            PriorityOrdering::select([&early_low, &late_high]),
            Some(Pid::new(2))
        );
    }

    #[test]
    fn test_full_tie_keeps_candidate_order() {
        let a = record(7, 1, 0);
        let b = record(3, 1, 0);
        assert_eq!(PriorityOrdering::select([&a, &b]), Some(Pid::new(7)));
    }

    #[test]
    fn test_empty_candidates() {
        let none: Vec<&ProcessRecord> = Vec::new();
        assert_eq!(PriorityOrdering::select(none), None);
    }
}
