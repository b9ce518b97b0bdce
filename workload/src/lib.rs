//! # Workload Files
//!
//! Reads process descriptors from text. Each non-blank line describes one
//! process with six fields separated by `", "`:
//!
//! ```text
//! PID, priority, arrival_time, burst, io_frequency, io_duration
//! ```
//!
//! There is no header line. Malformed lines are rejected with the line
//! number rather than silently producing a broken process.

use core_types::Pid;
use sim_scheduler::ProcessRecord;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Field separator within a line
pub const FIELD_DELIMITER: &str = ", ";

/// Number of fields per line
pub const FIELD_COUNT: usize = 6;

const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "PID",
    "priority",
    "arrival_time",
    "burst",
    "io_frequency",
    "io_duration",
];

#[derive(Debug, Error)]
pub enum WorkloadError {
    #[error("Unable to open file: {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: expected 6 fields, found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("line {line}: invalid {field} value {value:?}")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: burst must be at least 1")]
    ZeroBurst { line: usize },

    #[error("line {line}: duplicate PID {pid}")]
    DuplicatePid { line: usize, pid: Pid },
}

impl WorkloadError {
    /// Line number (1-based) the error refers to, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            WorkloadError::Open { .. } => None,
            WorkloadError::FieldCount { line, .. }
            | WorkloadError::InvalidField { line, .. }
            | WorkloadError::ZeroBurst { line }
            | WorkloadError::DuplicatePid { line, .. } => Some(*line),
        }
    }
}

/// Builds a record from the tokens of one line
///
/// `line` is only used for error reporting.
pub fn record_from_tokens(tokens: &[&str], line: usize) -> Result<ProcessRecord, WorkloadError> {
    if tokens.len() != FIELD_COUNT {
        return Err(WorkloadError::FieldCount {
            line,
            found: tokens.len(),
        });
    }

    let pid: u32 = parse_field(tokens, 0, line)?;
    let priority: i32 = parse_field(tokens, 1, line)?;
    let arrival_time: u64 = parse_field(tokens, 2, line)?;
    let burst: u64 = parse_field(tokens, 3, line)?;
    let io_frequency: u64 = parse_field(tokens, 4, line)?;
    let io_duration: u64 = parse_field(tokens, 5, line)?;

    if burst == 0 {
        return Err(WorkloadError::ZeroBurst { line });
    }

    Ok(ProcessRecord::new(Pid::new(pid), priority, arrival_time, burst)
        .with_io(io_frequency, io_duration))
}

fn parse_field<T: std::str::FromStr>(
    tokens: &[&str],
    index: usize,
    line: usize,
) -> Result<T, WorkloadError> {
    let raw = tokens[index].trim();
    raw.parse().map_err(|_| WorkloadError::InvalidField {
        line,
        field: FIELD_NAMES[index],
        value: raw.to_string(),
    })
}

/// Parses a whole workload, in file order
pub fn parse_workload(text: &str) -> Result<Vec<ProcessRecord>, WorkloadError> {
    let mut records = Vec::new();
    let mut seen = HashSet::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line = index + 1;
        let content = raw_line.trim_end_matches('\r');
        if content.trim().is_empty() {
            continue;
        }

        let tokens: Vec<&str> = content.split(FIELD_DELIMITER).collect();
        let record = record_from_tokens(&tokens, line)?;
        if !seen.insert(record.pid) {
            return Err(WorkloadError::DuplicatePid {
                line,
                pid: record.pid,
            });
        }
        records.push(record);
    }

    Ok(records)
}

/// Reads and parses a workload file
pub fn load_workload(path: &Path) -> Result<Vec<ProcessRecord>, WorkloadError> {
    let text = fs::read_to_string(path).map_err(|source| WorkloadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse_workload(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_record_from_tokens() {
        let record = record_from_tokens(&["7", "2", "5", "10", "3", "4"], 1).unwrap();
        assert_eq!(record.pid, Pid::new(7));
        assert_eq!(record.priority, 2);
        assert_eq!(record.arrival_time, 5);
        assert_eq!(record.burst, 10);
        assert_eq!(record.remaining_time, 10);
        assert_eq!(record.io_frequency, 3);
        assert_eq!(record.io_duration, 4);
    }

    #[test]
    fn test_wrong_field_count() {
        let err = record_from_tokens(&["1", "2", "3"], 4).unwrap_err();
        assert!(matches!(err, WorkloadError::FieldCount { line: 4, found: 3 }));
    }

    #[test]
    fn test_non_numeric_field_names_the_field() {
        let err = record_from_tokens(&["1", "high", "0", "3", "0", "0"], 2).unwrap_err();
        match err {
            WorkloadError::InvalidField { line, field, value } => {
                assert_eq!(line, 2);
                assert_eq!(field, "priority");
                assert_eq!(value, "high");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_arrival_rejected() {
        let err = record_from_tokens(&["1", "1", "-2", "3", "0", "0"], 1).unwrap_err();
        assert!(matches!(
            err,
            WorkloadError::InvalidField {
                field: "arrival_time",
                ..
            }
        ));
    }

    #[test]
    fn test_negative_priority_accepted() {
        let record = record_from_tokens(&["1", "-1", "0", "3", "0", "0"], 1).unwrap();
        assert_eq!(record.priority, -1);
    }

    #[test]
    fn test_zero_burst_rejected() {
        let err = record_from_tokens(&["1", "1", "0", "0", "0", "0"], 3).unwrap_err();
        assert!(matches!(err, WorkloadError::ZeroBurst { line: 3 }));
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_parse_workload_keeps_file_order() {
        let text = "2, 1, 0, 5, 0, 0\n1, 3, 0, 2, 1, 1\n";
        let records = parse_workload(text).unwrap();
        let pids: Vec<u32> = records.iter().map(|r| r.pid.get()).collect();
        assert_eq!(pids, vec![2, 1]);
    }

    #[test]
    fn test_parse_workload_skips_blank_lines_and_crlf() {
        let text = "1, 1, 0, 3, 0, 0\r\n\r\n2, 1, 1, 3, 0, 0\r\n   \n";
        let records = parse_workload(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].io_duration, 0);
    }

    #[test]
    fn test_parse_workload_reports_line_number() {
        let text = "1, 1, 0, 3, 0, 0\n\n2, 1, 0\n";
        let err = parse_workload(text).unwrap_err();
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_parse_workload_rejects_duplicate_pid() {
        let text = "1, 1, 0, 3, 0, 0\n1, 2, 4, 1, 0, 0\n";
        let err = parse_workload(text).unwrap_err();
        assert!(matches!(err, WorkloadError::DuplicatePid { line: 2, .. }));
    }

    #[test]
    fn test_wrong_delimiter_is_a_field_count_error() {
        let err = parse_workload("1,1,0,3,0,0\n").unwrap_err();
        assert!(matches!(err, WorkloadError::FieldCount { found: 1, .. }));
    }

    #[test]
    fn test_empty_text_is_empty_workload() {
        assert!(parse_workload("").unwrap().is_empty());
    }

    #[test]
    fn test_load_workload_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1, 1, 0, 3, 0, 0").unwrap();
        writeln!(file, "2, 2, 1, 4, 2, 1").unwrap();

        let records = load_workload(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].io_frequency, 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = load_workload(&path).unwrap_err();
        assert!(matches!(err, WorkloadError::Open { .. }));
        assert!(err.to_string().contains("missing.txt"));
        assert_eq!(err.line(), None);
    }
}
