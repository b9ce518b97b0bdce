//! # Execution Log
//!
//! Renders state transitions as the fixed-width table written to
//! `execution.txt`:
//!
//! ```text
//! +----------------------------------------------------+
//! | Time of Transition | PID |  Old State |  New State |
//! +----------------------------------------------------+
//! |                  0 |   1 |        NEW |      READY |
//! |                  0 |   1 |      READY |    RUNNING |
//! |                  3 |   1 |    RUNNING | TERMINATED |
//! +----------------------------------------------------+
//! ```

use core_types::{Pid, ProcessState};
use sim_scheduler::TransitionLog;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name the execution table is written to
pub const DEFAULT_OUTPUT_FILE: &str = "execution.txt";

const TIME_WIDTH: usize = 18;
const PID_WIDTH: usize = 3;
const STATE_WIDTH: usize = 10;

#[derive(Debug, Error)]
pub enum ExecLogError {
    #[error("Unable to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Transition log that accumulates table rows
#[derive(Debug, Clone, Default)]
pub struct ExecutionTable {
    rows: Vec<String>,
}

impl ExecutionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of transitions recorded
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Formatted rows, without header or footer
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Header, rows and footer, one per line
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&header());
        for row in &self.rows {
            out.push_str(row);
            out.push('\n');
        }
        out.push_str(&footer());
        out
    }

    /// Writes the rendered table, replacing any existing file
    pub fn write_to(&self, path: &Path) -> Result<(), ExecLogError> {
        fs::write(path, self.render()).map_err(|source| ExecLogError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl TransitionLog for ExecutionTable {
    fn record(&mut self, tick: u64, pid: Pid, from: ProcessState, to: ProcessState) {
        self.rows.push(format_row(tick, pid, from, to));
    }
}

/// Formats one transition as a table row (no trailing newline)
pub fn format_row(tick: u64, pid: Pid, from: ProcessState, to: ProcessState) -> String {
    format!(
        "| {:>tw$} | {:>pw$} | {:>sw$} | {:>sw$} |",
        tick,
        pid,
        from,
        to,
        tw = TIME_WIDTH,
        pw = PID_WIDTH,
        sw = STATE_WIDTH,
    )
}

fn border() -> String {
    // 4 columns, each padded by one space on both sides, plus 3 inner separators
    let inner = TIME_WIDTH + PID_WIDTH + 2 * STATE_WIDTH + 4 * 2 + 3;
    format!("+{}+\n", "-".repeat(inner))
}

/// Border, column titles, border
pub fn header() -> String {
    let titles = format!(
        "| {:>tw$} | {:>pw$} | {:>sw$} | {:>sw$} |\n",
        "Time of Transition",
        "PID",
        "Old State",
        "New State",
        tw = TIME_WIDTH,
        pw = PID_WIDTH,
        sw = STATE_WIDTH,
    );
    format!("{}{}{}", border(), titles, border())
}

/// Closing border
pub fn footer() -> String {
    border()
}
