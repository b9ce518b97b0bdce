//! Run Report Tests
//!
//! Checks the JSON report and the timeout path end to end.

use core_types::Pid;
use sim_scheduler::RunOutcome;
use tests_scenarios::Scratch;

#[test]
fn test_report_json_shape() {
    let scratch = Scratch::with_workload("1, 2, 0, 5, 0, 0\n2, 1, 0, 2, 0, 0\n");
    let output = scratch.run();
    let json = priosim::render_report(&output.report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert!(value["run_id"].is_string());
    assert_eq!(value["outcome"]["kind"], "completed");
    assert_eq!(value["outcome"]["ticks_elapsed"], 8);
    assert_eq!(value["processes"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["processes"][0]["final_state"], "TERMINATED");
    assert_eq!(value["summary"]["completed"], 2);
}

#[test]
fn test_report_metrics_for_priority_pair() {
    let scratch = Scratch::with_workload("1, 2, 0, 5, 0, 0\n2, 1, 0, 2, 0, 0\n");
    let report = scratch.run().report;

    let low = report.process(Pid::new(1)).unwrap();
    assert_eq!(low.waiting, 2);
    assert_eq!(low.response, Some(2));
    assert_eq!(low.turnaround, Some(7));

    let high = report.process(Pid::new(2)).unwrap();
    assert_eq!(high.waiting, 0);
    assert_eq!(high.turnaround, Some(2));

    assert_eq!(report.summary.average_turnaround, 4.5);
    assert_eq!(report.summary.average_waiting, 1.0);
}

#[test]
fn test_every_run_gets_a_fresh_id() {
    let scratch = Scratch::with_workload("1, 1, 0, 1, 0, 0\n");
    let first = scratch.run().report;
    let second = scratch.run().report;
    assert_ne!(first.run_id, second.run_id);
}

#[test]
fn test_timeout_writes_partial_table() {
    let mut scratch = Scratch::with_workload("1, 1, 0, 500, 0, 0\n");
    scratch.config.scheduler.tick_ceiling = 20;
    let output = scratch.run();

    assert_eq!(output.report.outcome, RunOutcome::Timeout { tick: 21 });
    assert_eq!(output.report.summary.completed, 0);
    let rows = scratch.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].to, "RUNNING");

    let lines = priosim::warnings(&output.report);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("tick=21"));
}

#[test]
fn test_default_ceiling_times_out_at_100_001() {
    let scratch = Scratch::with_workload("1, 1, 0, 200000, 0, 0\n");
    let output = scratch.run();
    assert_eq!(output.report.outcome, RunOutcome::Timeout { tick: 100_001 });
}
