//! # priosim
//!
//! Runs one workload file and writes `execution.txt`.

use priosim::{CliError, RunConfig};
use std::env;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("priosim");

    let config = RunConfig::from_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(program);
        process::exit(e.exit_code());
    });

    if let Err(e) = execute(&config) {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn execute(config: &RunConfig) -> Result<(), CliError> {
    let output = priosim::run(config)?;
    for line in priosim::warnings(&output.report) {
        eprintln!("{}", line);
    }
    println!("{}", priosim::render_report(&output.report)?);
    Ok(())
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <input_file>", program);
    eprintln!();
    eprintln!("Each line of <input_file> describes one process:");
    eprintln!("  PID, priority, arrival_time, burst, io_frequency, io_duration");
    eprintln!();
    eprintln!("Transitions are written to execution.txt in the current directory.");
}
