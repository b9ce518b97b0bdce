//! # Core Types
//!
//! This crate defines the fundamental types shared by the priosim crates.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: A process identifier is never a bare integer.
//! - **Type safety first**: The idle CPU is not a process state.
//!
//! ## Key Types
//!
//! - [`Pid`]: Identifier of a simulated process, taken from the workload file
//! - [`RunId`]: Unique identifier for one simulation run
//! - [`ProcessState`]: Lifecycle state of a simulated process

pub mod ids;
pub mod state;

pub use ids::{Pid, RunId};
pub use state::ProcessState;
