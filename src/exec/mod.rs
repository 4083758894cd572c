// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`runner`] provides the `ProcessRunner` trait and the `SystemRunner`
//!   that spawns real processes with `tokio::process::Command`.
//! - [`queue`] provides `CommandQueue`, the bounded FIFO queue that decides
//!   when each command gets to run.

pub mod queue;
pub mod runner;

pub use queue::{CommandQueue, JobHandle};
pub use runner::{ProcessRunner, RunFuture, SystemRunner, run_command};
