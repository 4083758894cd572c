// src/exec/runner.rs

//! Pluggable process runner abstraction.
//!
//! The pipeline stage talks to a `ProcessRunner` instead of spawning
//! processes directly, so tests can swap in a runner that records commands
//! and fakes their outcome.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::command::CommandSpec;
use crate::errors::{ReinstallError, Result};

/// Boxed future returned by [`ProcessRunner::run`].
pub type RunFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

/// Trait abstracting how one command is executed.
///
/// Exactly one outcome per call:
/// - `Ok(())` when the program exits with status 0
/// - `ReinstallError::ProcessFailure` on a non-zero exit
/// - `ReinstallError::ProcessLaunchFailure` if it could not be started
pub trait ProcessRunner: Send + Sync {
    fn run(&self, spec: CommandSpec) -> RunFuture<'_>;
}

/// Production runner: spawns the program with the caller's stdin, stdout
/// and stderr, so the package manager's output shows up live.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, spec: CommandSpec) -> RunFuture<'_> {
        Box::pin(run_command(spec))
    }
}

/// Run a single command to completion with inherited stdio.
pub async fn run_command(spec: CommandSpec) -> Result<()> {
    info!(
        program = %spec.program,
        args = ?spec.args,
        cwd = %spec.working_dir.display(),
        "starting install command"
    );

    // Package managers on Windows are usually `.cmd` shims, which only
    // resolve through the shell.
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(&spec.program);
        c
    } else {
        Command::new(&spec.program)
    };

    cmd.args(&spec.args)
        .current_dir(&spec.working_dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    let mut child = cmd.spawn().map_err(|source| {
        warn!(program = %spec.program, error = %source, "could not launch install command");
        ReinstallError::ProcessLaunchFailure {
            program: spec.program.clone(),
            source,
        }
    })?;

    let status = child.wait().await?;

    // Killed by a signal: no exit code.
    let code = status.code().unwrap_or(-1);

    info!(
        program = %spec.program,
        exit_code = code,
        success = status.success(),
        "install command exited"
    );

    if status.success() {
        Ok(())
    } else {
        debug!(program = %spec.program, code, "reporting process failure");
        Err(ReinstallError::ProcessFailure {
            program: spec.program,
            code,
        })
    }
}
