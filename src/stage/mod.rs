// src/stage/mod.rs

//! The pipeline stage: file entries in, file entries (or per-item errors)
//! out, with install commands run for every recognised manifest on the way.
//!
//! Lifecycle:
//! - **Open**: each input item is either passed straight through (no path,
//!   or not a known manifest) or turned into a command and submitted to the
//!   stage's own [`CommandQueue`]. When the command settles, the item is
//!   emitted as `Ok(item)` or `Err(StageError)`.
//! - **Draining**: once the input channel closes, the stage waits for the
//!   queue and every pending result to finish.
//! - **Closed**: the completion callback runs, the output channel closes and
//!   the stage task resolves with a [`StageReport`].

pub mod source;

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle, JoinSet};
use tracing::{debug, error, info, warn};

use crate::command::generate_command;
use crate::config::ReinstallConfig;
use crate::errors::ReinstallError;
use crate::exec::{CommandQueue, ProcessRunner, SystemRunner};

pub use source::{FileEntry, SourceFile};

/// Name attached to every error the stage emits.
pub const STAGE_NAME: &str = "reinstall";

/// A command failure, attached to the item that caused it.
#[derive(Debug, Error)]
#[error("{stage}: {source}")]
pub struct StageError<I> {
    pub stage: &'static str,
    pub item: I,
    #[source]
    pub source: ReinstallError,
}

impl<I> StageError<I> {
    pub fn new(item: I, source: ReinstallError) -> Self {
        Self {
            stage: STAGE_NAME,
            item,
            source,
        }
    }
}

/// What the stage emits downstream for each input item.
pub type StageOutput<I> = std::result::Result<I, StageError<I>>;

/// Summary returned when the stage has finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageReport {
    /// Items received from upstream.
    pub items: usize,
    /// Commands submitted to the queue.
    pub commands: usize,
    /// Commands that failed to launch or exited non-zero.
    pub failed: usize,
    /// Items passed through without a command.
    pub passed_through: usize,
}

type CompletionCallback = Box<dyn FnOnce() + Send>;

/// Configured, not yet running, pipeline stage.
pub struct ReinstallStage {
    config: Arc<ReinstallConfig>,
    runner: Arc<dyn ProcessRunner>,
    on_complete: Option<CompletionCallback>,
    buffer: usize,
}

impl fmt::Debug for ReinstallStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReinstallStage")
            .field("config", &self.config)
            .field("has_on_complete", &self.on_complete.is_some())
            .field("buffer", &self.buffer)
            .finish_non_exhaustive()
    }
}

impl ReinstallStage {
    /// A stage running real processes via [`SystemRunner`].
    pub fn new(config: ReinstallConfig) -> Self {
        Self {
            config: Arc::new(config),
            runner: Arc::new(SystemRunner),
            on_complete: None,
            buffer: 64,
        }
    }

    /// Replace the process runner (tests use a recording fake).
    pub fn with_runner(mut self, runner: Arc<dyn ProcessRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Callback run exactly once, after every command has settled and before
    /// the output channel closes.
    pub fn on_complete(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Capacity of the output channel.
    pub fn with_buffer(mut self, buffer: usize) -> Self {
        self.buffer = buffer.max(1);
        self
    }

    /// Start the stage on the given input channel.
    ///
    /// Must be called inside a Tokio runtime. Closing (dropping) the input
    /// sender moves the stage into draining.
    pub fn spawn<I>(self, input: mpsc::Receiver<I>) -> StageHandle<I>
    where
        I: SourceFile + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(self.buffer);
        let task = tokio::spawn(self.run(input, tx));
        StageHandle { output: rx, task }
    }

    async fn run<I>(
        mut self,
        mut input: mpsc::Receiver<I>,
        out: mpsc::Sender<StageOutput<I>>,
    ) -> StageReport
    where
        I: SourceFile + Send + 'static,
    {
        let queue = CommandQueue::new(self.config.concurrency);
        let mut relays: JoinSet<bool> = JoinSet::new();
        let mut report = StageReport::default();

        info!(concurrency = queue.concurrency(), "reinstall stage open");

        while let Some(item) = input.recv().await {
            report.items += 1;

            let spec = match item.path() {
                None => {
                    debug!("item has no path; passing through");
                    None
                }
                Some(path) => {
                    let spec = generate_command(path, &self.config);
                    if spec.is_none() {
                        warn!("file {} is not supported", path.display());
                    }
                    spec.map(|spec| (spec, path.display().to_string()))
                }
            };

            let Some((spec, label)) = spec else {
                report.passed_through += 1;
                if out.send(Ok(item)).await.is_err() {
                    debug!("downstream closed; dropping passed-through item");
                }
                continue;
            };

            report.commands += 1;
            debug!(path = %label, command = %spec, "submitting install command");

            let runner = Arc::clone(&self.runner);
            let handle = queue.submit(async move { runner.run(spec).await });
            let out = out.clone();

            relays.spawn(async move {
                let result = handle.await.and_then(|outcome| outcome);
                let failed = result.is_err();
                let message = match result {
                    Ok(()) => Ok(item),
                    Err(source) => {
                        error!(path = %label, error = %source, "install command failed");
                        Err(StageError::new(item, source))
                    }
                };
                if out.send(message).await.is_err() {
                    debug!(path = %label, "downstream closed; dropping command result");
                }
                failed
            });

            while let Some(joined) = relays.try_join_next() {
                tally(&mut report, joined);
            }
        }

        info!(
            pending = queue.pending(),
            "input ended; waiting for install commands to finish"
        );
        queue.drain().await;
        while let Some(joined) = relays.join_next().await {
            tally(&mut report, joined);
        }

        if let Some(callback) = self.on_complete.take() {
            callback();
        }

        info!(
            items = report.items,
            commands = report.commands,
            failed = report.failed,
            passed_through = report.passed_through,
            "reinstall stage finished"
        );
        report
    }
}

fn tally(report: &mut StageReport, joined: Result<bool, JoinError>) {
    match joined {
        Ok(true) => report.failed += 1,
        Ok(false) => {}
        Err(err) => {
            warn!(error = %err, "result relay task did not complete");
            report.failed += 1;
        }
    }
}

/// A running stage: read results from `output`, await `task` for the report.
#[derive(Debug)]
pub struct StageHandle<I> {
    pub output: mpsc::Receiver<StageOutput<I>>,
    pub task: JoinHandle<StageReport>,
}
