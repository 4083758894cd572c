use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use reinstall::command::CommandSpec;
use reinstall::errors::ReinstallError;
use reinstall::exec::{ProcessRunner, RunFuture};

/// What the fake runner reports for a given program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeOutcome {
    Success,
    ExitCode(i32),
    LaunchError,
}

/// Start/finish markers, in the order the runner observed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    Started(CommandSpec),
    Finished(CommandSpec),
}

/// A fake runner that:
/// - records every command it is asked to run
/// - optionally sleeps to simulate a slow install
/// - reports a configurable outcome per program (success by default)
/// - tracks the highest number of commands running at the same time
#[derive(Debug, Default)]
pub struct RecordingRunner {
    commands: Mutex<Vec<CommandSpec>>,
    events: Mutex<Vec<RunEvent>>,
    outcomes: HashMap<String, FakeOutcome>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_outcome(mut self, program: &str, outcome: FakeOutcome) -> Self {
        self.outcomes.insert(program.to_string(), outcome);
        self
    }

    pub fn commands(&self) -> Vec<CommandSpec> {
        self.commands.lock().unwrap().clone()
    }

    pub fn events(&self) -> Vec<RunEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&self, spec: CommandSpec) -> RunFuture<'_> {
        Box::pin(async move {
            self.commands.lock().unwrap().push(spec.clone());
            self.events
                .lock()
                .unwrap()
                .push(RunEvent::Started(spec.clone()));

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.events
                .lock()
                .unwrap()
                .push(RunEvent::Finished(spec.clone()));

            match self
                .outcomes
                .get(&spec.program)
                .copied()
                .unwrap_or(FakeOutcome::Success)
            {
                FakeOutcome::Success => Ok(()),
                FakeOutcome::ExitCode(code) => Err(ReinstallError::ProcessFailure {
                    program: spec.program,
                    code,
                }),
                FakeOutcome::LaunchError => Err(ReinstallError::ProcessLaunchFailure {
                    program: spec.program,
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
                }),
            }
        })
    }
}
