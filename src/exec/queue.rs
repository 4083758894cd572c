// src/exec/queue.rs

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::{Semaphore, mpsc, oneshot, watch};
use tracing::{debug, trace};

use crate::errors::{ReinstallError, Result};

type Job = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Bounded-concurrency FIFO job queue.
///
/// Semantics:
/// - Jobs are started in submission order.
/// - At most `concurrency` jobs run at the same time; with the default of 1
///   each job finishes before the next one starts.
/// - A job that fails (or panics) does not affect the jobs behind it.
/// - [`drain`](Self::drain) waits until every submitted job has finished.
///
/// Each queue owns its own dispatch loop, so two pipelines never share
/// execution state. The queue must be created inside a Tokio runtime.
pub struct CommandQueue {
    tx: mpsc::UnboundedSender<Job>,
    pending: Arc<watch::Sender<usize>>,
    concurrency: usize,
}

impl fmt::Debug for CommandQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandQueue")
            .field("concurrency", &self.concurrency)
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}

impl CommandQueue {
    /// Create a queue running at most `concurrency` jobs at once.
    ///
    /// `concurrency` is clamped to at least 1.
    pub fn new(concurrency: usize) -> Self {
        let concurrency = concurrency.max(1);
        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();
        let (pending, _) = watch::channel(0usize);
        let semaphore = Arc::new(Semaphore::new(concurrency));

        tokio::spawn(async move {
            debug!(concurrency, "command queue loop started");

            // Permits are taken here, in channel order, so jobs start FIFO
            // no matter how the runtime schedules the spawned tasks.
            while let Some(job) = rx.recv().await {
                let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
                    break;
                };
                tokio::spawn(async move {
                    job.await;
                    drop(permit);
                });
            }

            debug!("command queue loop finished (queue dropped)");
        });

        Self {
            tx,
            pending: Arc::new(pending),
            concurrency,
        }
    }

    /// A queue that runs one job at a time.
    pub fn serial() -> Self {
        Self::new(1)
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Number of jobs queued or running.
    pub fn pending(&self) -> usize {
        *self.pending.borrow()
    }

    /// Enqueue a job. The returned handle resolves with the job's output once
    /// it has run.
    pub fn submit<F, T>(&self, job: F) -> JobHandle<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (result_tx, result_rx) = oneshot::channel();

        self.pending.send_modify(|n| *n += 1);
        let guard = PendingGuard(Arc::clone(&self.pending));

        let wrapped: Job = Box::pin(async move {
            let _guard = guard;
            let output = job.await;
            // The submitter may have dropped its handle; that's fine.
            let _ = result_tx.send(output);
        });

        if self.tx.send(wrapped).is_err() {
            // Dispatch loop is gone; dropping the job releases its guard and
            // the handle reports `QueueClosed`.
            debug!("command queue loop not running; job dropped");
        } else {
            trace!(pending = self.pending(), "job submitted");
        }

        JobHandle { rx: result_rx }
    }

    /// Wait until every submitted job has completed.
    ///
    /// Returns immediately when nothing is queued or running.
    pub async fn drain(&self) {
        let mut rx = self.pending.subscribe();
        // Only errors if the sender is dropped, and we hold it.
        let _ = rx.wait_for(|n| *n == 0).await;
        debug!("command queue drained");
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::serial()
    }
}

/// Decrements the pending count when a job finishes or is dropped.
struct PendingGuard(Arc<watch::Sender<usize>>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.send_modify(|n| *n = n.saturating_sub(1));
    }
}

/// Completion handle for a submitted job.
///
/// Resolves to the job's output, or `ReinstallError::QueueClosed` if the job
/// was dropped before finishing (e.g. it panicked).
#[derive(Debug)]
pub struct JobHandle<T> {
    rx: oneshot::Receiver<T>,
}

impl<T> Future for JobHandle<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|res| res.map_err(|_| ReinstallError::QueueClosed))
    }
}
