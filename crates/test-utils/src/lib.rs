pub mod builders;
pub mod fake_runner;

use std::path::{Path, PathBuf};
use std::sync::Once;

use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, fmt};

use reinstall::stage::{FileEntry, ReinstallStage, StageOutput, StageReport};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Run a future with a 5-second timeout.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(std::time::Duration::from_secs(5), f)
        .await
        .expect("Test timed out after 5 seconds")
}

/// Path of a manifest inside a fake project directory.
pub fn fixture(relative: impl AsRef<Path>) -> PathBuf {
    Path::new("/project/fixtures").join(relative)
}

/// Push `entries` through `stage`, collecting every output and the final
/// report.
pub async fn run_stage(
    stage: ReinstallStage,
    entries: Vec<FileEntry>,
) -> (Vec<StageOutput<FileEntry>>, StageReport) {
    let (tx, rx) = mpsc::channel(entries.len().max(1));
    let mut handle = stage.spawn(rx);

    for entry in entries {
        tx.send(entry).await.expect("stage input closed early");
    }
    drop(tx);

    let mut outputs = Vec::new();
    while let Some(out) = handle.output.recv().await {
        outputs.push(out);
    }
    let report = handle.task.await.expect("stage task panicked");
    (outputs, report)
}
