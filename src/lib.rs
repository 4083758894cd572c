// src/lib.rs

pub mod cli;
pub mod command;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod stage;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::command::generate_command;
use crate::config::{ArgList, ReinstallConfig, default_config_path, load_and_validate, load_or_default, validate_config};
use crate::stage::{FileEntry, ReinstallStage, SourceFile, StageHandle};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading + CLI overrides
/// - the path feeder (positional args or stdin)
/// - the reinstall stage and its command queue
/// - reporting of per-file failures
pub async fn run(args: CliArgs) -> Result<()> {
    let config = resolve_config(&args)?;

    let (entry_tx, entry_rx) = mpsc::channel::<FileEntry>(64);
    let feeder = spawn_feeder(args.paths.clone(), entry_tx);

    if args.dry_run {
        print_dry_run(&config, entry_rx).await;
        return feeder.await.context("path feeder task panicked")?;
    }

    let stage = ReinstallStage::new(config)
        .on_complete(|| debug!("all install commands have settled"));
    let StageHandle { mut output, task } = stage.spawn(entry_rx);

    while let Some(result) = output.recv().await {
        match result {
            Ok(entry) => debug!(path = ?entry.path, "entry done"),
            Err(err) => debug!(path = ?err.item.path, error = %err, "entry failed"),
        }
    }

    let report = task.await.context("reinstall stage panicked")?;
    feeder.await.context("path feeder task panicked")??;

    info!(
        commands = report.commands,
        failed = report.failed,
        "reinstall finished"
    );

    if report.failed > 0 {
        bail!(
            "{} of {} install commands failed",
            report.failed,
            report.commands
        );
    }
    Ok(())
}

/// Load the config file (explicit `--config`, or `Reinstall.toml` if
/// present) and layer the CLI flags on top.
pub fn resolve_config(args: &CliArgs) -> Result<ReinstallConfig> {
    let config = match &args.config {
        Some(path) => load_and_validate(path)
            .with_context(|| format!("loading config file {:?}", path))?,
        None => load_or_default(default_config_path())
            .context("loading default config file")?,
    };

    let config = apply_cli_overrides(config, args);
    validate_config(&config)?;
    Ok(config)
}

/// CLI flags can only switch options on; `--arg` values are appended after
/// any `args` from the file.
pub fn apply_cli_overrides(mut config: ReinstallConfig, args: &CliArgs) -> ReinstallConfig {
    config.production |= args.production;
    config.ignore_scripts |= args.ignore_scripts;
    config.no_optional |= args.no_optional;
    config.allow_root |= args.allow_root;

    if !args.extra_args.is_empty() {
        let extra = args.extra_args.iter().cloned();
        config.args = Some(match config.args.take() {
            Some(existing) => existing.extend(extra),
            None => ArgList::Many(Vec::new()).extend(extra),
        });
    }

    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }

    config
}

/// Feed file entries into the stage: the given paths, or stdin lines when
/// there are none. Dropping the sender closes the stage's input.
fn spawn_feeder(paths: Vec<PathBuf>, tx: mpsc::Sender<FileEntry>) -> JoinHandle<Result<()>> {
    tokio::spawn(async move {
        if !paths.is_empty() {
            for path in paths {
                if tx.send(FileEntry::new(path)).await.is_err() {
                    break;
                }
            }
            return Ok(());
        }

        debug!("no paths given; reading paths from stdin");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await.context("reading paths from stdin")? {
            let line = line.trim();
            let entry = if line.is_empty() {
                FileEntry::without_path()
            } else {
                FileEntry::new(line)
            };
            if tx.send(entry).await.is_err() {
                break;
            }
        }
        Ok(())
    })
}

/// Dry-run output: the command each entry would run.
async fn print_dry_run(config: &ReinstallConfig, mut entries: mpsc::Receiver<FileEntry>) {
    println!("reinstall dry-run");
    println!("  production = {}", config.production);
    println!("  ignore_scripts = {}", config.ignore_scripts);
    println!("  no_optional = {}", config.no_optional);
    println!("  allow_root = {}", config.allow_root);
    println!("  concurrency = {}", config.concurrency);
    println!();

    while let Some(entry) = entries.recv().await {
        let Some(path) = entry.path() else {
            println!("  - (no path): skipped");
            continue;
        };
        match generate_command(path, config) {
            Some(spec) => {
                println!("  - {}", path.display());
                println!("      cmd: {spec}");
                println!("      cwd: {}", spec.working_dir.display());
            }
            None => println!("  - {}: not supported", path.display()),
        }
    }

    debug!("dry-run complete (no execution)");
}
