// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `reinstall`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "reinstall",
    version,
    about = "Re-run package-manager installs for the manifest files you pass in.",
    long_about = None
)]
pub struct CliArgs {
    /// Manifest file paths (package.json, bower.json, requirements.txt, ...).
    ///
    /// If none are given, paths are read from stdin, one per line.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Path to the config file (TOML).
    ///
    /// Default: `Reinstall.toml` in the current working directory, used only
    /// if it exists.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Add `--production` to npm and bower installs.
    #[arg(long)]
    pub production: bool,

    /// Add `--ignore-scripts` to npm installs.
    #[arg(long)]
    pub ignore_scripts: bool,

    /// Add `--no-optional` to npm installs.
    #[arg(long)]
    pub no_optional: bool,

    /// Add `--allow-root` to bower installs.
    #[arg(long)]
    pub allow_root: bool,

    /// Extra argument appended to every install command (repeatable).
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
    pub extra_args: Vec<String>,

    /// Maximum number of install commands running at once.
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `REINSTALL_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the command generated for each path, but don't run anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
