// src/command/mod.rs

//! Turning manifest file paths into package-manager commands.
//!
//! - [`tables`] holds the built-in file → command and command → arguments
//!   tables, plus the per-command flag rules.
//! - [`flags`] flattens a key/value table into CLI flags.
//! - [`generator`] applies all of the above, in a fixed order, to one path.

pub mod flags;
pub mod generator;
pub mod tables;

use std::fmt;
use std::path::PathBuf;

pub use flags::flatten_flags;
pub use generator::{command_name_for, generate_command};

/// One fully resolved external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Executable name, looked up on `PATH`.
    pub program: String,
    /// Arguments in the exact order they are passed to the program.
    pub args: Vec<String>,
    /// Directory the program runs in (the manifest's directory).
    pub working_dir: PathBuf,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: working_dir.into(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
