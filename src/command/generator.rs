// src/command/generator.rs

use std::path::{Path, PathBuf};

use tracing::trace;

use crate::command::CommandSpec;
use crate::command::tables::{RulePhase, active_rules, default_args_for, default_command_for_file};
use crate::config::ReinstallConfig;

/// Resolve the command name for a manifest base name.
///
/// User entries in `config.commands` take precedence over the built-in table.
pub fn command_name_for<'a>(file_name: &str, config: &'a ReinstallConfig) -> Option<&'a str> {
    config
        .commands
        .get(file_name)
        .map(String::as_str)
        .or_else(|| default_command_for_file(file_name))
}

/// Build the install command for `path`, or `None` if its base name is not a
/// known manifest.
///
/// Arguments are assembled in this order:
/// 1. the command's built-in arguments
/// 2. leading flag rules (`--production`, `--ignore-scripts`)
/// 3. global `args`
/// 4. the command's own extra arguments
///
/// A lone `false`, `""` or `0` in steps 3 and 4 adds nothing.
/// 5. trailing flag rules (`--allow-root`, `--no-optional`)
///
/// This function is pure: the same path and config always give the same
/// command.
pub fn generate_command(path: &Path, config: &ReinstallConfig) -> Option<CommandSpec> {
    let file_name = path.file_name()?.to_str()?;
    let command = command_name_for(file_name, config)?;

    let mut spec = CommandSpec::new(command, working_dir_of(path));
    spec.args
        .extend(default_args_for(command).iter().map(|a| a.to_string()));

    for rule in active_rules(RulePhase::Leading, command, config) {
        trace!(command, option = rule.option, arg = rule.arg, "leading flag rule");
        spec.args.push(rule.arg.to_string());
    }

    if let Some(global) = config.args.as_ref().filter(|a| a.is_set()) {
        spec.args.extend(global.to_args());
    }

    match config.extra_for(command) {
        Some(extra) if extra.is_set() => spec.args.extend(extra.to_args()),
        Some(_) => trace!(command, "extra arguments switched off"),
        None => {}
    }

    for rule in active_rules(RulePhase::Trailing, command, config) {
        trace!(command, option = rule.option, arg = rule.arg, "trailing flag rule");
        spec.args.push(rule.arg.to_string());
    }

    Some(spec)
}

/// Directory portion of a manifest path; a bare file name runs in `.`.
fn working_dir_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
