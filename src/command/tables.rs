// src/command/tables.rs

//! Built-in lookup tables.
//!
//! Both the file-name table and the default-arguments table are part of the
//! tool's public contract; changing an entry changes which command users get.

use crate::config::ReinstallConfig;

/// Manifest base name → command name.
pub const DEFAULT_FILE_COMMANDS: &[(&str, &str)] = &[
    ("tsd.json", "tsd"),
    ("bower.json", "bower"),
    ("package.json", "npm"),
    ("requirements.txt", "pip"),
    ("composer.json", "composer"),
    ("typings.json", "typings"),
];

/// Command name → base argument list.
pub const DEFAULT_COMMAND_ARGS: &[(&str, &[&str])] = &[
    ("tsd", &["reinstall", "--save"]),
    ("bower", &["install", "--config.interactive=false"]),
    ("npm", &["install"]),
    ("pip", &["install", "-r", "requirements.txt"]),
    ("composer", &["install"]),
    ("typings", &["install"]),
];

/// Look up the built-in command for a manifest base name.
pub fn default_command_for_file(file_name: &str) -> Option<&'static str> {
    DEFAULT_FILE_COMMANDS
        .iter()
        .find(|(file, _)| *file == file_name)
        .map(|(_, cmd)| *cmd)
}

/// Base arguments for a command; unknown commands start empty.
pub fn default_args_for(command: &str) -> &'static [&'static str] {
    DEFAULT_COMMAND_ARGS
        .iter()
        .find(|(name, _)| *name == command)
        .map(|(_, args)| *args)
        .unwrap_or(&[])
}

/// Where a flag rule sits relative to the user-supplied extra arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulePhase {
    /// Before global and per-command extras.
    Leading,
    /// After global and per-command extras.
    Trailing,
}

/// A single option-driven flag that only some commands accept.
#[derive(Debug, Clone, Copy)]
pub struct FlagRule {
    /// Option name as users know it (used in logs).
    pub option: &'static str,
    /// Commands this flag is added to.
    pub commands: &'static [&'static str],
    /// Literal argument appended when the rule fires.
    pub arg: &'static str,
    pub phase: RulePhase,
    enabled: fn(&ReinstallConfig) -> bool,
}

impl FlagRule {
    /// Whether this rule adds its flag to `command` under `config`.
    pub fn applies(&self, command: &str, config: &ReinstallConfig) -> bool {
        self.commands.contains(&command) && (self.enabled)(config)
    }
}

/// Flag rules in application order. Within a phase, rules fire in the order
/// listed here.
pub const FLAG_RULES: &[FlagRule] = &[
    FlagRule {
        option: "production",
        commands: &["bower", "npm"],
        arg: "--production",
        phase: RulePhase::Leading,
        enabled: |cfg| cfg.production,
    },
    FlagRule {
        option: "ignore_scripts",
        commands: &["npm"],
        arg: "--ignore-scripts",
        phase: RulePhase::Leading,
        enabled: |cfg| cfg.ignore_scripts,
    },
    FlagRule {
        option: "allow_root",
        commands: &["bower"],
        arg: "--allow-root",
        phase: RulePhase::Trailing,
        enabled: |cfg| cfg.allow_root,
    },
    FlagRule {
        option: "no_optional",
        commands: &["npm"],
        arg: "--no-optional",
        phase: RulePhase::Trailing,
        enabled: |cfg| cfg.no_optional,
    },
];

/// Rules of one phase that fire for `command`, in table order.
pub fn active_rules<'a>(
    phase: RulePhase,
    command: &'a str,
    config: &'a ReinstallConfig,
) -> impl Iterator<Item = &'static FlagRule> + 'a {
    FLAG_RULES
        .iter()
        .filter(move |rule| rule.phase == phase && rule.applies(command, config))
}
