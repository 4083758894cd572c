// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;
use toml::Value;

use crate::command::flags::{flatten_flags, stringify_value};

/// Configuration for one pipeline invocation.
///
/// Mirrors a `Reinstall.toml` like:
///
/// ```toml
/// production = true
/// args = ["--no-audit"]
///
/// [commands]
/// "package.json" = "yarn"
///
/// # Anything else is extra arguments for the command of that name.
/// pip = "--user"
/// bower = { allowRoot = true, silent = true }
/// ```
///
/// Every field is optional; an empty file (or `ReinstallConfig::default()`)
/// gives the built-in behaviour.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReinstallConfig {
    /// Manifest base name → command name, merged over the built-in table.
    pub commands: BTreeMap<String, String>,

    /// Adds `--production` to npm and bower.
    pub production: bool,

    /// Adds `--ignore-scripts` to npm.
    #[serde(alias = "ignoreScripts")]
    pub ignore_scripts: bool,

    /// Adds `--no-optional` to npm.
    #[serde(alias = "noOptional")]
    pub no_optional: bool,

    /// Adds `--allow-root` to bower.
    #[serde(alias = "allowRoot")]
    pub allow_root: bool,

    /// Extra arguments appended to every generated command.
    pub args: Option<ArgList>,

    /// How many install commands may run at the same time.
    pub concurrency: usize,

    /// Extra arguments keyed by command name (`npm = ["--silent"]`).
    #[serde(flatten)]
    pub per_command: BTreeMap<String, ExtraArgs>,
}

impl Default for ReinstallConfig {
    fn default() -> Self {
        Self {
            commands: BTreeMap::new(),
            production: false,
            ignore_scripts: false,
            no_optional: false,
            allow_root: false,
            args: None,
            concurrency: default_concurrency(),
            per_command: BTreeMap::new(),
        }
    }
}

fn default_concurrency() -> usize {
    1
}

impl ReinstallConfig {
    /// Extra arguments configured for a command name, if any.
    pub fn extra_for(&self, command: &str) -> Option<&ExtraArgs> {
        self.per_command.get(command)
    }
}

/// Global extra arguments: a single value or a list of values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ArgList {
    Many(Vec<Value>),
    One(Value),
}

impl ArgList {
    /// Normalise to a list of argument strings. A lone `false`, `""` or `0`
    /// gives no arguments.
    pub fn to_args(&self) -> Vec<String> {
        match self {
            ArgList::Many(values) => values.iter().map(stringify_value).collect(),
            ArgList::One(value) if is_truthy(value) => vec![stringify_value(value)],
            ArgList::One(_) => Vec::new(),
        }
    }

    /// Whether this value contributes arguments at all.
    pub fn is_set(&self) -> bool {
        match self {
            ArgList::Many(_) => true,
            ArgList::One(value) => is_truthy(value),
        }
    }

    /// Append more string arguments, turning a single value into a list.
    pub fn extend<I, S>(self, more: I) -> ArgList
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut values = match self {
            ArgList::Many(values) => values,
            ArgList::One(value) if is_truthy(&value) => vec![value],
            ArgList::One(_) => Vec::new(),
        };
        values.extend(more.into_iter().map(|s| Value::String(s.into())));
        ArgList::Many(values)
    }
}

impl From<&str> for ArgList {
    fn from(arg: &str) -> Self {
        ArgList::One(Value::String(arg.to_string()))
    }
}

impl From<Vec<&str>> for ArgList {
    fn from(args: Vec<&str>) -> Self {
        ArgList::Many(args.into_iter().map(|s| Value::String(s.to_string())).collect())
    }
}

/// Per-command extra arguments.
///
/// Variant order matters for `serde(untagged)`: a list is tried first, then
/// a table, and anything else is taken as a single scalar.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ExtraArgs {
    /// Appended verbatim, each element stringified.
    List(Vec<Value>),
    /// Flattened into `--key=value` style flags.
    Flags(toml::Table),
    /// Stringified and appended as one argument.
    Single(Value),
}

impl ExtraArgs {
    pub fn to_args(&self) -> Vec<String> {
        match self {
            ExtraArgs::List(values) => values.iter().map(stringify_value).collect(),
            ExtraArgs::Flags(table) => flatten_flags(table),
            ExtraArgs::Single(value) if is_truthy(value) => vec![stringify_value(value)],
            ExtraArgs::Single(_) => Vec::new(),
        }
    }

    /// `npm = false` (or `""`, `0`) switches a command's extras off.
    pub fn is_set(&self) -> bool {
        match self {
            ExtraArgs::Single(value) => is_truthy(value),
            ExtraArgs::List(_) | ExtraArgs::Flags(_) => true,
        }
    }
}

/// TOML has no null, so `false`, `""` and `0` stand for "not configured".
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Boolean(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Integer(i) => *i != 0,
        Value::Float(f) => *f != 0.0 && !f.is_nan(),
        Value::Datetime(_) | Value::Array(_) | Value::Table(_) => true,
    }
}

impl From<&str> for ExtraArgs {
    fn from(arg: &str) -> Self {
        ExtraArgs::Single(Value::String(arg.to_string()))
    }
}

impl From<Vec<&str>> for ExtraArgs {
    fn from(args: Vec<&str>) -> Self {
        ExtraArgs::List(args.into_iter().map(|s| Value::String(s.to_string())).collect())
    }
}

impl From<toml::Table> for ExtraArgs {
    fn from(table: toml::Table) -> Self {
        ExtraArgs::Flags(table)
    }
}
