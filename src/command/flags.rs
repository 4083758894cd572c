// src/command/flags.rs

//! Flattening key/value tables into command-line flags.
//!
//! ```toml
//! npm = { registry = "https://example.org", saveExact = true, audit = false }
//! ```
//!
//! becomes `--registry=https://example.org --save-exact --no-audit`.
//!
//! Rules, per entry in declaration order:
//! - `true` → `--key`, `false` → `--no-key`
//! - arrays repeat the flag once per element
//! - any other value → `--key=value`
//! - the special key `_` holds positional arguments, emitted after all flags
//! - the special key `--` holds arguments emitted last, after a literal `--`

use std::sync::LazyLock;

use regex::Regex;
use toml::{Table, Value};

static UPPERCASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[A-Z]").expect("uppercase pattern is valid"));

/// Flatten a table into CLI arguments.
pub fn flatten_flags(table: &Table) -> Vec<String> {
    let mut flags = Vec::new();
    let mut positional = Vec::new();
    let mut separated = Vec::new();

    for (key, value) in table {
        match key.as_str() {
            "_" => positional.extend(list_of(value)),
            "--" => separated.extend(list_of(value)),
            _ => push_flag(&mut flags, &flag_name(key), value),
        }
    }

    flags.extend(positional);
    if !separated.is_empty() {
        flags.push("--".to_string());
        flags.extend(separated);
    }
    flags
}

/// Convert a camelCase key to its hyphenated flag name (`allowRoot` →
/// `allow-root`). Underscores and existing hyphens are kept as-is.
pub fn flag_name(key: &str) -> String {
    UPPERCASE.replace_all(key, "-$0").to_lowercase()
}

/// String form of a configuration value as it appears on a command line.
///
/// Strings are used raw (no TOML quoting); arrays are joined with `,`.
pub fn stringify_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Datetime(dt) => dt.to_string(),
        Value::Array(items) => items
            .iter()
            .map(stringify_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Table(_) => value.to_string(),
    }
}

fn push_flag(out: &mut Vec<String>, name: &str, value: &Value) {
    match value {
        Value::Boolean(true) => out.push(format!("--{name}")),
        Value::Boolean(false) => out.push(format!("--no-{name}")),
        Value::Array(items) => {
            for item in items {
                push_flag(out, name, item);
            }
        }
        other => out.push(format!("--{name}={}", stringify_value(other))),
    }
}

fn list_of(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().map(stringify_value).collect(),
        other => vec![stringify_value(other)],
    }
}
