// src/config/validate.rs

use crate::config::model::ReinstallConfig;
use crate::errors::{ReinstallError, Result};

/// Check a loaded configuration for values that can never work.
///
/// Per-command extra arguments are deliberately not checked: any value is
/// coerced to a string when the command is generated.
pub fn validate_config(cfg: &ReinstallConfig) -> Result<()> {
    validate_concurrency(cfg)?;
    validate_commands(cfg)?;
    Ok(())
}

fn validate_concurrency(cfg: &ReinstallConfig) -> Result<()> {
    if cfg.concurrency == 0 {
        return Err(ReinstallError::ConfigError(
            "concurrency must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_commands(cfg: &ReinstallConfig) -> Result<()> {
    for (file, command) in cfg.commands.iter() {
        if file.trim().is_empty() {
            return Err(ReinstallError::ConfigError(
                "[commands] contains an empty file name".to_string(),
            ));
        }
        if file.contains('/') || file.contains('\\') {
            return Err(ReinstallError::ConfigError(format!(
                "[commands] key '{}' must be a bare file name, not a path",
                file
            )));
        }
        if command.trim().is_empty() {
            return Err(ReinstallError::ConfigError(format!(
                "[commands] entry for '{}' has an empty command name",
                file
            )));
        }
    }
    Ok(())
}
