// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::ReinstallConfig;
use crate::config::validate::validate_config;
use crate::errors::Result;

/// Load a configuration file from a given path.
///
/// This only performs TOML deserialization; use [`load_and_validate`] to
/// also check the values.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ReinstallConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: ReinstallConfig = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run validation.
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Rejects a zero `concurrency` and malformed `[commands]` entries.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ReinstallConfig> {
    let config = load_from_path(&path)?;
    validate_config(&config)?;
    Ok(config)
}

/// Like [`load_and_validate`], but a missing file yields the default
/// configuration instead of an error.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<ReinstallConfig> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "no config file; using built-in defaults");
        return Ok(ReinstallConfig::default());
    }
    load_and_validate(path)
}

/// Config file looked up in the current working directory when `--config`
/// is not given.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Reinstall.toml")
}
