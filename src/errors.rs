// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReinstallError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// The program could not be started at all (missing executable,
    /// permission denied, bad working directory).
    #[error("failed to launch \"{program}\": {source}")]
    ProcessLaunchFailure {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited with a non-zero status.
    #[error("\"{program}\" exited with non-zero code {code}")]
    ProcessFailure { program: String, code: i32 },

    #[error("command queue dropped the job before it completed")]
    QueueClosed,
}

impl ReinstallError {
    /// Exit code of a failed process, if this error came from one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ReinstallError::ProcessFailure { code, .. } => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReinstallError>;
