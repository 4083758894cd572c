#![allow(dead_code)]

use reinstall::config::{ArgList, ExtraArgs, ReinstallConfig};

/// Builder for `ReinstallConfig` to simplify test setup.
pub struct ConfigBuilder {
    config: ReinstallConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ReinstallConfig::default(),
        }
    }

    pub fn production(mut self, val: bool) -> Self {
        self.config.production = val;
        self
    }

    pub fn ignore_scripts(mut self, val: bool) -> Self {
        self.config.ignore_scripts = val;
        self
    }

    pub fn no_optional(mut self, val: bool) -> Self {
        self.config.no_optional = val;
        self
    }

    pub fn allow_root(mut self, val: bool) -> Self {
        self.config.allow_root = val;
        self
    }

    pub fn args(mut self, args: impl Into<ArgList>) -> Self {
        self.config.args = Some(args.into());
        self
    }

    /// Map a manifest file name to a command name.
    pub fn command(mut self, file: &str, command: &str) -> Self {
        self.config
            .commands
            .insert(file.to_string(), command.to_string());
        self
    }

    /// Extra arguments for one command name.
    pub fn extra(mut self, command: &str, extra: impl Into<ExtraArgs>) -> Self {
        self.config
            .per_command
            .insert(command.to_string(), extra.into());
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n;
        self
    }

    pub fn build(self) -> ReinstallConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
