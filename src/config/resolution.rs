//! Configuration resolution (3-layer merge).
//!
//! Resolves the effective configuration from:
//! 1. Option defaults (schema)
//! 2. Config file values (validated here)
//! 3. CLI overrides (validated at parse time)

use std::fmt;

use crate::error::{OnomoError, Result};

use super::file::ConfigFile;
use super::overrides::CliOverrides;
use super::resolved::ResolvedConfig;
use super::schema::{self, OptionDescriptor};

/// Source tracking for configuration values (for introspection).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Compiled-in default value.
    Default,
    /// From the config file.
    File,
    /// From a command-line flag.
    Cli,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Cli => write!(f, "cli"),
        }
    }
}

/// Configuration resolver that merges all three layers.
#[derive(Debug, Clone, Copy)]
pub struct ConfigResolver {
    options: &'static [OptionDescriptor],
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new(schema::schema())
    }
}

impl ConfigResolver {
    pub fn new(options: &'static [OptionDescriptor]) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &'static [OptionDescriptor] {
        self.options
    }

    /// Resolve the effective configuration.
    ///
    /// Precedence is CLI > file > default. Defaults are not re-validated.
    /// A file value that fails its validator aborts resolution; no partial
    /// configuration is returned.
    pub fn resolve(&self, file: &ConfigFile, overrides: &CliOverrides) -> Result<ResolvedConfig> {
        let mut config = ResolvedConfig::empty();

        for descriptor in self.options {
            let mut value = descriptor.default_value();
            let mut source = ConfigSource::Default;

            if let Some(raw) = file.get(descriptor.name) {
                value = descriptor.validate(raw).map_err(|e| OnomoError::FileValue {
                    option: descriptor.name.to_string(),
                    value: raw.to_string(),
                    path: file.path().to_path_buf(),
                    reason: e.reason().to_string(),
                })?;
                source = ConfigSource::File;
            }

            if let Some(cli_value) = overrides.get(descriptor.key) {
                value = cli_value.clone();
                source = ConfigSource::Cli;
            }

            log::debug!("Resolved {} = {} ({})", descriptor.name, value, source);
            config.assign(descriptor.name, descriptor.key, value, source)?;
        }

        Ok(config)
    }
}
