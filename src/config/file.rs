//! Config file reading and template generation.
//!
//! The file is INI-style with a single `[onomo]` section:
//!
//! ```text
//! [onomo]
//! ## Length of pomodoros in minutes
//! #pomomins = 25
//! longper = 3
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{OnomoError, Result};

use super::schema::{self, OptionDescriptor};

/// Name of the section holding option assignments.
pub const SECTION: &str = "onomo";

/// Raw values read from a config file, keyed by option name.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl ConfigFile {
    /// A file with no assignments, for runs where nothing was read.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            values: HashMap::new(),
        }
    }

    /// Read and parse the file at `path`. A missing file yields no values.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("Config file {} does not exist, no file values", path.display());
            return Ok(Self::empty(path));
        }
        let content = fs::read_to_string(path)?;
        let file = Self::parse(path, &content)?;
        log::info!("Loaded config from: {}", path.display());
        Ok(file)
    }

    /// Parse config text. `path` is only used for error reporting.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let mut values = HashMap::new();
        let mut section: Option<String> = None;

        for (index, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                let name = rest.strip_suffix(']').ok_or_else(|| OnomoError::ConfigParse {
                    path: path.to_path_buf(),
                    line: index + 1,
                    message: format!("unterminated section header '{}'", line),
                })?;
                section = Some(name.trim().to_string());
                continue;
            }

            let (key, value) = split_assignment(line).ok_or_else(|| OnomoError::ConfigParse {
                path: path.to_path_buf(),
                line: index + 1,
                message: format!("expected 'name = value', found '{}'", line),
            })?;

            match section.as_deref() {
                None => {
                    return Err(OnomoError::ConfigParse {
                        path: path.to_path_buf(),
                        line: index + 1,
                        message: format!("assignment to '{}' before any [{}] section", key, SECTION),
                    });
                }
                Some(SECTION) => {
                    if schema::find(key).is_none() {
                        log::warn!("Ignoring unknown option '{}' in {}", key, path.display());
                    }
                    values.insert(key.to_string(), value.to_string());
                }
                Some(other) => {
                    log::warn!("Ignoring '{}' in section [{}] of {}", key, other, path.display());
                }
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw value for an option, if the file assigns one.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Split `key = value` or `key: value`, whichever delimiter comes first.
fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let at = line.find(['=', ':'])?;
    let key = line[..at].trim();
    if key.is_empty() {
        return None;
    }
    Some((key, line[at + 1..].trim()))
}

/// Render the commented-out template for `options`.
pub fn render_template(options: &[OptionDescriptor]) -> String {
    let mut out = String::new();
    out.push_str("# Onomo-Pomo configuration. Uncomment a line to override its default.\n");
    out.push_str(&format!("[{}]\n", SECTION));
    for descriptor in options {
        out.push('\n');
        out.push_str(&format!("## {}\n", descriptor.description));
        out.push_str(&format!("#{} = {}\n", descriptor.name, descriptor.template_value()));
    }
    out
}

/// Write the template to `path` unless a file is already there.
///
/// Returns `true` when the file was created.
pub fn ensure_config_file(path: &Path, options: &[OptionDescriptor]) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_template(options))?;
    log::info!("Created config template at: {}", path.display());
    Ok(true)
}
