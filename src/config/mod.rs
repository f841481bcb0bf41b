//! Configuration system for Onomo.
//!
//! Three-layer configuration hierarchy:
//! 1. Option defaults (the schema)
//! 2. Config file (~/.config/onomo/onomo.cfg or --configfile)
//! 3. Command-line overrides

use std::path::{Path, PathBuf};

use crate::error::Result;

// Re-export main types
pub use self::file::{ConfigFile, SECTION, ensure_config_file, render_template};
pub use self::overrides::CliOverrides;
pub use self::resolution::{ConfigResolver, ConfigSource};
pub use self::resolved::{ResolvedConfig, minutes};
pub use self::schema::{Channel, OptionDescriptor, OptionKey, OptionValue, schema};
pub use self::validators::{ValidationError, Validator};

mod file;
mod overrides;
mod resolution;
mod resolved;
pub mod schema;
pub mod validators;

/// Config file name inside the per-user config directory.
pub const CONFIG_FILE_NAME: &str = "onomo.cfg";

/// Per-user config file location.
///
/// `~/.config/onomo/onomo.cfg` on Linux, falling back to `./onomo.cfg`
/// when no config directory is known.
pub fn default_config_path() -> PathBuf {
    let project_name = env!("CARGO_PKG_NAME");
    dirs::config_dir()
        .map(|dir| dir.join(project_name).join(CONFIG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

/// Create the template if needed, read the file, and resolve against `overrides`.
pub fn load_config(path: &Path, overrides: &CliOverrides) -> Result<ResolvedConfig> {
    let resolver = ConfigResolver::default();
    ensure_config_file(path, resolver.options())?;
    let file = ConfigFile::load(path)?;
    resolver.resolve(&file, overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_path() {
        let path = default_config_path();
        assert!(path.ends_with(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_load_config_first_run_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("onomo").join(CONFIG_FILE_NAME);

        let config = load_config(&path, &CliOverrides::none()).unwrap();
        assert!(path.exists());
        assert_eq!(config.long_per, 4);
        assert_eq!(config.source(OptionKey::PomoMins), Some(ConfigSource::Default));
    }

    #[test]
    fn test_load_config_reads_user_edits() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[onomo]\npomomins = 50\n").unwrap();

        let config = load_config(&path, &CliOverrides::none()).unwrap();
        assert_eq!(config.pomo_mins, 50.0);
    }
}
