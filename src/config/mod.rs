//! Configuration system for yamlkit.
//!
//! This module provides the configuration structure for yamlkit with sensible defaults
//! and support for serialization/deserialization via serde. Configuration is loaded
//! from `~/.config/yamlkit/config.toml` and controls how files are written.
//!
//! # Example
//!
//! ```
//! use yamlkit::config::Config;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert!(config.atomic_write);
//! assert_eq!(config.file_mode, 0o644);
//!
//! // Create custom configuration
//! let custom = Config {
//!     create_backup: true,
//!     ..Config::default()
//! };
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for yamlkit.
///
/// All fields have sensible defaults via `Config::default()`.
///
/// # Fields
///
/// * `create_backup` - Copy the existing file to `<name>.bak` before overwriting (default: false)
/// * `atomic_write` - Write to a temp file and rename it over the target (default: true)
/// * `file_mode` - Unix permission bits for written files (default: 0o644)
/// * `json_pretty` - Pretty-print JSON output on the command line (default: true)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Create .bak files before saving
    #[serde(default)]
    pub create_backup: bool,

    /// Write through a temp file and rename
    #[serde(default = "default_atomic_write")]
    pub atomic_write: bool,

    /// Permission bits for written files
    #[serde(default = "default_file_mode")]
    pub file_mode: u32,

    /// Pretty-print JSON output
    #[serde(default = "default_json_pretty")]
    pub json_pretty: bool,
}

/// Returns the default for atomic writes.
fn default_atomic_write() -> bool {
    true
}

/// Returns the default permission bits (rw-r--r--).
fn default_file_mode() -> u32 {
    0o644
}

/// Returns the default for pretty JSON output.
fn default_json_pretty() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            create_backup: false,
            atomic_write: default_atomic_write(),
            file_mode: default_file_mode(),
            json_pretty: default_json_pretty(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/yamlkit/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("yamlkit");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to defaults on any error.
    pub fn load_from(path: &std::path::Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "could not read config, using defaults");
                return Self::default();
            }
        };

        toml::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), %err, "invalid config, using defaults");
            Self::default()
        })
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, toml_string)?;

        Ok(())
    }
}
