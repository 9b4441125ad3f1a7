//! grex configuration loading from `.grexrc.toml`.
//!
//! Configuration is optional: grex uses defaults when no config file exists
//! or when it cannot be parsed.
//!
//! # Example Configuration
//!
//! ```toml
//! [cache]
//! initial_capacity = 1024
//!
//! [replay]
//! strict = false
//!
//! [output]
//! format = "json"
//! color = false
//! compact = true
//! ```

use serde::Deserialize;
use std::path::Path;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE: &str = ".grexrc.toml";

/// Root configuration structure loaded from `.grexrc.toml`.
///
/// All sections are optional and fall back to defaults.
#[derive(Debug, Deserialize, Default)]
pub struct GrexConfig {
    /// Vertex cache sizing.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Session replay behavior.
    #[serde(default)]
    pub replay: ReplayConfig,

    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,
}

/// Vertex cache configuration.
#[derive(Debug, Deserialize, Default)]
pub struct CacheConfig {
    /// Number of vertices to pre-size the store for.
    ///
    /// Default: `0` (grow on demand).
    #[serde(default)]
    pub initial_capacity: usize,
}

/// Session replay configuration.
#[derive(Debug, Deserialize)]
pub struct ReplayConfig {
    /// Abort on the first malformed session line.
    ///
    /// When `false`, malformed lines are skipped with a warning.
    /// Default: `true`
    #[serde(default = "default_strict")]
    pub strict: bool,
}

fn default_strict() -> bool {
    true
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self { strict: true }
    }
}

/// Output formatting preferences.
///
/// Command-line flags (e.g., `--format json`) override these settings.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Default output format: `table` or `json`.
    #[serde(default)]
    pub format: Option<String>,

    /// Force colored output on or off.
    ///
    /// Defaults to auto-detection (colors when stdout is a TTY).
    #[serde(default)]
    pub color: Option<bool>,

    /// Single-line JSON and borderless tables.
    #[serde(default)]
    pub compact: bool,
}

impl GrexConfig {
    /// Load configuration from `.grexrc.toml` in the given directory.
    ///
    /// If the config file doesn't exist or can't be parsed, returns defaults.
    /// Parse errors are logged as warnings but don't cause failures.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", config_path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", CONFIG_FILE, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", CONFIG_FILE, e);
                }
            }
        }
        Self::default()
    }

    /// Get the default output format, if configured.
    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    /// Color override, or `None` to auto-detect.
    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }

    /// Whether compact output is the default.
    pub fn compact_output(&self) -> bool {
        self.output.compact
    }

    /// Initial vertex capacity for the cache.
    pub fn initial_capacity(&self) -> usize {
        self.cache.initial_capacity
    }

    /// Whether malformed session lines abort the replay.
    pub fn strict_replay(&self) -> bool {
        self.replay.strict
    }
}
