//! Output formatting module for the grex CLI
//!
//! Provides unified output formatting across commands with two formats:
//! table (human-readable) and json (machine-readable).
//!
//! Automatically detects TTY context to adjust colors and truncation behavior.

use clap::ValueEnum;
use serde::Serialize;
use std::io::IsTerminal;
use std::str::FromStr;

mod json;
mod table;

pub use self::json::JsonOutput;
pub use self::table::TableOutput;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format (default)
    #[default]
    Table,
    /// JSON format for machine consumption
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: '{}'", s)),
        }
    }
}

/// Configuration for output rendering
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// The output format to use
    pub format: OutputFormat,
    /// Disable colored output
    pub no_color: bool,
    /// Disable truncation of long values
    pub no_truncate: bool,
    /// Compact mode: single-line JSON, borderless tables
    pub compact: bool,
}

impl OutputConfig {
    /// Create a new OutputConfig with the specified format
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            no_color: false,
            no_truncate: false,
            compact: false,
        }
    }

    /// Create an OutputConfig with automatic TTY detection and optional color override.
    ///
    /// When output is not a TTY (piped or redirected), truncation is disabled
    /// and colors are off unless `color_override` is `Some(true)`.
    pub fn auto_detect(format: OutputFormat, color_override: Option<bool>, compact: bool) -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let use_color = color_override.unwrap_or(is_tty);
        Self {
            no_color: !use_color,
            no_truncate: !is_tty,
            compact,
            ..Self::new(format)
        }
    }

    /// Terminal width, or 80 when it cannot be detected
    pub fn effective_width(&self) -> usize {
        terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80)
    }

    /// Check if colors should be used
    pub fn use_colors(&self) -> bool {
        !self.no_color
    }

    /// Check if long values should be truncated
    pub fn should_truncate(&self) -> bool {
        !self.no_truncate
    }
}

/// Types that can render themselves in every output format.
pub trait Outputter: Serialize {
    /// Human-readable rendering
    fn to_table(&self, config: &OutputConfig) -> String;

    /// Machine-readable rendering
    fn to_json(&self, config: &OutputConfig) -> String {
        JsonOutput::format(self, config)
    }

    /// Render using the format specified in config
    fn render(&self, config: &OutputConfig) -> String {
        match config.format {
            OutputFormat::Table => self.to_table(config),
            OutputFormat::Json => self.to_json(config),
        }
    }
}

/// Result wrapper that prints data in the configured format
pub struct Output<T> {
    data: T,
    config: OutputConfig,
}

impl<T: Outputter> Output<T> {
    /// Create a new output wrapper with full config
    pub fn with_config(data: T, config: OutputConfig) -> Self {
        Self { data, config }
    }

    /// Render the output to stdout
    pub fn render(&self) -> anyhow::Result<()> {
        println!("{}", self.render_to_string());
        Ok(())
    }

    /// Get the rendered string without printing
    pub fn render_to_string(&self) -> String {
        self.data.render(&self.config)
    }
}

/// Truncate a string to `max_width` characters, adding "..." when cut.
pub fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return s.chars().take(max_width).collect();
    }
    let kept: String = s.chars().take(max_width - 3).collect();
    format!("{}...", kept)
}

/// Render a yes/no flag, colored when enabled.
pub fn flag(value: bool, config: &OutputConfig) -> String {
    use colored::Colorize;
    match (value, config.use_colors()) {
        (true, true) => "yes".green().to_string(),
        (false, true) => "no".red().to_string(),
        (true, false) => "yes".to_string(),
        (false, false) => "no".to_string(),
    }
}
