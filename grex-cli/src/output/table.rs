//! Table output formatting using the `tabled` crate

use super::{truncate, OutputConfig};
use tabled::{
    builder::Builder,
    settings::{Style, Width},
};

/// Widest a single cell may get before it is truncated.
const MAX_CELL_WIDTH: usize = 48;

/// Table output formatter
pub struct TableOutput;

impl TableOutput {
    /// Format rows under the given headers.
    ///
    /// Returns "(no results)" when `rows` is empty.
    pub fn format_rows(headers: &[&str], rows: Vec<Vec<String>>, config: &OutputConfig) -> String {
        if rows.is_empty() {
            return "(no results)".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(headers.iter().map(|h| h.to_string()));

        for row in rows {
            if config.should_truncate() {
                builder.push_record(row.iter().map(|cell| truncate(cell, MAX_CELL_WIDTH)));
            } else {
                builder.push_record(row);
            }
        }

        let mut table = builder.build();
        if config.compact {
            table.with(Style::blank());
        } else {
            table.with(Style::rounded());
        }

        if config.should_truncate() {
            table.with(Width::truncate(config.effective_width()));
        }

        table.to_string()
    }

    /// Format key/value pairs as a two-column table.
    pub fn format_key_value(pairs: &[(&str, String)], config: &OutputConfig) -> String {
        let rows = pairs
            .iter()
            .map(|(k, v)| vec![k.to_string(), v.clone()])
            .collect();
        Self::format_rows(&["Key", "Value"], rows, config)
    }
}
