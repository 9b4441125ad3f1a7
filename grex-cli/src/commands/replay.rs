//! Replay command - Feed a session through the cache and show enrich results

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

use super::replay_file;
use crate::config::GrexConfig;
use crate::output::{flag, Output, OutputConfig, Outputter, TableOutput};
use crate::session::EnrichOutcome;

/// Result of replaying one session.
#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub events: usize,
    pub skipped: usize,
    pub enriched: Vec<EnrichOutcome>,
}

impl Outputter for ReplayReport {
    fn to_table(&self, config: &OutputConfig) -> String {
        let mut output = String::new();
        let header = format!(
            "Replayed {} events ({} enrichments, {} skipped)",
            self.events,
            self.enriched.len(),
            self.skipped
        );
        if config.use_colors() {
            output.push_str(&header.cyan().bold().to_string());
        } else {
            output.push_str(&header);
        }
        output.push_str("\n\n");

        let rows = self
            .enriched
            .iter()
            .map(|o| {
                vec![
                    o.line.to_string(),
                    o.vertex.id.clone(),
                    flag(o.cached, config),
                    o.vertex.out_edge_ids.join(","),
                    flag(o.vertex.out_edges_complete, config),
                    o.vertex.in_edge_ids.join(","),
                    flag(o.vertex.in_edges_complete, config),
                ]
            })
            .collect();

        output.push_str(&TableOutput::format_rows(
            &["Line", "Vertex", "Cached", "Out edges", "Out done", "In edges", "In done"],
            rows,
            config,
        ));
        output
    }
}

/// Run the replay command
pub async fn run(path: &Path, config: &GrexConfig, output: OutputConfig) -> Result<()> {
    let replayed = replay_file(path, config).await?;

    let report = ReplayReport {
        events: replayed.events,
        skipped: replayed.skipped,
        enriched: replayed.outcomes,
    };
    Output::with_config(report, output).render()
}
