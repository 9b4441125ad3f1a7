//! Status command - Show every cached vertex after replaying a session

use anyhow::Result;
use colored::Colorize;
use grex_core::CacheStats;
use serde::Serialize;
use std::path::Path;

use super::replay_file;
use crate::config::GrexConfig;
use crate::output::{flag, Output, OutputConfig, Outputter, TableOutput};

/// Summary of one cached vertex.
#[derive(Debug, Clone, Serialize)]
pub struct VertexSummary {
    pub id: String,
    pub label: String,
    pub out_edges: usize,
    pub out_complete: bool,
    pub in_edges: usize,
    pub in_complete: bool,
    /// Entries in the edge-info payload across labels.
    pub edge_info_entries: usize,
}

/// Cache counters in serializable form.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    pub inserted: usize,
    pub merged: usize,
    pub enrich_hits: usize,
    pub enrich_misses: usize,
    pub enrich_hit_rate: f64,
}

impl From<&CacheStats> for StatsSummary {
    fn from(stats: &CacheStats) -> Self {
        Self {
            inserted: stats.inserted,
            merged: stats.merged,
            enrich_hits: stats.enrich_hits,
            enrich_misses: stats.enrich_misses,
            enrich_hit_rate: stats.enrich_hit_rate(),
        }
    }
}

/// Cache state after a replay.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub vertices: Vec<VertexSummary>,
    pub stats: StatsSummary,
}

impl Outputter for StatusReport {
    fn to_table(&self, config: &OutputConfig) -> String {
        let mut output = String::new();

        let title = format!("{} cached vertices", self.vertices.len());
        if config.use_colors() {
            output.push_str(&title.cyan().bold().to_string());
        } else {
            output.push_str(&title);
        }
        output.push_str("\n\n");

        let rows = self
            .vertices
            .iter()
            .map(|v| {
                vec![
                    v.id.clone(),
                    v.label.clone(),
                    v.out_edges.to_string(),
                    flag(v.out_complete, config),
                    v.in_edges.to_string(),
                    flag(v.in_complete, config),
                    v.edge_info_entries.to_string(),
                ]
            })
            .collect();
        output.push_str(&TableOutput::format_rows(
            &["Vertex", "Label", "Out", "Out done", "In", "In done", "Edge info"],
            rows,
            config,
        ));
        output.push_str("\n\n");

        output.push_str(&TableOutput::format_key_value(
            &[
                ("inserted", self.stats.inserted.to_string()),
                ("merged", self.stats.merged.to_string()),
                ("enrich hits", self.stats.enrich_hits.to_string()),
                ("enrich misses", self.stats.enrich_misses.to_string()),
                (
                    "enrich hit rate",
                    format!("{:.1}%", self.stats.enrich_hit_rate),
                ),
            ],
            config,
        ));
        output
    }
}

/// Run the status command
pub async fn run(path: &Path, config: &GrexConfig, output: OutputConfig) -> Result<()> {
    let replayed = replay_file(path, config).await?;
    let cache = &replayed.cache;

    let mut vertices: Vec<VertexSummary> = cache
        .iter()
        .map(|v| VertexSummary {
            id: v.id.clone(),
            label: v.label.clone(),
            out_edges: v.out_edge_ids.len(),
            out_complete: v.out_edges_complete,
            in_edges: v.in_edge_ids.len(),
            in_complete: v.in_edges_complete,
            edge_info_entries: v.edge_info.edge_count(),
        })
        .collect();
    vertices.sort_by(|a, b| a.id.cmp(&b.id));

    let report = StatusReport {
        vertices,
        stats: StatsSummary::from(&cache.stats()),
    };
    Output::with_config(report, output).render()
}
