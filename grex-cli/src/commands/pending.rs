//! Pending command - List vertices whose edges are not fully loaded

use anyhow::Result;
use grex_core::{Direction, VertexEdgeCache};
use serde::Serialize;
use std::path::Path;

use super::replay_file;
use crate::config::GrexConfig;
use crate::output::{Output, OutputConfig, Outputter, TableOutput};

/// Which edge directions to check.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum DirectionFilter {
    Out,
    In,
    #[default]
    Both,
}

impl DirectionFilter {
    pub fn directions(&self) -> &'static [Direction] {
        match self {
            DirectionFilter::Out => &[Direction::Out],
            DirectionFilter::In => &[Direction::In],
            DirectionFilter::Both => &Direction::ALL,
        }
    }
}

/// A vertex that still needs an edge fetch.
#[derive(Debug, Clone, Serialize)]
pub struct PendingVertex {
    pub id: String,
    /// Directions still incomplete, out before in.
    pub directions: Vec<Direction>,
    /// Edge ids already known in those directions.
    pub known_edges: usize,
}

#[derive(Debug, Serialize)]
pub struct PendingReport {
    pub pending: Vec<PendingVertex>,
}

impl Outputter for PendingReport {
    fn to_table(&self, config: &OutputConfig) -> String {
        let rows = self
            .pending
            .iter()
            .map(|p| {
                let dirs: Vec<&str> = p.directions.iter().map(Direction::as_str).collect();
                vec![p.id.clone(), dirs.join(","), p.known_edges.to_string()]
            })
            .collect();
        TableOutput::format_rows(&["Vertex", "Needs fetch", "Known edges"], rows, config)
    }
}

/// Collect cached vertices that need a fetch in any of `filter`'s directions.
pub fn find_pending(cache: &VertexEdgeCache, filter: DirectionFilter) -> Vec<PendingVertex> {
    let mut pending: Vec<PendingVertex> = cache
        .iter()
        .filter_map(|v| {
            let directions: Vec<Direction> = filter
                .directions()
                .iter()
                .copied()
                .filter(|d| cache.needs_fetch(&v.id, *d))
                .collect();
            if directions.is_empty() {
                return None;
            }
            let known_edges = directions.iter().map(|d| v.edge_ids(*d).len()).sum();
            Some(PendingVertex {
                id: v.id.clone(),
                directions,
                known_edges,
            })
        })
        .collect();
    pending.sort_by(|a, b| a.id.cmp(&b.id));
    pending
}

/// Run the pending command
pub async fn run(
    path: &Path,
    filter: DirectionFilter,
    config: &GrexConfig,
    output: OutputConfig,
) -> Result<()> {
    let replayed = replay_file(path, config).await?;
    let pending = find_pending(&replayed.cache, filter);
    tracing::debug!("{} of {} vertices pending", pending.len(), replayed.cache.len());

    Output::with_config(PendingReport { pending }, output).render()
}
