//! Command implementations for the grex CLI
//!
//! Each command module provides a `run` function that executes the command logic.

pub mod completions;
pub mod pending;
pub mod replay;
pub mod status;

use anyhow::Result;
use grex_core::VertexEdgeCache;
use std::path::Path;

use crate::config::GrexConfig;
use crate::session::{EnrichOutcome, Session};

/// A session replayed into a fresh cache.
pub struct Replayed {
    pub cache: VertexEdgeCache,
    pub outcomes: Vec<EnrichOutcome>,
    pub events: usize,
    pub skipped: usize,
}

/// Load `path` and replay it into a cache sized from `config`.
pub async fn replay_file(path: &Path, config: &GrexConfig) -> Result<Replayed> {
    let session = Session::load(path, config.strict_replay()).await?;
    let mut cache = VertexEdgeCache::with_capacity(config.initial_capacity());
    let outcomes = session.replay(&mut cache);

    Ok(Replayed {
        cache,
        outcomes,
        events: session.events.len(),
        skipped: session.skipped,
    })
}
