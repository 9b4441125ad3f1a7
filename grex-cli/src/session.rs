//! Recorded exploration sessions.
//!
//! A session file is JSON Lines: one fetch event per non-blank line, in the
//! order the exploration layer handled them. Lines starting with `#` are
//! comments.
//!
//! ```text
//! {"op":"record","vertex":{"id":"v1","outEdgeIds":["e1"],"outEdgesComplete":true}}
//! {"op":"enrich","vertex":{"id":"v1"}}
//! ```
//!
//! Replaying a session feeds `record` events to
//! [`VertexEdgeCache::record_vertex`] and `enrich` events to
//! [`VertexEdgeCache::enrich_with_cached_edges`].

use anyhow::{Context, Result};
use grex_core::{VertexEdgeCache, VertexRecord};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One fetch event in a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum SessionEvent {
    /// A fetch result to absorb into the cache.
    Record { vertex: VertexRecord },
    /// A freshly built vertex to enrich from the cache.
    Enrich { vertex: VertexRecord },
}

/// An event tagged with its 1-based line number.
#[derive(Debug, Clone)]
pub struct NumberedEvent {
    pub line: usize,
    pub event: SessionEvent,
}

/// Result of one `enrich` event.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichOutcome {
    pub line: usize,
    /// Whether the cache knew the vertex.
    pub cached: bool,
    pub vertex: VertexRecord,
}

/// A parsed session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub events: Vec<NumberedEvent>,
    /// Malformed lines skipped in non-strict mode.
    pub skipped: usize,
}

impl Session {
    /// Parse session content.
    ///
    /// In strict mode the first malformed line is an error; otherwise it is
    /// skipped with a warning.
    pub fn parse(content: &str, strict: bool) -> Result<Self> {
        let mut session = Session::default();

        for (idx, raw) in content.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            match serde_json::from_str::<SessionEvent>(trimmed) {
                Ok(event) => session.events.push(NumberedEvent { line, event }),
                Err(e) if strict => {
                    return Err(e).with_context(|| format!("Malformed event on line {}", line));
                }
                Err(e) => {
                    tracing::warn!("Skipping malformed event on line {}: {}", line, e);
                    session.skipped += 1;
                }
            }
        }

        Ok(session)
    }

    /// Read and parse a session file.
    pub async fn load(path: &Path, strict: bool) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read session file {:?}", path))?;
        let session = Self::parse(&content, strict)
            .with_context(|| format!("Failed to parse session file {:?}", path))?;
        tracing::debug!(
            "Loaded {} events from {:?} ({} skipped)",
            session.events.len(),
            path,
            session.skipped
        );
        Ok(session)
    }

    /// Feed every event through `cache`, returning the enrich outcomes in order.
    pub fn replay(&self, cache: &mut VertexEdgeCache) -> Vec<EnrichOutcome> {
        let mut outcomes = Vec::new();

        for NumberedEvent { line, event } in &self.events {
            match event {
                SessionEvent::Record { vertex } => cache.record_vertex(vertex.clone()),
                SessionEvent::Enrich { vertex } => {
                    let mut target = vertex.clone();
                    let cached = cache.contains(&target.id);
                    cache.enrich_with_cached_edges(&mut target);
                    outcomes.push(EnrichOutcome {
                        line: *line,
                        cached,
                        vertex: target,
                    });
                }
            }
        }

        tracing::debug!(
            "Replayed {} events into {} cached vertices",
            self.events.len(),
            cache.len()
        );
        outcomes
    }
}
