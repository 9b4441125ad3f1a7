//! Data models for vertices as seen by the exploration UI.
//!
//! A [`VertexRecord`] is what one fetch knows about a vertex: the edge ids
//! loaded so far in each direction, whether each direction is fully loaded,
//! and the per-label [`EdgeInfo`] payload.
//!
//! The serialized form follows the Gremlin vertex shape (`outE` / `inE` maps
//! keyed by edge label) with camelCase bookkeeping fields.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One edge direction relative to a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Edges originating at the vertex.
    Out,
    /// Edges terminating at the vertex.
    In,
}

impl Direction {
    /// Both directions, out first.
    pub const ALL: [Direction; 2] = [Direction::Out, Direction::In];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Out => "out",
            Direction::In => "in",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "out" => Ok(Direction::Out),
            "in" => Ok(Direction::In),
            _ => Err(format!("Unknown edge direction: '{}'", s)),
        }
    }
}

/// An outgoing edge as listed on its source vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutEdgeRef {
    /// Edge id
    pub id: String,
    /// Target vertex id
    #[serde(rename = "inV")]
    pub in_v: String,
}

impl OutEdgeRef {
    pub fn new(id: impl Into<String>, in_v: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            in_v: in_v.into(),
        }
    }
}

/// An incoming edge as listed on its target vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InEdgeRef {
    /// Edge id
    pub id: String,
    /// Source vertex id
    #[serde(rename = "outV")]
    pub out_v: String,
}

impl InEdgeRef {
    pub fn new(id: impl Into<String>, out_v: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            out_v: out_v.into(),
        }
    }
}

/// Per-label edge metadata attached to a vertex's neighborhood.
///
/// The cache never inspects this payload; it only hands it to an
/// [`EdgeInfoMerge`](crate::edge_info::EdgeInfoMerge) implementation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeInfo {
    /// Outgoing edges grouped by label
    #[serde(rename = "outE", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub out_e: BTreeMap<String, Vec<OutEdgeRef>>,
    /// Incoming edges grouped by label
    #[serde(rename = "inE", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub in_e: BTreeMap<String, Vec<InEdgeRef>>,
}

impl EdgeInfo {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an outgoing edge under `label`.
    pub fn with_out_edge(mut self, label: &str, edge: OutEdgeRef) -> Self {
        self.out_e.entry(label.to_string()).or_default().push(edge);
        self
    }

    /// Add an incoming edge under `label`.
    pub fn with_in_edge(mut self, label: &str, edge: InEdgeRef) -> Self {
        self.in_e.entry(label.to_string()).or_default().push(edge);
        self
    }

    /// Total number of edge entries across labels and directions.
    pub fn edge_count(&self) -> usize {
        self.out_e.values().map(Vec::len).sum::<usize>()
            + self.in_e.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.edge_count() == 0
    }
}

/// One graph vertex as known to the exploration UI.
///
/// The completeness flags are authoritative: they are never derived from the
/// length of the edge-id lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VertexRecord {
    /// Stable identifier; the cache key.
    pub id: String,
    /// Vertex label.
    #[serde(default)]
    pub label: String,
    /// Edge ids known to originate at this vertex.
    #[serde(default)]
    pub out_edge_ids: Vec<String>,
    /// Edge ids known to terminate at this vertex.
    #[serde(default)]
    pub in_edge_ids: Vec<String>,
    /// All out-edges have been loaded.
    #[serde(default)]
    pub out_edges_complete: bool,
    /// All in-edges have been loaded.
    #[serde(default)]
    pub in_edges_complete: bool,
    /// Edge metadata payload.
    #[serde(flatten)]
    pub edge_info: EdgeInfo,
}

impl VertexRecord {
    /// Create a vertex shell with no edge state.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set the vertex label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the edge ids and completeness flag for one direction.
    pub fn with_edges<I, S>(mut self, direction: Direction, ids: I, complete: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids = ids.into_iter().map(Into::into).collect();
        match direction {
            Direction::Out => {
                self.out_edge_ids = ids;
                self.out_edges_complete = complete;
            }
            Direction::In => {
                self.in_edge_ids = ids;
                self.in_edges_complete = complete;
            }
        }
        self
    }

    /// Replace the edge-info payload.
    pub fn with_edge_info(mut self, edge_info: EdgeInfo) -> Self {
        self.edge_info = edge_info;
        self
    }

    /// Edge ids known in `direction`.
    pub fn edge_ids(&self, direction: Direction) -> &[String] {
        match direction {
            Direction::Out => &self.out_edge_ids,
            Direction::In => &self.in_edge_ids,
        }
    }

    /// Completeness flag for `direction`.
    pub fn is_complete(&self, direction: Direction) -> bool {
        match direction {
            Direction::Out => self.out_edges_complete,
            Direction::In => self.in_edges_complete,
        }
    }
}
