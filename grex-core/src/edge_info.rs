//! Edge-info merge collaborator.
//!
//! [`EdgeInfoMerge`] combines the edge-info payload of one record into
//! another. It operates on [`EdgeInfo`] only, so an implementation has no way
//! to touch the edge-id lists or completeness flags; those belong to
//! [`VertexEdgeCache`](crate::cache::VertexEdgeCache).
//!
//! Implementations must be idempotent: merging the same `from` twice leaves
//! `into` as merging it once did.

use std::collections::{BTreeMap, HashSet};

use crate::vertex::{EdgeInfo, InEdgeRef, OutEdgeRef};

/// Combines edge-info payloads in place.
pub trait EdgeInfoMerge {
    /// Fold `from` into `into`.
    fn merge(&self, into: &mut EdgeInfo, from: &EdgeInfo);
}

impl<F> EdgeInfoMerge for F
where
    F: Fn(&mut EdgeInfo, &EdgeInfo),
{
    fn merge(&self, into: &mut EdgeInfo, from: &EdgeInfo) {
        self(into, from)
    }
}

/// Default merge: per-label union keyed by edge id.
///
/// For every label in `from`, the label bucket is created in `into` if
/// missing, then each edge whose id is not already in that bucket is
/// appended. Existing entries keep their position and value.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnionEdgeInfo;

impl EdgeInfoMerge for UnionEdgeInfo {
    fn merge(&self, into: &mut EdgeInfo, from: &EdgeInfo) {
        union_buckets(&mut into.out_e, &from.out_e, |e: &OutEdgeRef| e.id.as_str());
        union_buckets(&mut into.in_e, &from.in_e, |e: &InEdgeRef| e.id.as_str());
    }
}

fn union_buckets<E, K>(
    into: &mut BTreeMap<String, Vec<E>>,
    from: &BTreeMap<String, Vec<E>>,
    edge_id: K,
) where
    E: Clone,
    K: Fn(&E) -> &str,
{
    for (label, edges) in from {
        let bucket = into.entry(label.clone()).or_default();
        let mut seen: HashSet<String> = bucket.iter().map(|e| edge_id(e).to_string()).collect();
        for edge in edges {
            if seen.insert(edge_id(edge).to_string()) {
                bucket.push(edge.clone());
            }
        }
    }
}
