//! Incremental vertex-edge cache.
//!
//! Holds one authoritative [`VertexRecord`] per vertex id while a graph is
//! explored one vertex at a time. Edges arrive in pages, so a vertex is often
//! recorded several times with partial data; the cache folds those fetches
//! together and lets callers ask whether a direction is already fully loaded.
//!
//! # Merge directions
//!
//! - [`VertexEdgeCache::record_vertex`] ingests a fresh fetch. The incoming
//!   record's edge-id lists and completeness flags overwrite the cached ones.
//! - [`VertexEdgeCache::enrich_with_cached_edges`] restores prior knowledge
//!   onto a freshly built vertex. The cached lists and flags overwrite the
//!   target's.
//!
//! Both directions union the edge-info payload through the configured
//! [`EdgeInfoMerge`].
//!
//! Flags are last-write-wins on ingestion: a stale partial fetch that
//! resolves after a complete one will mark the direction incomplete again.
//!
//! # Example
//!
//! ```rust
//! use grex_core::{Direction, VertexEdgeCache, VertexRecord};
//!
//! let mut cache = VertexEdgeCache::new();
//! cache.record_vertex(VertexRecord::new("v1").with_edges(Direction::Out, ["e1", "e2"], true));
//!
//! let mut shell = VertexRecord::new("v1");
//! cache.enrich_with_cached_edges(&mut shell);
//! assert_eq!(shell.out_edge_ids, vec!["e1", "e2"]);
//! assert!(!cache.needs_fetch("v1", Direction::Out));
//! ```

use std::cell::Cell;

use crate::edge_info::{EdgeInfoMerge, UnionEdgeInfo};
use crate::store::{KeyedObjectStore, MemoryStore};
use crate::vertex::{Direction, VertexRecord};

/// Counters for the paths taken through the cache.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Vertices recorded for the first time.
    pub inserted: usize,
    /// Records merged into an existing entry.
    pub merged: usize,
    /// Enrichments that found a cached entry.
    pub enrich_hits: usize,
    /// Enrichments for unknown ids (no-ops).
    pub enrich_misses: usize,
}

impl CacheStats {
    /// Enrichment hit rate as a percentage.
    pub fn enrich_hit_rate(&self) -> f64 {
        let total = self.enrich_hits + self.enrich_misses;
        if total == 0 {
            0.0
        } else {
            (self.enrich_hits as f64 / total as f64) * 100.0
        }
    }
}

/// Per-vertex edge-loading state for one exploration session.
pub struct VertexEdgeCache<S = MemoryStore<VertexRecord>, M = UnionEdgeInfo> {
    store: S,
    merger: M,
    stats: Cell<CacheStats>,
}

impl VertexEdgeCache {
    /// Create an empty cache over an in-memory store with the default merge.
    pub fn new() -> Self {
        Self::with_parts(MemoryStore::new(), UnionEdgeInfo)
    }

    /// Like [`new`](Self::new), with the store pre-sized for `capacity` vertices.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_parts(MemoryStore::with_capacity(capacity), UnionEdgeInfo)
    }
}

impl Default for VertexEdgeCache {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, M> VertexEdgeCache<S, M>
where
    S: KeyedObjectStore<VertexRecord>,
    M: EdgeInfoMerge,
{
    /// Build a cache from an explicit store and merge collaborator.
    pub fn with_parts(store: S, merger: M) -> Self {
        Self {
            store,
            merger,
            stats: Cell::new(CacheStats::default()),
        }
    }

    fn bump(&self, update: impl FnOnce(&mut CacheStats)) {
        let mut stats = self.stats.get();
        update(&mut stats);
        self.stats.set(stats);
    }

    /// Absorb a fetched vertex.
    ///
    /// Unknown ids are stored as-is. For a known id the edge-info payload is
    /// merged into the cached record, then the incoming edge-id lists and
    /// completeness flags replace the cached ones.
    pub fn record_vertex(&mut self, vertex: VertexRecord) {
        if let Ok(cached) = self.store.get_mut(&vertex.id) {
            self.merger.merge(&mut cached.edge_info, &vertex.edge_info);
            cached.out_edge_ids = vertex.out_edge_ids;
            cached.in_edge_ids = vertex.in_edge_ids;
            cached.out_edges_complete = vertex.out_edges_complete;
            cached.in_edges_complete = vertex.in_edges_complete;
            self.bump(|s| s.merged += 1);
            tracing::trace!(
                "Merged vertex {} (out complete: {}, in complete: {})",
                vertex.id,
                vertex.out_edges_complete,
                vertex.in_edges_complete
            );
            return;
        }

        tracing::debug!("Recorded new vertex {}", vertex.id);
        self.bump(|s| s.inserted += 1);
        self.store.set(vertex.id.clone(), vertex);
    }

    /// Fold cached edge state into a freshly fetched vertex.
    ///
    /// No-op when `target.id` was never recorded. Otherwise the cached
    /// edge-info payload is merged into `target`, and the cached edge-id lists
    /// and completeness flags replace the target's. The cached entry itself is
    /// not modified.
    pub fn enrich_with_cached_edges(&self, target: &mut VertexRecord) {
        let Ok(cached) = self.store.get(&target.id) else {
            self.bump(|s| s.enrich_misses += 1);
            return;
        };

        self.merger.merge(&mut target.edge_info, &cached.edge_info);
        target.out_edge_ids.clone_from(&cached.out_edge_ids);
        target.in_edge_ids.clone_from(&cached.in_edge_ids);
        target.out_edges_complete = cached.out_edges_complete;
        target.in_edges_complete = cached.in_edges_complete;

        self.bump(|s| s.enrich_hits += 1);
        tracing::trace!("Enriched vertex {} from cache", target.id);
    }

    /// True iff a record exists for `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.store.has(id)
    }

    /// The cached record for `id`, if any.
    pub fn vertex(&self, id: &str) -> Option<&VertexRecord> {
        self.store.get(id).ok()
    }

    /// Whether every edge in `direction` has been loaded for `id`.
    ///
    /// Unknown ids are never fully loaded.
    pub fn is_fully_loaded(&self, id: &str, direction: Direction) -> bool {
        self.vertex(id)
            .map(|v| v.is_complete(direction))
            .unwrap_or(false)
    }

    /// Whether a fetch in `direction` is still needed for `id`.
    pub fn needs_fetch(&self, id: &str, direction: Direction) -> bool {
        !self.is_fully_loaded(id, direction)
    }

    /// Number of cached vertices.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// True when no vertex has been recorded.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Iterate cached records in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &VertexRecord> + '_ {
        self.store.iter().map(|(_, v)| v)
    }

    /// Path counters since the cache was created or last cleared.
    pub fn stats(&self) -> CacheStats {
        self.stats.get()
    }

    /// End the exploration session: drop every record and reset counters.
    pub fn clear(&mut self) {
        tracing::debug!("Clearing vertex cache ({} entries)", self.store.len());
        self.store.clear();
        self.stats.set(CacheStats::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vertex::{EdgeInfo, InEdgeRef, OutEdgeRef};

    fn vertex(id: &str) -> VertexRecord {
        VertexRecord::new(id).with_label("person")
    }

    /// Cache whose merge collaborator only counts invocations.
    fn spy_cache(
        calls: &Cell<usize>,
    ) -> VertexEdgeCache<MemoryStore<VertexRecord>, impl Fn(&mut EdgeInfo, &EdgeInfo) + '_> {
        VertexEdgeCache::with_parts(MemoryStore::new(), move |_: &mut EdgeInfo, _: &EdgeInfo| {
            calls.set(calls.get() + 1)
        })
    }

    #[test]
    fn test_cache_new() {
        let cache = VertexEdgeCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn test_first_insertion_is_identity() {
        let mut cache = VertexEdgeCache::new();
        let v = vertex("v1")
            .with_edges(Direction::Out, ["e1", "e2"], true)
            .with_edges(Direction::In, ["e3"], false);
        cache.record_vertex(v.clone());

        assert_eq!(cache.vertex("v1"), Some(&v));

        let mut v2 = VertexRecord::new("v1");
        cache.enrich_with_cached_edges(&mut v2);

        assert_eq!(v2.out_edge_ids, v.out_edge_ids);
        assert_eq!(v2.in_edge_ids, v.in_edge_ids);
        assert_eq!(v2.out_edges_complete, v.out_edges_complete);
        assert_eq!(v2.in_edges_complete, v.in_edges_complete);
    }

    #[test]
    fn test_record_twice_is_idempotent() {
        let v = vertex("v1")
            .with_edges(Direction::Out, ["e1"], true)
            .with_edge_info(EdgeInfo::new().with_out_edge("knows", OutEdgeRef::new("e1", "v2")));

        let mut once = VertexEdgeCache::new();
        once.record_vertex(v.clone());

        let mut twice = VertexEdgeCache::new();
        twice.record_vertex(v.clone());
        twice.record_vertex(v.clone());

        assert_eq!(once.len(), 1);
        assert_eq!(twice.len(), 1);
        assert_eq!(once.vertex("v1"), twice.vertex("v1"));
    }

    #[test]
    fn test_record_overwrites_lists_and_flags() {
        let mut cache = VertexEdgeCache::new();
        cache.record_vertex(
            vertex("v1")
                .with_edges(Direction::Out, ["e1", "e2"], true)
                .with_edges(Direction::In, ["e5"], true),
        );
        cache.record_vertex(
            vertex("v1")
                .with_edges(Direction::Out, ["e3"], false)
                .with_edges(Direction::In, ["e5"], true),
        );

        let cached = cache.vertex("v1").unwrap();
        assert_eq!(cached.out_edge_ids, vec!["e3"]);
        assert!(!cached.out_edges_complete);
        assert!(cache.needs_fetch("v1", Direction::Out));
        // In side carried as given
        assert_eq!(cached.in_edge_ids, vec!["e5"]);
        assert!(cached.in_edges_complete);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_record_overwrites_in_direction() {
        let mut cache = VertexEdgeCache::new();
        cache.record_vertex(
            vertex("v1")
                .with_edges(Direction::Out, ["e9"], true)
                .with_edges(Direction::In, ["e1", "e2"], true),
        );
        cache.record_vertex(
            vertex("v1")
                .with_edges(Direction::Out, ["e9"], true)
                .with_edges(Direction::In, ["e3"], false),
        );

        let cached = cache.vertex("v1").unwrap();
        assert_eq!(cached.in_edge_ids, vec!["e3"]);
        assert!(!cached.in_edges_complete);
        assert!(cache.needs_fetch("v1", Direction::In));
        assert_eq!(cached.out_edge_ids, vec!["e9"]);
        assert!(cached.out_edges_complete);
    }

    #[test]
    fn test_record_unions_edge_info() {
        let mut cache = VertexEdgeCache::new();
        cache.record_vertex(
            vertex("v1")
                .with_edges(Direction::Out, ["e1"], false)
                .with_edge_info(EdgeInfo::new().with_out_edge("knows", OutEdgeRef::new("e1", "v2"))),
        );
        cache.record_vertex(
            vertex("v1")
                .with_edges(Direction::Out, ["e2"], false)
                .with_edge_info(EdgeInfo::new().with_out_edge("knows", OutEdgeRef::new("e2", "v3"))),
        );

        let cached = cache.vertex("v1").unwrap();
        // Ids are replaced, edge-info accumulates
        assert_eq!(cached.out_edge_ids, vec!["e2"]);
        assert_eq!(cached.edge_info.out_e["knows"].len(), 2);
    }

    #[test]
    fn test_record_keeps_cached_label() {
        let mut cache = VertexEdgeCache::new();
        cache.record_vertex(vertex("v1"));
        cache.record_vertex(VertexRecord::new("v1").with_label("robot"));

        assert_eq!(cache.vertex("v1").unwrap().label, "person");
    }

    #[test]
    fn test_enrich_prefers_cache() {
        let mut cache = VertexEdgeCache::new();
        cache.record_vertex(vertex("v1").with_edges(Direction::In, ["e9"], true));

        let mut target = vertex("v1").with_edges(Direction::In, Vec::<String>::new(), false);
        cache.enrich_with_cached_edges(&mut target);

        assert_eq!(target.in_edge_ids, vec!["e9"]);
        assert!(target.in_edges_complete);
    }

    #[test]
    fn test_enrich_merges_edge_info_into_target() {
        let mut cache = VertexEdgeCache::new();
        cache.record_vertex(
            vertex("v1")
                .with_edge_info(EdgeInfo::new().with_in_edge("created", InEdgeRef::new("e9", "v0"))),
        );

        let mut target = vertex("v1")
            .with_edge_info(EdgeInfo::new().with_out_edge("knows", OutEdgeRef::new("e1", "v2")));
        cache.enrich_with_cached_edges(&mut target);

        assert_eq!(target.edge_info.edge_count(), 2);
        // Cached entry is untouched
        assert_eq!(cache.vertex("v1").unwrap().edge_info.edge_count(), 1);
    }

    #[test]
    fn test_enrich_leaves_cache_untouched() {
        let mut cache = VertexEdgeCache::new();
        let original = vertex("v1").with_edges(Direction::Out, ["e1"], true);
        cache.record_vertex(original.clone());

        let mut target = vertex("v1").with_edges(Direction::Out, ["e7", "e8"], false);
        cache.enrich_with_cached_edges(&mut target);

        assert_eq!(cache.vertex("v1"), Some(&original));
    }

    #[test]
    fn test_enrich_through_shared_borrow() {
        let mut cache = VertexEdgeCache::new();
        cache.record_vertex(vertex("v1").with_edges(Direction::Out, ["e1"], true));

        let shared = &cache;
        let mut a = vertex("v1");
        let mut b = vertex("v2");
        shared.enrich_with_cached_edges(&mut a);
        shared.enrich_with_cached_edges(&mut b);

        assert_eq!(a.out_edge_ids, vec!["e1"]);
        assert_eq!(shared.stats().enrich_hits, 1);
        assert_eq!(shared.stats().enrich_misses, 1);
        assert_eq!(shared.len(), 1);
    }

    #[test]
    fn test_enrich_absent_is_noop() {
        let mut cache = VertexEdgeCache::new();
        cache.record_vertex(vertex("other"));

        let target = vertex("v1")
            .with_edges(Direction::Out, ["e1"], false)
            .with_edge_info(EdgeInfo::new().with_out_edge("knows", OutEdgeRef::new("e1", "v2")));
        let mut enriched = target.clone();
        cache.enrich_with_cached_edges(&mut enriched);

        assert_eq!(enriched, target);
        assert_eq!(cache.stats().enrich_misses, 1);
    }

    #[test]
    fn test_merge_invoked_once_per_hit() {
        let calls = Cell::new(0);
        let mut cache = spy_cache(&calls);

        // First observation: no merge
        cache.record_vertex(vertex("v1"));
        assert_eq!(calls.get(), 0);

        // Enrich miss: no merge
        let mut unknown = vertex("v2");
        cache.enrich_with_cached_edges(&mut unknown);
        assert_eq!(calls.get(), 0);

        // Repeat observation: one merge
        cache.record_vertex(vertex("v1"));
        assert_eq!(calls.get(), 1);

        // Enrich hit: one merge
        let mut known = vertex("v1");
        cache.enrich_with_cached_edges(&mut known);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_spy_merge_sees_no_bookkeeping_fields() {
        // A merger that wipes edge-info cannot affect ids or flags
        let mut cache = VertexEdgeCache::with_parts(
            MemoryStore::<VertexRecord>::new(),
            |into: &mut EdgeInfo, _: &EdgeInfo| *into = EdgeInfo::new(),
        );
        cache.record_vertex(vertex("v1"));
        cache.record_vertex(vertex("v1").with_edges(Direction::Out, ["e1"], true));

        assert!(cache.is_fully_loaded("v1", Direction::Out));
        assert_eq!(cache.vertex("v1").unwrap().out_edge_ids, vec!["e1"]);
    }

    #[test]
    fn test_is_fully_loaded() {
        let mut cache = VertexEdgeCache::new();
        cache.record_vertex(
            vertex("v1")
                .with_edges(Direction::Out, Vec::<String>::new(), true)
                .with_edges(Direction::In, ["e1"], false),
        );

        assert!(cache.is_fully_loaded("v1", Direction::Out));
        assert!(!cache.is_fully_loaded("v1", Direction::In));
        assert!(!cache.is_fully_loaded("unknown", Direction::Out));
        assert!(cache.needs_fetch("unknown", Direction::In));
    }

    #[test]
    fn test_empty_id_accepted() {
        let mut cache = VertexEdgeCache::new();
        cache.record_vertex(VertexRecord::new("").with_edges(Direction::Out, ["e1"], true));

        assert!(cache.contains(""));
        assert!(cache.is_fully_loaded("", Direction::Out));
    }

    #[test]
    fn test_stats_and_clear() {
        let mut cache = VertexEdgeCache::with_capacity(4);
        cache.record_vertex(vertex("v1"));
        cache.record_vertex(vertex("v1"));
        cache.record_vertex(vertex("v2"));

        let mut hit = vertex("v1");
        cache.enrich_with_cached_edges(&mut hit);
        let mut miss = vertex("v3");
        cache.enrich_with_cached_edges(&mut miss);

        let stats = cache.stats();
        assert_eq!(stats.inserted, 2);
        assert_eq!(stats.merged, 1);
        assert_eq!(stats.enrich_hits, 1);
        assert_eq!(stats.enrich_misses, 1);
        assert!((stats.enrich_hit_rate() - 50.0).abs() < 0.01);

        let mut ids: Vec<&str> = cache.iter().map(|v| v.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["v1", "v2"]);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }
}
