//! grex core - incremental vertex-edge cache for graph exploration.
//!
//! While a property graph is explored one vertex at a time, the query layer
//! returns each vertex's edges in pages. This crate keeps one merged
//! [`VertexRecord`] per vertex so that callers can:
//!
//! - avoid refetching edges already known for a vertex,
//! - accumulate partial fetches into a single record,
//! - ask whether all out- or in-edges of a vertex have been loaded.
//!
//! # Components
//!
//! - [`store`]: the [`KeyedObjectStore`] capability and its in-memory
//!   implementation [`MemoryStore`]
//! - [`edge_info`]: the [`EdgeInfoMerge`] collaborator and the default
//!   [`UnionEdgeInfo`] routine
//! - [`cache`]: [`VertexEdgeCache`], which owns the merge policy
//!
//! The cache is single-threaded: callers serialize access per session.

pub mod cache;
pub mod edge_info;
pub mod error;
pub mod store;
pub mod vertex;

pub use cache::{CacheStats, VertexEdgeCache};
pub use edge_info::{EdgeInfoMerge, UnionEdgeInfo};
pub use error::{Result, StoreError};
pub use store::{KeyedObjectStore, MemoryStore};
pub use vertex::{Direction, EdgeInfo, InEdgeRef, OutEdgeRef, VertexRecord};
