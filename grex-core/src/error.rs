//! Error types for grex-core.

use thiserror::Error;

/// Result type alias for grex-core operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by a keyed object store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Retrieval of an identifier that has no entry.
    ///
    /// Callers are expected to check `has` first; hitting this is a contract
    /// violation on the caller's side.
    #[error("No entry stored for id '{id}'")]
    NotFound {
        /// Identifier that was looked up.
        id: String,
    },
}

impl StoreError {
    pub(crate) fn not_found(id: &str) -> Self {
        StoreError::NotFound { id: id.to_string() }
    }
}
