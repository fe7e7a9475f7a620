//! Port for resolving media identifiers against the external catalog.

use async_trait::async_trait;

use crate::domain::{MediaEntry, MediaId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by catalog lookup adapters.
    pub enum CatalogLookupError {
        /// No catalog entry has the identifier.
        NotFound { media_id: MediaId } => "media entry {media_id} not found",
        /// Catalog could not be reached.
        Connection { message: String } => "catalog connection failed: {message}",
    }
}

/// Read-only view of the catalog that owns media entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Resolve `media_id` to its catalog entry.
    async fn find_by_id(&self, media_id: MediaId) -> Result<MediaEntry, CatalogLookupError>;
}
