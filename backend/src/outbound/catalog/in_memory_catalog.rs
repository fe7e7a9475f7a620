//! In-memory catalog lookup.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::ports::{CatalogLookup, CatalogLookupError};
use crate::domain::{MediaEntry, MediaId};

/// [`CatalogLookup`] adapter over a fixed set of entries.
///
/// # Examples
/// ```
/// use watchlist_backend::domain::{MediaEntry, MediaId};
/// use watchlist_backend::outbound::catalog::InMemoryCatalog;
///
/// let catalog = InMemoryCatalog::from_entries([MediaEntry::new(MediaId::new(7), "Mushishi")]);
/// assert!(catalog.contains(MediaId::new(7)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    entries: HashMap<MediaId, MediaEntry>,
}

impl InMemoryCatalog {
    /// Build a catalog holding `entries`; later duplicates replace earlier ones.
    pub fn from_entries(entries: impl IntoIterator<Item = MediaEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|entry| (entry.id(), entry))
                .collect(),
        }
    }

    /// Whether `media_id` resolves.
    pub fn contains(&self, media_id: MediaId) -> bool {
        self.entries.contains_key(&media_id)
    }
}

#[async_trait]
impl CatalogLookup for InMemoryCatalog {
    async fn find_by_id(&self, media_id: MediaId) -> Result<MediaEntry, CatalogLookupError> {
        self.entries
            .get(&media_id)
            .cloned()
            .ok_or_else(|| CatalogLookupError::not_found(media_id))
    }
}
