//! The three mutually exclusive watch lists of a user.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{ListCategory, MediaId};

/// Ordered media references per [`ListCategory`].
///
/// ## Invariants
/// - a [`MediaId`] appears in at most one list, at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "WatchListsDto")]
pub struct WatchLists {
    watching: Vec<MediaId>,
    want_to_watch: Vec<MediaId>,
    completed: Vec<MediaId>,
}

impl WatchLists {
    /// Entries currently being watched.
    pub fn watching(&self) -> &[MediaId] {
        &self.watching
    }

    /// Entries queued for later.
    pub fn want_to_watch(&self) -> &[MediaId] {
        &self.want_to_watch
    }

    /// Entries already finished.
    pub fn completed(&self) -> &[MediaId] {
        &self.completed
    }

    /// Entries held in `category`.
    pub fn list(&self, category: ListCategory) -> &[MediaId] {
        match category {
            ListCategory::Watching => &self.watching,
            ListCategory::WantToWatch => &self.want_to_watch,
            ListCategory::Completed => &self.completed,
        }
    }

    fn list_mut(&mut self, category: ListCategory) -> &mut Vec<MediaId> {
        match category {
            ListCategory::Watching => &mut self.watching,
            ListCategory::WantToWatch => &mut self.want_to_watch,
            ListCategory::Completed => &mut self.completed,
        }
    }

    /// Category currently holding `media_id`, if any.
    ///
    /// This is the exclusivity check: an entry may only be added when this
    /// returns `None`.
    pub fn category_of(&self, media_id: MediaId) -> Option<ListCategory> {
        ListCategory::ALL
            .into_iter()
            .find(|category| self.list(*category).contains(&media_id))
    }

    /// Append `media_id` to `category`.
    ///
    /// Fails with the category already holding the entry, including when it
    /// is `category` itself; the lists are left untouched in that case.
    pub fn insert(
        &mut self,
        media_id: MediaId,
        category: ListCategory,
    ) -> Result<(), AlreadyListed> {
        if let Some(existing) = self.category_of(media_id) {
            return Err(AlreadyListed {
                media_id,
                category: existing,
            });
        }
        self.list_mut(category).push(media_id);
        Ok(())
    }

    /// Remove `media_id` from `category`. Returns whether anything was removed.
    pub fn remove(&mut self, media_id: MediaId, category: ListCategory) -> bool {
        let list = self.list_mut(category);
        let before = list.len();
        list.retain(|candidate| *candidate != media_id);
        list.len() != before
    }
}

/// Rejection raised when an entry is already present in some list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlreadyListed {
    /// Entry that was submitted.
    pub media_id: MediaId,
    /// List that already holds it.
    pub category: ListCategory,
}

impl fmt::Display for AlreadyListed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entry {} already in a list ({})",
            self.media_id, self.category
        )
    }
}

impl std::error::Error for AlreadyListed {}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WatchListsDto {
    #[serde(default)]
    watching: Vec<MediaId>,
    #[serde(default)]
    want_to_watch: Vec<MediaId>,
    #[serde(default)]
    completed: Vec<MediaId>,
}

impl TryFrom<WatchListsDto> for WatchLists {
    type Error = AlreadyListed;

    fn try_from(value: WatchListsDto) -> Result<Self, Self::Error> {
        let WatchListsDto {
            watching,
            want_to_watch,
            completed,
        } = value;

        let mut lists = Self::default();
        for (category, entries) in [
            (ListCategory::Watching, watching),
            (ListCategory::WantToWatch, want_to_watch),
            (ListCategory::Completed, completed),
        ] {
            for media_id in entries {
                lists.insert(media_id, category)?;
            }
        }
        Ok(lists)
    }
}
