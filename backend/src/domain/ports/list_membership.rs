//! Driving port for watch-list mutations.

use async_trait::async_trait;

use crate::domain::{Error, ListCategory, MediaId, User};

/// Domain use-case port for adding and removing catalog entries from a
/// user's watch lists.
///
/// Both operations return the user as persisted, with its new revision.
#[async_trait]
pub trait ListMembership: Send + Sync {
    /// Append the entry to `category`.
    ///
    /// Fails with [`Error::MediaNotFound`] when the catalog cannot resolve
    /// `media_id`, and with [`Error::InvalidOperation`] when the entry is
    /// already in any list, `category` included.
    async fn add_to_list(
        &self,
        user: &User,
        media_id: MediaId,
        category: ListCategory,
    ) -> Result<User, Error>;

    /// Remove the entry from `category` if present, then persist the user.
    async fn remove_from_list(
        &self,
        user: &User,
        media_id: MediaId,
        category: ListCategory,
    ) -> Result<User, Error>;

    /// [`ListMembership::add_to_list`] for an untyped category name.
    async fn add_to_list_named(
        &self,
        user: &User,
        media_id: MediaId,
        category: &str,
    ) -> Result<User, Error>;

    /// [`ListMembership::remove_from_list`] for an untyped category name.
    async fn remove_from_list_named(
        &self,
        user: &User,
        media_id: MediaId,
        category: &str,
    ) -> Result<User, Error>;
}
