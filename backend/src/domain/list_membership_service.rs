//! Watch-list domain service.
//!
//! This module implements the [`ListMembership`] driving port. Every mutation
//! is a read-check-write against the user's revision: when the store reports
//! that another writer got there first, the user is reloaded, the exclusivity
//! check runs again on the fresh lists, and the write is retried a bounded
//! number of times.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    CatalogLookup, CatalogLookupError, ListMembership, UserStore, UserStoreError,
};
use crate::domain::user_registry_service::map_store_error;
use crate::domain::{Error, ListCategory, MediaEntry, MediaId, User, WatchLists};

fn map_catalog_error(error: CatalogLookupError) -> Error {
    match error {
        CatalogLookupError::NotFound { media_id } => Error::media_not_found(media_id),
        CatalogLookupError::Connection { message } => {
            Error::service_unavailable(format!("catalog unavailable: {message}"))
        }
    }
}

/// Tuning for the optimistic write loop.
///
/// # Example
///
/// ```
/// # use watchlist_backend::domain::ListMembershipConfig;
/// let config = ListMembershipConfig::default();
/// assert_eq!(config.max_write_attempts(), 3);
///
/// let clamped = ListMembershipConfig::with_max_write_attempts(0);
/// assert_eq!(clamped.max_write_attempts(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMembershipConfig {
    max_write_attempts: u32,
}

impl ListMembershipConfig {
    /// Default number of write attempts per mutation.
    pub const DEFAULT_MAX_WRITE_ATTEMPTS: u32 = 3;

    /// Lowest accepted attempt count; one attempt means no retry.
    const MIN_WRITE_ATTEMPTS: u32 = 1;

    /// Highest accepted attempt count.
    const MAX_WRITE_ATTEMPTS: u32 = 16;

    /// Build with an explicit attempt budget, clamped to `1..=16`.
    pub fn with_max_write_attempts(attempts: u32) -> Self {
        Self {
            max_write_attempts: attempts.clamp(Self::MIN_WRITE_ATTEMPTS, Self::MAX_WRITE_ATTEMPTS),
        }
    }

    /// Number of save attempts before giving up with [`Error::Conflict`].
    pub fn max_write_attempts(&self) -> u32 {
        self.max_write_attempts
    }
}

impl Default for ListMembershipConfig {
    fn default() -> Self {
        Self {
            max_write_attempts: Self::DEFAULT_MAX_WRITE_ATTEMPTS,
        }
    }
}

/// Watch-list service implementing the [`ListMembership`] driving port.
#[derive(Clone)]
pub struct ListMembershipService<S, C> {
    user_store: Arc<S>,
    catalog: Arc<C>,
    config: ListMembershipConfig,
}

impl<S, C> ListMembershipService<S, C> {
    /// Create a new service with the default configuration.
    pub fn new(user_store: Arc<S>, catalog: Arc<C>) -> Self {
        Self::with_config(user_store, catalog, ListMembershipConfig::default())
    }

    /// Create a new service with an explicit configuration.
    pub fn with_config(user_store: Arc<S>, catalog: Arc<C>, config: ListMembershipConfig) -> Self {
        Self {
            user_store,
            catalog,
            config,
        }
    }
}

impl<S, C> ListMembershipService<S, C>
where
    S: UserStore,
    C: CatalogLookup,
{
    async fn resolve(&self, media_id: MediaId) -> Result<MediaEntry, Error> {
        self.catalog
            .find_by_id(media_id)
            .await
            .map_err(map_catalog_error)
    }

    async fn reload(&self, user: &User) -> Result<User, Error> {
        self.user_store
            .find_by_id(user.id())
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::user_not_found(*user.id()))
    }

    /// Apply `mutation` to a copy of the user's lists and save it, retrying
    /// on revision mismatch against a freshly loaded user.
    async fn write_lists<F>(&self, user: &User, mutation: F) -> Result<User, Error>
    where
        F: Fn(&mut WatchLists) -> Result<(), Error> + Send + Sync,
    {
        let mut current = user.clone();
        let attempts = self.config.max_write_attempts();

        for attempt in 1..=attempts {
            let expected = current.revision();
            let mut candidate = current.clone().with_revision(current.next_revision());
            mutation(candidate.lists_mut())?;

            match self.user_store.save(&candidate, expected).await {
                Ok(()) => return Ok(candidate),
                Err(UserStoreError::RevisionMismatch { actual: 0, .. }) => {
                    info!(user_id = %current.id(), "user not found");
                    return Err(Error::user_not_found(*current.id()));
                }
                Err(UserStoreError::RevisionMismatch { expected, actual }) => {
                    debug!(
                        user_id = %current.id(),
                        attempt,
                        expected,
                        actual,
                        "stale watch-list write"
                    );
                    if attempt < attempts {
                        current = self.reload(&current).await?;
                    }
                }
                Err(err) => return Err(map_store_error(err)),
            }
        }

        warn!(user_id = %user.id(), attempts, "watch-list write kept conflicting");
        Err(Error::conflict(format!(
            "user {} was modified concurrently {attempts} times",
            user.id()
        )))
    }

    async fn add_entry(
        &self,
        user: &User,
        entry: &MediaEntry,
        category: ListCategory,
    ) -> Result<User, Error> {
        let media_id = entry.id();
        let saved = self
            .write_lists(user, |lists| {
                lists.insert(media_id, category).map_err(|rejection| {
                    Error::invalid_operation(format!("entry already in a list: {rejection}"))
                })
            })
            .await
            .inspect_err(|err| {
                if matches!(err, Error::InvalidOperation { .. }) {
                    info!(user_id = %user.id(), %media_id, %category, "rejected duplicate entry");
                }
            })?;
        debug!(user_id = %saved.id(), %media_id, %category, "entry added");
        Ok(saved)
    }

    async fn remove_entry(
        &self,
        user: &User,
        entry: &MediaEntry,
        category: ListCategory,
    ) -> Result<User, Error> {
        let media_id = entry.id();
        let saved = self
            .write_lists(user, |lists| {
                if !lists.remove(media_id, category) {
                    debug!(%media_id, %category, "entry not in list, nothing removed");
                }
                Ok(())
            })
            .await?;
        debug!(user_id = %saved.id(), %media_id, %category, "entry removed");
        Ok(saved)
    }
}

#[async_trait]
impl<S, C> ListMembership for ListMembershipService<S, C>
where
    S: UserStore,
    C: CatalogLookup,
{
    async fn add_to_list(
        &self,
        user: &User,
        media_id: MediaId,
        category: ListCategory,
    ) -> Result<User, Error> {
        let entry = self.resolve(media_id).await?;
        self.add_entry(user, &entry, category).await
    }

    async fn remove_from_list(
        &self,
        user: &User,
        media_id: MediaId,
        category: ListCategory,
    ) -> Result<User, Error> {
        let entry = self.resolve(media_id).await?;
        self.remove_entry(user, &entry, category).await
    }

    async fn add_to_list_named(
        &self,
        user: &User,
        media_id: MediaId,
        category: &str,
    ) -> Result<User, Error> {
        let entry = self.resolve(media_id).await?;
        let category = category.parse::<ListCategory>()?;
        self.add_entry(user, &entry, category).await
    }

    async fn remove_from_list_named(
        &self,
        user: &User,
        media_id: MediaId,
        category: &str,
    ) -> Result<User, Error> {
        let entry = self.resolve(media_id).await?;
        let category = category.parse::<ListCategory>()?;
        self.remove_entry(user, &entry, category).await
    }
}

#[cfg(test)]
#[path = "list_membership_service_tests.rs"]
mod tests;
