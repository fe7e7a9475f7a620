//! In-memory user store with atomic revision checks.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{Email, NewUser, User, UserId};

/// [`UserStore`] adapter keeping records in a mutex-guarded map.
///
/// Every operation takes the lock once, so the revision comparison in
/// [`UserStore::save`] and the write it guards are atomic.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    records: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserStore {
    /// Number of stored users.
    ///
    /// # Errors
    /// Returns [`UserStoreError::Query`] when the lock is poisoned.
    pub fn len(&self) -> Result<usize, UserStoreError> {
        Ok(self.records()?.len())
    }

    /// Whether the store holds no users.
    ///
    /// # Errors
    /// Returns [`UserStoreError::Query`] when the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, UserStoreError> {
        Ok(self.records()?.is_empty())
    }

    fn records(&self) -> Result<MutexGuard<'_, HashMap<UserId, User>>, UserStoreError> {
        self.records.lock().map_err(|_| {
            debug!("user store lock poisoned");
            UserStoreError::query("user store lock poisoned")
        })
    }

    fn email_taken_by_other(
        records: &HashMap<UserId, User>,
        email: &Email,
        owner: Option<&UserId>,
    ) -> bool {
        records
            .values()
            .any(|user| user.email() == email && Some(user.id()) != owner)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn exists_by_email(&self, email: &Email) -> Result<bool, UserStoreError> {
        let records = self.records()?;
        Ok(Self::email_taken_by_other(&records, email, None))
    }

    async fn exists_by_id(&self, id: &UserId) -> Result<bool, UserStoreError> {
        Ok(self.records()?.contains_key(id))
    }

    async fn insert(&self, draft: &NewUser) -> Result<User, UserStoreError> {
        let mut records = self.records()?;
        if Self::email_taken_by_other(&records, draft.email(), None) {
            return Err(UserStoreError::duplicate_email(draft.email().as_ref()));
        }

        let mut id = UserId::random();
        while records.contains_key(&id) {
            id = UserId::random();
        }
        let user = User::from_new(id, draft.clone());
        records.insert(id, user.clone());
        Ok(user)
    }

    async fn save(&self, user: &User, expected_revision: u32) -> Result<(), UserStoreError> {
        let mut records = self.records()?;
        let actual = records.get(user.id()).map_or(0, User::revision);
        if actual != expected_revision {
            return Err(UserStoreError::revision_mismatch(expected_revision, actual));
        }
        if Self::email_taken_by_other(&records, user.email(), Some(user.id())) {
            return Err(UserStoreError::duplicate_email(user.email().as_ref()));
        }

        records.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn delete(&self, user: &User) -> Result<(), UserStoreError> {
        self.delete_by_id(user.id()).await
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<(), UserStoreError> {
        self.records()?.remove(id);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<User>, UserStoreError> {
        Ok(self.records()?.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError> {
        Ok(self.records()?.get(id).cloned())
    }

    async fn find_by_email_ignore_case(
        &self,
        email: &Email,
    ) -> Result<Option<User>, UserStoreError> {
        Ok(self
            .records()?
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn find_by_name_containing_ignore_case(
        &self,
        fragment: &str,
    ) -> Result<Vec<User>, UserStoreError> {
        let needle = fragment.to_lowercase();
        Ok(self
            .records()?
            .values()
            .filter(|user| user.name().to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}
