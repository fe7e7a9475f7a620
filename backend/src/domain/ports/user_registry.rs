//! Driving port for account lifecycle operations.
//!
//! Inbound adapters use this port to create, update, delete, and look up
//! accounts without importing persistence concerns.

use async_trait::async_trait;

use crate::domain::{Email, Error, ListCategory, MediaId, NewUser, User, UserId};

/// Domain use-case port for user accounts.
#[async_trait]
pub trait UserRegistry: Send + Sync {
    /// Store a new account.
    ///
    /// Fails with [`Error::DuplicateUser`] when the email is taken (checked
    /// first) and with [`Error::InvalidPassword`] when the password is absent
    /// or too short.
    async fn create(&self, draft: NewUser) -> Result<User, Error>;

    /// Overwrite an existing account. The password is not re-validated.
    ///
    /// The submitted record replaces the stored one wholesale, watch lists
    /// included. Entries added through [`ListMembership`] after `user` was
    /// read are lost, so callers should reload before editing account fields.
    /// Only a write landing between this method's own read and save fails
    /// with [`Error::Conflict`].
    ///
    /// [`ListMembership`]: crate::domain::ports::ListMembership
    async fn update(&self, user: User) -> Result<User, Error>;

    /// Remove the account identified by `user.id()`.
    async fn delete(&self, user: &User) -> Result<(), Error>;

    /// Remove the account with `id`.
    async fn delete_by_id(&self, id: &UserId) -> Result<(), Error>;

    /// Every account; empty when none exist.
    async fn find_all(&self) -> Result<Vec<User>, Error>;

    /// Account with `id`.
    async fn find_by_id(&self, id: &UserId) -> Result<User, Error>;

    /// Accounts whose name contains `fragment`, ignoring case.
    async fn find_by_name(&self, fragment: &str) -> Result<Vec<User>, Error>;

    /// Account holding `email`, ignoring case.
    async fn find_by_email(&self, email: &Email) -> Result<User, Error>;

    /// Snapshot of one watch list of the account with `id`.
    async fn get_list(&self, id: &UserId, category: ListCategory) -> Result<Vec<MediaId>, Error>;

    /// Snapshot of the "watching" list.
    async fn get_watching(&self, id: &UserId) -> Result<Vec<MediaId>, Error> {
        self.get_list(id, ListCategory::Watching).await
    }

    /// Snapshot of the "want to watch" list.
    async fn get_want_to_watch(&self, id: &UserId) -> Result<Vec<MediaId>, Error> {
        self.get_list(id, ListCategory::WantToWatch).await
    }

    /// Snapshot of the "completed" list.
    async fn get_completed(&self, id: &UserId) -> Result<Vec<MediaId>, Error> {
        self.get_list(id, ListCategory::Completed).await
    }
}
