//! User account domain service.
//!
//! Implements the [`UserRegistry`] driving port on top of a [`UserStore`],
//! enforcing email uniqueness and the creation password policy.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{UserRegistry, UserStore, UserStoreError};
use crate::domain::{Email, Error, ListCategory, MediaId, NewUser, User, UserId};

pub(crate) fn map_store_error(error: UserStoreError) -> Error {
    match error {
        UserStoreError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserStoreError::Query { message } => {
            Error::internal(format!("user store error: {message}"))
        }
        UserStoreError::DuplicateEmail { email } => match Email::new(email) {
            Ok(email) => Error::duplicate_user(email),
            Err(err) => Error::internal(format!("user store reported invalid email: {err}")),
        },
        UserStoreError::RevisionMismatch { expected, actual } => Error::conflict(format!(
            "user was modified concurrently: expected revision {expected}, found {actual}"
        )),
    }
}

/// User registry service implementing the [`UserRegistry`] driving port.
#[derive(Clone)]
pub struct UserRegistryService<S> {
    user_store: Arc<S>,
}

impl<S> UserRegistryService<S> {
    /// Create a new service backed by `user_store`.
    pub fn new(user_store: Arc<S>) -> Self {
        Self { user_store }
    }
}

impl<S> UserRegistryService<S>
where
    S: UserStore,
{
    async fn require_existing(&self, id: &UserId) -> Result<(), Error> {
        let exists = self
            .user_store
            .exists_by_id(id)
            .await
            .map_err(map_store_error)?;
        if exists {
            Ok(())
        } else {
            info!(user_id = %id, "user not found");
            Err(Error::user_not_found(*id))
        }
    }
}

#[async_trait]
impl<S> UserRegistry for UserRegistryService<S>
where
    S: UserStore,
{
    async fn create(&self, draft: NewUser) -> Result<User, Error> {
        let taken = self
            .user_store
            .exists_by_email(draft.email())
            .await
            .map_err(map_store_error)?;
        if taken {
            info!(email = %draft.email(), "rejected duplicate email");
            return Err(Error::duplicate_user(draft.email().clone()));
        }

        if !draft.has_valid_password() {
            info!(email = %draft.email(), "rejected invalid password");
            return Err(Error::invalid_password());
        }

        let user = self
            .user_store
            .insert(&draft)
            .await
            .map_err(map_store_error)?;
        debug!(user_id = %user.id(), "user created");
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, Error> {
        let Some(stored) = self
            .user_store
            .find_by_id(user.id())
            .await
            .map_err(map_store_error)?
        else {
            info!(user_id = %user.id(), "user not found");
            return Err(Error::user_not_found(*user.id()));
        };

        let holder = self
            .user_store
            .find_by_email_ignore_case(user.email())
            .await
            .map_err(map_store_error)?;
        if holder.is_some_and(|holder| holder.id() != user.id()) {
            info!(user_id = %user.id(), email = %user.email(), "rejected duplicate email");
            return Err(Error::duplicate_user(user.email().clone()));
        }

        let updated = user.with_revision(stored.next_revision());
        self.user_store
            .save(&updated, stored.revision())
            .await
            .map_err(map_store_error)?;
        debug!(user_id = %updated.id(), revision = updated.revision(), "user updated");
        Ok(updated)
    }

    async fn delete(&self, user: &User) -> Result<(), Error> {
        self.require_existing(user.id()).await?;
        self.user_store
            .delete(user)
            .await
            .map_err(map_store_error)?;
        debug!(user_id = %user.id(), "user deleted");
        Ok(())
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<(), Error> {
        self.require_existing(id).await?;
        self.user_store
            .delete_by_id(id)
            .await
            .map_err(map_store_error)?;
        debug!(user_id = %id, "user deleted");
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<User>, Error> {
        self.user_store.find_all().await.map_err(map_store_error)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, Error> {
        self.user_store
            .find_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::user_not_found(*id))
    }

    async fn find_by_name(&self, fragment: &str) -> Result<Vec<User>, Error> {
        self.user_store
            .find_by_name_containing_ignore_case(fragment)
            .await
            .map_err(map_store_error)
    }

    async fn find_by_email(&self, email: &Email) -> Result<User, Error> {
        self.user_store
            .find_by_email_ignore_case(email)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::user_not_found_by_email(email.clone()))
    }

    async fn get_list(&self, id: &UserId, category: ListCategory) -> Result<Vec<MediaId>, Error> {
        let user = self.find_by_id(id).await?;
        Ok(user.lists().list(category).to_vec())
    }
}

#[cfg(test)]
#[path = "user_registry_service_tests.rs"]
mod tests;
