//! Port for user account persistence.
//!
//! The [`UserStore`] trait is the row store behind the registry and the
//! watch-list service. Adapters must make [`UserStore::save`] a
//! compare-and-swap on the user's revision so concurrent list mutations cannot
//! both pass the exclusivity check and persist.

use async_trait::async_trait;

use crate::domain::{Email, NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user store adapters.
    pub enum UserStoreError {
        /// Store connection could not be established.
        Connection { message: String } => "user store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user store query failed: {message}",
        /// Another record already holds the email address.
        DuplicateEmail { email: String } => "email already stored: {email}",
        /// Optimistic concurrency check failed.
        RevisionMismatch { expected: u32, actual: u32 } =>
            "revision mismatch: expected {expected}, found {actual}",
    }
}

/// Port for user storage and retrieval.
///
/// # Revision Semantics
///
/// - [`UserStore::insert`] assigns the identifier and stores revision 1.
/// - [`UserStore::save`] only succeeds if the stored revision equals
///   `expected_revision`; otherwise it fails with
///   [`UserStoreError::RevisionMismatch`]. A missing record reports an actual
///   revision of 0.
/// - The caller sets `user.revision` to the new value before saving; the
///   store does not increment it.
///
/// Email comparisons are case-insensitive throughout.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Whether any record holds `email`.
    async fn exists_by_email(&self, email: &Email) -> Result<bool, UserStoreError>;

    /// Whether a record with `id` exists.
    async fn exists_by_id(&self, id: &UserId) -> Result<bool, UserStoreError>;

    /// Store a new account, assigning its identifier.
    async fn insert(&self, draft: &NewUser) -> Result<User, UserStoreError>;

    /// Overwrite an existing account with optimistic concurrency check.
    async fn save(&self, user: &User, expected_revision: u32) -> Result<(), UserStoreError>;

    /// Remove the record of `user`.
    async fn delete(&self, user: &User) -> Result<(), UserStoreError>;

    /// Remove the record with `id`.
    async fn delete_by_id(&self, id: &UserId) -> Result<(), UserStoreError>;

    /// Every stored account, in store-defined order.
    async fn find_all(&self) -> Result<Vec<User>, UserStoreError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError>;

    /// Fetch an account by email, ignoring case.
    async fn find_by_email_ignore_case(&self, email: &Email)
    -> Result<Option<User>, UserStoreError>;

    /// Accounts whose name contains `fragment`, ignoring case.
    async fn find_by_name_containing_ignore_case(
        &self,
        fragment: &str,
    ) -> Result<Vec<User>, UserStoreError>;
}
