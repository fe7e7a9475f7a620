//! User account model.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::watch_lists::WatchLists;

/// Minimum number of characters a password must have at creation time.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Validation errors returned when parsing user identity fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The identifier was an empty string.
    EmptyId,
    /// The identifier was not a UUID.
    InvalidId,
    /// The email address was blank.
    EmptyEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable, store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Email address, kept as submitted and compared case-insensitively.
///
/// Equality and hashing go through [`Email::normalized`], so `a@x.com` and
/// `A@X.com` are the same address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email {
    raw: String,
    normalized: String,
}

impl Email {
    /// Validate and construct an [`Email`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = email.into();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        let normalized = raw.to_lowercase();
        Ok(Self { raw, normalized })
    }

    /// Lowercase comparison key.
    pub fn normalized(&self) -> &str {
        self.normalized.as_str()
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for Email {}

impl std::hash::Hash for Email {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.raw.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.raw
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Account submitted for creation; the store assigns its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: String,
    email: Email,
    password: Option<String>,
}

impl NewUser {
    /// Build a draft account. `password` may be absent; creation rejects it.
    pub fn new(name: impl Into<String>, email: Email, password: Option<String>) -> Self {
        Self {
            name: name.into(),
            email,
            password,
        }
    }

    /// Free-text display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Submitted email address.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Raw submitted password, if any.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Whether the password is present and at least [`PASSWORD_MIN_LENGTH`]
    /// characters long.
    pub fn has_valid_password(&self) -> bool {
        self.password
            .as_deref()
            .is_some_and(|password| password.chars().count() >= PASSWORD_MIN_LENGTH)
    }
}

/// Persisted user account with its watch lists.
///
/// ## Invariants
/// - `email` is unique across users, ignoring case.
/// - a media entry appears in at most one of the three lists.
/// - `revision` starts at 1 and grows by one with every successful save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    name: String,
    email: Email,
    #[serde(skip_serializing, default)]
    password: Option<String>,
    #[serde(flatten)]
    lists: WatchLists,
    revision: u32,
}

impl User {
    /// Materialise a freshly stored account from its draft.
    pub fn from_new(id: UserId, draft: NewUser) -> Self {
        let NewUser {
            name,
            email,
            password,
        } = draft;
        Self {
            id,
            name,
            email,
            password,
            lists: WatchLists::default(),
            revision: 1,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Free-text display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Email address as submitted.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Raw password. Never hashed by this crate.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// The user's three watch lists.
    pub fn lists(&self) -> &WatchLists {
        &self.lists
    }

    /// Mutable access to the watch lists.
    pub fn lists_mut(&mut self) -> &mut WatchLists {
        &mut self.lists
    }

    /// Optimistic concurrency counter.
    pub fn revision(&self) -> u32 {
        self.revision
    }

    /// Revision the next successful save will carry.
    pub fn next_revision(&self) -> u32 {
        self.revision.saturating_add(1)
    }

    /// Replace the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the email address.
    #[must_use]
    pub fn with_email(mut self, email: Email) -> Self {
        self.email = email;
        self
    }

    /// Replace the password without re-validating it.
    #[must_use]
    pub fn with_password(mut self, password: Option<String>) -> Self {
        self.password = password;
        self
    }

    /// Replace the revision counter; used by store adapters and services.
    #[must_use]
    pub fn with_revision(mut self, revision: u32) -> Self {
        self.revision = revision;
        self
    }
}
