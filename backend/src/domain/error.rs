//! Domain-level error types.
//!
//! These errors are transport agnostic. Callers translate them into whatever
//! user-facing representation their protocol needs; [`ErrorCode`] gives them a
//! stable key to switch on.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Email, MediaId, UserId, PASSWORD_MIN_LENGTH};

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Another account already uses the email address.
    DuplicateUser,
    /// The password violates the creation policy.
    InvalidPassword,
    /// No account matches the identifier or email.
    UserNotFound,
    /// The catalog could not resolve the media identifier.
    MediaNotFound,
    /// Invalid category or watch-list exclusivity violation.
    InvalidOperation,
    /// A concurrent write won and retrying did not help.
    Conflict,
    /// A collaborator could not be reached.
    ServiceUnavailable,
    /// An unexpected collaborator failure.
    InternalError,
}

impl ErrorCode {
    /// Wire name of the code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DuplicateUser => "duplicate_user",
            Self::InvalidPassword => "invalid_password",
            Self::UserNotFound => "user_not_found",
            Self::MediaNotFound => "media_not_found",
            Self::InvalidOperation => "invalid_operation",
            Self::Conflict => "conflict",
            Self::ServiceUnavailable => "service_unavailable",
            Self::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key used in a failed user lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLookup {
    /// Lookup by identifier.
    Id(UserId),
    /// Lookup by email address.
    Email(Email),
}

impl fmt::Display for UserLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id {id}"),
            Self::Email(email) => write!(f, "email {email}"),
        }
    }
}

/// Failure returned by every registry and watch-list operation.
///
/// # Examples
/// ```
/// use watchlist_backend::domain::{Error, ErrorCode, UserId};
///
/// let err = Error::user_not_found(UserId::random());
/// assert_eq!(err.code(), ErrorCode::UserNotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Identity conflict on the email address.
    #[error("a user with email {email} already exists")]
    DuplicateUser {
        /// Email that is already taken.
        email: Email,
    },
    /// Password absent or too short at creation.
    #[error("password must be at least {min_length} characters")]
    InvalidPassword {
        /// Minimum accepted length.
        min_length: usize,
    },
    /// No account for the lookup key.
    #[error("user not found by {lookup}")]
    UserNotFound {
        /// What was looked up.
        lookup: UserLookup,
    },
    /// Catalog resolution failed.
    #[error("media entry {media_id} not found")]
    MediaNotFound {
        /// Unresolved identifier.
        media_id: MediaId,
    },
    /// Invalid category or exclusivity violation.
    #[error("{message}")]
    InvalidOperation {
        /// Human-readable reason.
        message: String,
    },
    /// Optimistic write lost against concurrent writers.
    #[error("{message}")]
    Conflict {
        /// Human-readable reason.
        message: String,
    },
    /// Collaborator unreachable.
    #[error("{message}")]
    ServiceUnavailable {
        /// Human-readable reason.
        message: String,
    },
    /// Unexpected collaborator failure.
    #[error("{message}")]
    Internal {
        /// Human-readable reason.
        message: String,
    },
}

impl Error {
    /// Stable machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::DuplicateUser { .. } => ErrorCode::DuplicateUser,
            Self::InvalidPassword { .. } => ErrorCode::InvalidPassword,
            Self::UserNotFound { .. } => ErrorCode::UserNotFound,
            Self::MediaNotFound { .. } => ErrorCode::MediaNotFound,
            Self::InvalidOperation { .. } => ErrorCode::InvalidOperation,
            Self::Conflict { .. } => ErrorCode::Conflict,
            Self::ServiceUnavailable { .. } => ErrorCode::ServiceUnavailable,
            Self::Internal { .. } => ErrorCode::InternalError,
        }
    }

    /// Convenience constructor for [`Error::DuplicateUser`].
    pub fn duplicate_user(email: Email) -> Self {
        Self::DuplicateUser { email }
    }

    /// Convenience constructor for [`Error::InvalidPassword`].
    pub fn invalid_password() -> Self {
        Self::InvalidPassword {
            min_length: PASSWORD_MIN_LENGTH,
        }
    }

    /// Convenience constructor for a missing identifier.
    pub fn user_not_found(id: UserId) -> Self {
        Self::UserNotFound {
            lookup: UserLookup::Id(id),
        }
    }

    /// Convenience constructor for a missing email.
    pub fn user_not_found_by_email(email: Email) -> Self {
        Self::UserNotFound {
            lookup: UserLookup::Email(email),
        }
    }

    /// Convenience constructor for [`Error::MediaNotFound`].
    pub fn media_not_found(media_id: MediaId) -> Self {
        Self::MediaNotFound { media_id }
    }

    /// Convenience constructor for [`Error::InvalidOperation`].
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
