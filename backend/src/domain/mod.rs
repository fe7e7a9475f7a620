//! Domain entities, services, and ports.
//!
//! Purpose: Define strongly typed accounts and watch lists, the services that
//! enforce their invariants, and the ports those services drive.
//!
//! Public surface:
//! - User, NewUser, UserId, Email: account identity and draft.
//! - MediaId, MediaEntry, ListCategory, WatchLists: catalog references and
//!   the three exclusive lists.
//! - Error, ErrorCode: typed failures with stable codes.
//! - UserRegistryService, ListMembershipService: driving port
//!   implementations.

pub mod error;
pub mod list_membership_service;
pub mod media;
pub mod ports;
pub mod user;
pub mod user_registry_service;
pub mod watch_lists;

pub use self::error::{Error, ErrorCode, UserLookup};
pub use self::list_membership_service::{ListMembershipConfig, ListMembershipService};
pub use self::media::{ListCategory, MediaEntry, MediaId};
pub use self::user::{Email, NewUser, PASSWORD_MIN_LENGTH, User, UserId, UserValidationError};
pub use self::user_registry_service::UserRegistryService;
pub use self::watch_lists::{AlreadyListed, WatchLists};
