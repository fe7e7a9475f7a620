//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: in-memory [`UserStore`](crate::domain::ports::UserStore)
//!   with revision checks
//! - **catalog**: in-memory [`CatalogLookup`](crate::domain::ports::CatalogLookup)
//!
//! Adapters are thin translators between domain types and their storage
//! representation. They contain no business logic beyond the atomicity the
//! ports demand.

pub mod catalog;
pub mod persistence;
