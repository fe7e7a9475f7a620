//! Domain ports for the hexagonal boundary.
//!
//! Driven ports ([`UserStore`], [`CatalogLookup`]) are implemented by outbound
//! adapters. Driving ports ([`UserRegistry`], [`ListMembership`]) are
//! implemented by the domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod catalog_lookup;
mod list_membership;
mod user_registry;
mod user_store;

#[cfg(test)]
pub use catalog_lookup::MockCatalogLookup;
pub use catalog_lookup::{CatalogLookup, CatalogLookupError};
pub use list_membership::ListMembership;
pub use user_registry::UserRegistry;
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{UserStore, UserStoreError};
