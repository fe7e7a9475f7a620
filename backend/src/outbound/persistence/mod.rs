//! Persistence adapters for the user store port.
//!
//! # Example
//!
//! ```
//! use watchlist_backend::outbound::persistence::InMemoryUserStore;
//!
//! let store = InMemoryUserStore::default();
//! assert_eq!(store.is_empty(), Ok(true));
//! ```

mod in_memory_user_store;

pub use in_memory_user_store::InMemoryUserStore;
