//! Watch-list backend library.
//!
//! User accounts with three mutually exclusive watch lists of catalog media
//! entries, behind hexagonal ports so any store or catalog can be plugged in.

pub mod config;
pub mod domain;
pub mod outbound;
pub mod telemetry;
