//! Catalog media references and watch-list categories.
//!
//! Media entries are owned by the catalog. This crate only keeps their
//! identifiers and compares entries by identity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::Error;

/// Catalog identifier of a media entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaId(u64);

impl MediaId {
    /// Wrap a raw catalog identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw catalog identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for MediaId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Catalog entry resolved from a [`MediaId`].
///
/// Two entries are equal when their identifiers are equal; the title is
/// informational.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaEntry {
    id: MediaId,
    title: String,
}

impl MediaEntry {
    /// Build an entry as the catalog would return it.
    pub fn new(id: MediaId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }

    /// Catalog identifier.
    pub fn id(&self) -> MediaId {
        self.id
    }

    /// Display title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }
}

impl PartialEq for MediaEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MediaEntry {}

/// Watch-status bucket a media entry can occupy for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListCategory {
    /// Currently being watched.
    Watching,
    /// Queued to watch later.
    WantToWatch,
    /// Finished.
    Completed,
}

impl ListCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 3] = [Self::Watching, Self::WantToWatch, Self::Completed];

    /// Stable wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Watching => "WATCHING",
            Self::WantToWatch => "WANT_TO_WATCH",
            Self::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for ListCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListCategory {
    type Err = Error;

    /// Parse untyped boundary input, ignoring ASCII case.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| Error::invalid_operation(format!("invalid category: {value}")))
    }
}

impl TryFrom<&str> for ListCategory {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("WATCHING", ListCategory::Watching)]
    #[case("want_to_watch", ListCategory::WantToWatch)]
    #[case(" Completed ", ListCategory::Completed)]
    fn parses_category_names(#[case] raw: &str, #[case] expected: ListCategory) {
        assert_eq!(raw.parse::<ListCategory>().expect("known category"), expected);
    }

    #[rstest]
    #[case("DROPPED")]
    #[case("")]
    #[case("WANT TO WATCH")]
    fn rejects_unknown_category_names(#[case] raw: &str) {
        let error = ListCategory::try_from(raw).expect_err("unknown category");
        assert_eq!(error.code(), ErrorCode::InvalidOperation);
        assert!(error.to_string().contains("invalid category"));
    }

    #[rstest]
    fn categories_serialise_with_wire_names() {
        let value = serde_json::to_value(ListCategory::ALL).expect("serialise");
        assert_eq!(
            value,
            serde_json::json!(["WATCHING", "WANT_TO_WATCH", "COMPLETED"])
        );
    }

    #[rstest]
    fn entries_compare_by_identity() {
        let first = MediaEntry::new(MediaId::new(7), "Cowboy Bebop");
        let renamed = MediaEntry::new(MediaId::new(7), "Cowboy Bebop (1998)");
        let other = MediaEntry::new(MediaId::new(8), "Cowboy Bebop");

        assert_eq!(first, renamed);
        assert_ne!(first, other);
    }
}
