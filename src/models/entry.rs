use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{SnapshotError, ValidationError};

/// Title, body, ratings and tags of one diary entry at a point in time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EntrySnapshot {
    pub title: String,
    #[serde(alias = "entry")]
    pub body: String,
    /// One value per configured dimension, by position.
    pub ratings: Vec<i64>,
    /// Set semantics; order carries no meaning.
    pub tags: Vec<String>,
}

impl EntrySnapshot {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        ratings: Vec<i64>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            ratings,
            tags,
        }
    }

    /// Blank entry whose ratings sit at the given defaults.
    pub fn blank(ratings: Vec<i64>) -> Self {
        Self {
            ratings,
            ..Self::default()
        }
    }

    pub fn check_rating_count(&self, expected: usize) -> Result<(), SnapshotError> {
        if self.ratings.len() != expected {
            return Err(SnapshotError::RatingCount {
                expected,
                actual: self.ratings.len(),
            });
        }
        Ok(())
    }

    /// Title and body are both required before an entry can be saved.
    pub fn validate_for_submit(&self) -> Result<(), ValidationError> {
        if self.title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.body.is_empty() {
            return Err(ValidationError::EmptyBody);
        }
        Ok(())
    }
}

/// Snapshot as held by the local cache, keyed by date.
///
/// `empty` marks a date that has no real entry; its other fields carry no
/// meaning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CachedEntry {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub snapshot: EntrySnapshot,
    #[serde(default)]
    pub empty: bool,
}

impl CachedEntry {
    pub fn new(date: NaiveDate, snapshot: EntrySnapshot) -> Self {
        Self {
            date,
            snapshot,
            empty: false,
        }
    }

    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            snapshot: EntrySnapshot::default(),
            empty: true,
        }
    }

    /// The saved snapshot, or `None` when nothing real is stored.
    pub fn saved(&self) -> Option<&EntrySnapshot> {
        if self.empty {
            None
        } else {
            Some(&self.snapshot)
        }
    }
}

/// Treats an absent entry and an `empty` marker the same way.
pub fn saved_snapshot(entry: Option<&CachedEntry>) -> Option<&EntrySnapshot> {
    entry.and_then(CachedEntry::saved)
}
