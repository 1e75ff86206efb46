//! Dirty-state comparison between live form state and what is saved.
//!
//! Title and body compare exactly. Tags compare as sets. Ratings compare
//! after sorting by default, which hides a swap of values between two
//! dimensions; [`RatingComparison::Positional`] compares dimension by
//! dimension instead.

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::models::{EntrySnapshot, RatingDimension};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RatingComparison {
    #[default]
    Sorted,
    Positional,
}

/// What the form is compared against.
#[derive(Debug, Clone, Copy)]
pub enum SavedState<'a> {
    Entry(&'a EntrySnapshot),
    /// No entry exists yet for the page date.
    Empty,
}

impl<'a> From<Option<&'a EntrySnapshot>> for SavedState<'a> {
    fn from(value: Option<&'a EntrySnapshot>) -> Self {
        value.map_or(SavedState::Empty, SavedState::Entry)
    }
}

/// Snapshot a never-saved entry is equivalent to.
pub fn baseline_snapshot(dimensions: &[RatingDimension]) -> EntrySnapshot {
    EntrySnapshot::blank(
        dimensions
            .iter()
            .map(RatingDimension::default_value)
            .collect(),
    )
}

#[derive(Debug, Clone)]
pub struct Comparator {
    dimensions: Vec<RatingDimension>,
    ratings: RatingComparison,
}

impl Comparator {
    pub fn new(dimensions: Vec<RatingDimension>, ratings: RatingComparison) -> Self {
        Self {
            dimensions,
            ratings,
        }
    }

    pub fn dimensions(&self) -> &[RatingDimension] {
        &self.dimensions
    }

    pub fn baseline(&self) -> EntrySnapshot {
        baseline_snapshot(&self.dimensions)
    }

    /// True when `current` differs from `saved`.
    ///
    /// Both snapshots must carry one rating per configured dimension.
    pub fn is_dirty(
        &self,
        current: &EntrySnapshot,
        saved: SavedState<'_>,
    ) -> Result<bool, SnapshotError> {
        let expected = self.dimensions.len();
        current.check_rating_count(expected)?;

        let baseline;
        let saved = match saved {
            SavedState::Entry(snapshot) => snapshot,
            SavedState::Empty => {
                baseline = self.baseline();
                &baseline
            }
        };
        saved.check_rating_count(expected)?;

        Ok(snapshots_differ(current, saved, self.ratings))
    }
}

/// Field-wise difference of two well-formed snapshots.
pub fn snapshots_differ(a: &EntrySnapshot, b: &EntrySnapshot, ratings: RatingComparison) -> bool {
    a.title != b.title
        || a.body != b.body
        || !ratings_match(&a.ratings, &b.ratings, ratings)
        || !tags_match(&a.tags, &b.tags)
}

fn ratings_match(a: &[i64], b: &[i64], mode: RatingComparison) -> bool {
    match mode {
        RatingComparison::Positional => a == b,
        RatingComparison::Sorted => sorted(a) == sorted(b),
    }
}

fn tags_match(a: &[String], b: &[String]) -> bool {
    let mut a: Vec<&str> = a.iter().map(String::as_str).collect();
    let mut b: Vec<&str> = b.iter().map(String::as_str).collect();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

fn sorted(values: &[i64]) -> Vec<i64> {
    let mut values = values.to_vec();
    values.sort_unstable();
    values
}
