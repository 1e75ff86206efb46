//! Rating dimension configuration.
//!
//! A dimension is one numeric axis (mood, energy, ...) with an inclusive
//! `[min, max]` range. The gateway hands out the whole configuration as
//! [`RatingSettings`]; dimension order is fixed and defines the position of
//! each value inside [`EntrySnapshot::ratings`](super::EntrySnapshot).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RatingDimension {
    pub name: String,
    pub min: i64,
    pub max: i64,
    /// Only present when the dimension describes a recorded entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

impl RatingDimension {
    pub fn new(name: impl Into<String>, min: i64, max: i64) -> Self {
        Self {
            name: name.into(),
            min,
            max,
            value: None,
        }
    }

    /// Value a fresh slider starts at, and the value an unsaved entry is
    /// compared against.
    pub fn default_value(&self) -> i64 {
        self.value.unwrap_or(self.min)
    }

    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max.max(self.min))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RatingSettings {
    pub ratings: Vec<RatingDimension>,
}

impl RatingSettings {
    pub fn new(ratings: Vec<RatingDimension>) -> Self {
        Self { ratings }
    }

    pub fn defaults(&self) -> Vec<i64> {
        self.ratings.iter().map(RatingDimension::default_value).collect()
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}
