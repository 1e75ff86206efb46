use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::comparator::RatingComparison;

/// One option of the memory recall selector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecallOption {
    pub label: String,
    /// Days before the page date; negative looks ahead.
    pub days: i64,
}

impl RecallOption {
    pub fn new(label: impl Into<String>, days: i64) -> Self {
        Self {
            label: label.into(),
            days,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EditorSettings {
    pub rating_comparison: RatingComparison,
    pub recall_offsets: Vec<RecallOption>,
    pub default_recall_offset: i64,
    /// Also show remote failures as an error toast instead of only logging.
    pub surface_remote_failures: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            rating_comparison: RatingComparison::Sorted,
            recall_offsets: vec![
                RecallOption::new("Today", 0),
                RecallOption::new("One week ago", 7),
                RecallOption::new("One month ago", 30),
                RecallOption::new("One year ago", 365),
            ],
            default_recall_offset: 0,
            surface_remote_failures: false,
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<EditorSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            EditorSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, EditorSettings> {
        self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, EditorSettings> {
        self.data.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn editor(&self) -> EditorSettings {
        self.read().clone()
    }

    pub fn update(&self, settings: EditorSettings) -> Result<()> {
        let mut guard = self.write();
        *guard = settings;
        self.persist(&guard)
    }

    fn persist(&self, data: &EditorSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
