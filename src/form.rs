//! Live form state: title, body, rating sliders and tag chips.
//!
//! [`FormControls`] is the page's form model. UI events mutate it; the
//! session only ever reads it through [`FormStateReader`].

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

use crate::models::{CachedEntry, EntrySnapshot, RatingDimension};

pub trait FormStateReader: Send + Sync {
    /// Current control values. Never fails; absent controls read as empty.
    fn read_form_state(&self) -> EntrySnapshot;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slider {
    pub dimension: RatingDimension,
    pub value: i64,
}

impl Slider {
    pub fn new(dimension: RatingDimension) -> Self {
        let value = dimension.clamp(dimension.default_value());
        Self { dimension, value }
    }

    pub fn set(&mut self, value: i64) {
        self.value = self.dimension.clamp(value);
    }

    pub fn label(&self) -> String {
        self.value.to_string()
    }

    /// Fill fraction of the slider track, `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        let span = self.dimension.max - self.dimension.min;
        if span <= 0 {
            return 0.0;
        }
        (self.value - self.dimension.min) as f64 / span as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKey {
    Enter,
    Escape,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagInput {
    pub text: String,
    pub visible: bool,
}

#[derive(Debug, Clone, Default)]
struct FormValues {
    title: String,
    body: String,
    sliders: Vec<Slider>,
    tags: Vec<String>,
    tag_input: TagInput,
}

#[derive(Debug, Default)]
pub struct FormControls {
    values: RwLock<FormValues>,
}

impl FormControls {
    /// Blank form with one slider per dimension at its default.
    pub fn new(dimensions: &[RatingDimension]) -> Self {
        Self {
            values: RwLock::new(FormValues {
                sliders: dimensions.iter().cloned().map(Slider::new).collect(),
                ..FormValues::default()
            }),
        }
    }

    /// Form prefilled from a saved entry; empty markers leave it blank.
    pub fn from_entry(dimensions: &[RatingDimension], entry: Option<&CachedEntry>) -> Self {
        let form = Self::new(dimensions);
        if let Some(saved) = entry.and_then(CachedEntry::saved) {
            let mut values = form.write();
            values.title = saved.title.clone();
            values.body = saved.body.clone();
            for (slider, value) in values.sliders.iter_mut().zip(&saved.ratings) {
                slider.set(*value);
            }
            for tag in &saved.tags {
                push_unique(&mut values.tags, tag);
            }
        }
        form
    }

    fn read(&self) -> RwLockReadGuard<'_, FormValues> {
        self.values.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, FormValues> {
        self.values.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.write().title = title.into();
    }

    pub fn set_body(&self, body: impl Into<String>) {
        self.write().body = body.into();
    }

    /// Moves slider `index`; returns the clamped value, or `None` when there
    /// is no such slider.
    pub fn set_rating(&self, index: usize, value: i64) -> Option<i64> {
        let mut values = self.write();
        let slider = values.sliders.get_mut(index)?;
        slider.set(value);
        Some(slider.value)
    }

    pub fn slider(&self, index: usize) -> Option<Slider> {
        self.read().sliders.get(index).cloned()
    }

    /// Adds a chip unless the trimmed name is empty or already present.
    pub fn add_tag(&self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        push_unique(&mut self.write().tags, name)
    }

    pub fn remove_tag(&self, name: &str) -> bool {
        let mut values = self.write();
        let before = values.tags.len();
        values.tags.retain(|tag| tag != name);
        values.tags.len() != before
    }

    pub fn tags(&self) -> Vec<String> {
        self.read().tags.clone()
    }

    pub fn open_tag_input(&self) {
        self.write().tag_input.visible = true;
    }

    pub fn type_tag(&self, text: &str) {
        self.write().tag_input.text = text.to_string();
    }

    /// Enter commits the typed tag, Escape discards it. Either way the input
    /// is cleared and hidden. Returns the tag that was added, if any.
    pub fn tag_key(&self, key: TagKey) -> Option<String> {
        let mut values = self.write();
        let typed = std::mem::take(&mut values.tag_input.text);
        values.tag_input.visible = false;

        match key {
            TagKey::Escape => None,
            TagKey::Enter => {
                let name = typed.trim();
                if !name.is_empty() && push_unique(&mut values.tags, name) {
                    Some(name.to_string())
                } else {
                    None
                }
            }
        }
    }

    pub fn tag_input(&self) -> TagInput {
        self.read().tag_input.clone()
    }
}

impl FormStateReader for FormControls {
    fn read_form_state(&self) -> EntrySnapshot {
        let values = self.read();
        EntrySnapshot {
            title: values.title.clone(),
            body: values.body.clone(),
            ratings: values.sliders.iter().map(|slider| slider.value).collect(),
            tags: values.tags.clone(),
        }
    }
}

fn push_unique(tags: &mut Vec<String>, name: &str) -> bool {
    if tags.iter().any(|tag| tag == name) {
        return false;
    }
    tags.push(name.to_string());
    true
}
