//! In-process remote store.
//!
//! Mirrors the HTTP backend's answers (`Conflict` on a duplicate create,
//! `Not Found` on a missing update or delete) without any transport. Clones
//! share state.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::gateway::{GatewayResponse, RemoteStore};
use crate::models::{EntrySnapshot, RatingSettings};

#[derive(Debug, Default)]
struct RemoteState {
    entries: BTreeMap<NaiveDate, EntrySnapshot>,
    settings: RatingSettings,
    fail_next: Option<String>,
    unreachable: bool,
    fetch_count: usize,
    settings_fetch_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryRemote {
    state: Arc<Mutex<RemoteState>>,
}

impl MemoryRemote {
    pub fn new(settings: RatingSettings) -> Self {
        Self {
            state: Arc::new(Mutex::new(RemoteState {
                settings,
                ..RemoteState::default()
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RemoteState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Stores an entry directly, as if another client had saved it.
    pub fn seed(&self, date: NaiveDate, entry: EntrySnapshot) {
        self.lock().entries.insert(date, entry);
    }

    pub fn entry(&self, date: NaiveDate) -> Option<EntrySnapshot> {
        self.lock().entries.get(&date).cloned()
    }

    /// The next mutation answers `ok: false` with this status text.
    pub fn fail_next(&self, status_text: impl Into<String>) {
        self.lock().fail_next = Some(status_text.into());
    }

    /// Every call errors as if the network were down.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.lock().unreachable = unreachable;
    }

    pub fn fetch_count(&self) -> usize {
        self.lock().fetch_count
    }

    pub fn settings_fetch_count(&self) -> usize {
        self.lock().settings_fetch_count
    }

    fn mutate<F>(&self, apply: F) -> Result<GatewayResponse>
    where
        F: FnOnce(&mut BTreeMap<NaiveDate, EntrySnapshot>) -> GatewayResponse,
    {
        let mut state = self.lock();
        if state.unreachable {
            bail!("remote store unreachable");
        }
        if let Some(status_text) = state.fail_next.take() {
            return Ok(GatewayResponse::failed(status_text));
        }
        Ok(apply(&mut state.entries))
    }
}

#[async_trait]
impl RemoteStore for MemoryRemote {
    async fn fetch_entry(&self, date: NaiveDate) -> Result<Option<EntrySnapshot>> {
        let mut state = self.lock();
        if state.unreachable {
            bail!("remote store unreachable");
        }
        state.fetch_count += 1;
        Ok(state.entries.get(&date).cloned())
    }

    async fn fetch_settings(&self) -> Result<RatingSettings> {
        let mut state = self.lock();
        if state.unreachable {
            bail!("remote store unreachable");
        }
        state.settings_fetch_count += 1;
        Ok(state.settings.clone())
    }

    async fn create_entry(
        &self,
        date: NaiveDate,
        entry: &EntrySnapshot,
    ) -> Result<GatewayResponse> {
        self.mutate(|entries| {
            if entries.contains_key(&date) {
                return GatewayResponse::failed("Conflict");
            }
            entries.insert(date, entry.clone());
            GatewayResponse::ok()
        })
    }

    async fn update_entry(
        &self,
        date: NaiveDate,
        entry: &EntrySnapshot,
    ) -> Result<GatewayResponse> {
        self.mutate(|entries| match entries.get_mut(&date) {
            Some(existing) => {
                *existing = entry.clone();
                GatewayResponse::ok()
            }
            None => GatewayResponse::failed("Not Found"),
        })
    }

    async fn delete_entry(&self, date: NaiveDate) -> Result<GatewayResponse> {
        self.mutate(|entries| match entries.remove(&date) {
            Some(_) => GatewayResponse::ok(),
            None => GatewayResponse::failed("Not Found"),
        })
    }
}
