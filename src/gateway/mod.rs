//! Entry retrieval and mutation by date.
//!
//! [`EntryGateway`] is what the editing session talks to. [`RemoteStore`] is
//! the opaque backend behind it; [`CachedGateway`] joins the two with a local
//! read-through cache.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{CachedEntry, EntrySnapshot, RatingSettings};

pub mod cached;

pub use cached::CachedGateway;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Serve from the local cache when a row exists.
    PreferCache,
    /// Always ask the remote and refresh the cached row.
    Refresh,
}

/// Outcome of a mutation, shaped like an HTTP response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub ok: bool,
    pub status_text: String,
}

impl GatewayResponse {
    pub fn ok() -> Self {
        Self {
            ok: true,
            status_text: "OK".into(),
        }
    }

    pub fn failed(status_text: impl Into<String>) -> Self {
        Self {
            ok: false,
            status_text: status_text.into(),
        }
    }
}

#[async_trait]
pub trait EntryGateway: Send + Sync {
    /// `Ok(None)` and an entry with `empty == true` both mean nothing is saved.
    async fn get_entry(&self, date: NaiveDate, mode: FetchMode) -> Result<Option<CachedEntry>>;
    async fn get_settings(&self) -> Result<RatingSettings>;
    async fn add_entry(&self, date: NaiveDate, entry: &EntrySnapshot) -> Result<GatewayResponse>;
    async fn edit_entry(&self, date: NaiveDate, entry: &EntrySnapshot) -> Result<GatewayResponse>;
    async fn delete_entry(&self, date: NaiveDate) -> Result<GatewayResponse>;
}

#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn fetch_entry(&self, date: NaiveDate) -> Result<Option<EntrySnapshot>>;
    async fn fetch_settings(&self) -> Result<RatingSettings>;
    async fn create_entry(&self, date: NaiveDate, entry: &EntrySnapshot) -> Result<GatewayResponse>;
    async fn update_entry(&self, date: NaiveDate, entry: &EntrySnapshot) -> Result<GatewayResponse>;
    async fn delete_entry(&self, date: NaiveDate) -> Result<GatewayResponse>;
}
