use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::OnceCell;

use crate::db::EntryCache;
use crate::models::{CachedEntry, EntrySnapshot, RatingSettings};

use super::{EntryGateway, FetchMode, GatewayResponse, RemoteStore};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_error, log_warn};

/// Read-through cache in front of a [`RemoteStore`].
///
/// A remote miss is cached as an empty marker. The cache only changes after
/// the remote accepted a mutation.
pub struct CachedGateway<R> {
    remote: R,
    cache: EntryCache,
    settings: OnceCell<RatingSettings>,
}

impl<R: RemoteStore> CachedGateway<R> {
    pub fn new(remote: R, cache: EntryCache) -> Self {
        Self {
            remote,
            cache,
            settings: OnceCell::new(),
        }
    }

    pub fn cache(&self) -> &EntryCache {
        &self.cache
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    async fn store(&self, entry: &CachedEntry) {
        if let Err(err) = self.cache.put_entry(entry).await {
            log_warn!("failed to cache entry for {}: {err:#}", entry.date);
            // A stale row would outlive the remote change; drop it instead.
            if let Err(err) = self.cache.evict_entry(entry.date).await {
                log_error!("failed to evict stale cache row for {}: {err:#}", entry.date);
            }
        }
    }
}

#[async_trait]
impl<R: RemoteStore> EntryGateway for CachedGateway<R> {
    async fn get_entry(&self, date: NaiveDate, mode: FetchMode) -> Result<Option<CachedEntry>> {
        if mode == FetchMode::PreferCache {
            match self.cache.get_entry(date).await {
                Ok(Some(hit)) => {
                    log_debug!("cache hit for {date}");
                    return Ok(Some(hit));
                }
                Ok(None) => {}
                Err(err) => log_warn!("cache read failed for {date}, asking remote: {err:#}"),
            }
        }

        let entry = match self.remote.fetch_entry(date).await? {
            Some(snapshot) => CachedEntry::new(date, snapshot),
            None => CachedEntry::empty(date),
        };
        self.store(&entry).await;
        Ok(Some(entry))
    }

    async fn get_settings(&self) -> Result<RatingSettings> {
        self.settings
            .get_or_try_init(|| self.remote.fetch_settings())
            .await
            .cloned()
    }

    async fn add_entry(&self, date: NaiveDate, entry: &EntrySnapshot) -> Result<GatewayResponse> {
        let response = self.remote.create_entry(date, entry).await?;
        if response.ok {
            self.store(&CachedEntry::new(date, entry.clone())).await;
        }
        Ok(response)
    }

    async fn edit_entry(&self, date: NaiveDate, entry: &EntrySnapshot) -> Result<GatewayResponse> {
        let response = self.remote.update_entry(date, entry).await?;
        if response.ok {
            self.store(&CachedEntry::new(date, entry.clone())).await;
        }
        Ok(response)
    }

    async fn delete_entry(&self, date: NaiveDate) -> Result<GatewayResponse> {
        let response = self.remote.delete_entry(date).await?;
        if response.ok {
            self.store(&CachedEntry::empty(date)).await;
        }
        Ok(response)
    }
}
