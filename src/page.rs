//! Per-page session context: the date being edited and the rating
//! dimensions, both fixed once the page has loaded.

use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, TimeDelta};

use crate::db::parse_date_key;
use crate::gateway::EntryGateway;
use crate::models::RatingDimension;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    page_date: NaiveDate,
    dimensions: Vec<RatingDimension>,
}

impl PageContext {
    pub fn new(page_date: NaiveDate, dimensions: Vec<RatingDimension>) -> Self {
        Self {
            page_date,
            dimensions,
        }
    }

    /// Parses the page date from `location` and fetches the dimension
    /// configuration once.
    pub async fn load<G>(location: &str, gateway: &G) -> Result<Self>
    where
        G: EntryGateway + ?Sized,
    {
        let page_date = parse_page_date(location)?;
        let settings = gateway
            .get_settings()
            .await
            .context("failed to load rating settings")?;
        Ok(Self::new(page_date, settings.ratings))
    }

    pub fn page_date(&self) -> NaiveDate {
        self.page_date
    }

    pub fn dimensions(&self) -> &[RatingDimension] {
        &self.dimensions
    }

    /// Date shown in the memory panel for a selector offset, `None` when it
    /// falls outside the calendar range.
    pub fn recall_date(&self, offset_days: i64) -> Option<NaiveDate> {
        date_minus_days(self.page_date, offset_days)
    }
}

pub fn date_minus_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    TimeDelta::try_days(days).and_then(|delta| date.checked_sub_signed(delta))
}

/// Accepts `.../2024-03-10`, `...?date=2024-03-10` or a bare date.
pub fn parse_page_date(location: &str) -> Result<NaiveDate> {
    let (path, query) = match location.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (location, None),
    };

    if let Some(value) = query.and_then(|query| {
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "date")
            .map(|(_, value)| value)
    }) {
        return parse_date_key(value, "page date");
    }

    let segment = path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| anyhow!("no date in page location '{location}'"))?;
    parse_date_key(segment, "page date")
}
