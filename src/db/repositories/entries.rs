use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Row};

use crate::db::{
    helpers::{format_date_key, from_json_column, parse_date_key, to_json_column},
    EntryCache,
};
use crate::models::{CachedEntry, EntrySnapshot};

fn row_to_entry(row: &Row) -> Result<CachedEntry> {
    let date: String = row.get("date")?;
    let ratings: String = row.get("ratings")?;
    let tags: String = row.get("tags")?;
    let empty: i64 = row.get("empty")?;

    Ok(CachedEntry {
        date: parse_date_key(&date, "date")?,
        snapshot: EntrySnapshot {
            title: row.get("title")?,
            body: row.get("body")?,
            ratings: from_json_column(&ratings, "ratings")?,
            tags: from_json_column(&tags, "tags")?,
        },
        empty: empty != 0,
    })
}

impl EntryCache {
    pub async fn get_entry(&self, date: NaiveDate) -> Result<Option<CachedEntry>> {
        let key = format_date_key(date);
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT date, title, body, ratings, tags, empty
                 FROM entries
                 WHERE date = ?1",
            )?;
            let mut rows = stmt.query(params![key])?;
            let entry = match rows.next()? {
                Some(row) => Some(row_to_entry(row)?),
                None => None,
            };
            Ok(entry)
        })
        .await
    }

    /// Inserts or replaces the row for `entry.date`.
    pub async fn put_entry(&self, entry: &CachedEntry) -> Result<()> {
        let record = entry.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO entries (date, title, body, ratings, tags, empty)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(date) DO UPDATE SET
                     title = excluded.title,
                     body = excluded.body,
                     ratings = excluded.ratings,
                     tags = excluded.tags,
                     empty = excluded.empty",
                params![
                    format_date_key(record.date),
                    record.snapshot.title,
                    record.snapshot.body,
                    to_json_column(&record.snapshot.ratings, "ratings")?,
                    to_json_column(&record.snapshot.tags, "tags")?,
                    record.empty as i64,
                ],
            )
            .with_context(|| "failed to store cached entry")?;
            Ok(())
        })
        .await
    }

    /// Drops the row so the next read goes to the remote.
    pub async fn evict_entry(&self, date: NaiveDate) -> Result<bool> {
        let key = format_date_key(date);
        self.execute(move |conn| {
            let removed = conn
                .execute("DELETE FROM entries WHERE date = ?1", params![key])
                .with_context(|| "failed to evict cached entry")?;
            Ok(removed > 0)
        })
        .await
    }
}
