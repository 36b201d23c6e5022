//! Dated JSON archives of extracted news items.
//!
//! Each ingestion run persists one file per date:
//!
//! ```text
//! data_dir/
//! ├── news_2026-08-07.json
//! └── news_2026-08-08.json
//! ```
//!
//! The wire shape is `{"news": [ ...items... ]}`. A write for date D followed
//! by a read for date D returns the identical items in the same order.
//! Re-running for the same date replaces the whole file; archives are never
//! mutated in place.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument, warn};

use crate::models::NewsItem;

/// On-disk envelope around one day's items.
#[derive(Debug, Deserialize, Serialize)]
struct ArchiveFile {
    news: Vec<NewsItem>,
}

/// Path of the archive file for a date.
pub fn archive_path(data_dir: &str, date: NaiveDate) -> String {
    format!("{}/news_{}.json", data_dir.trim_end_matches('/'), date)
}

/// Write one day's items, replacing any prior archive for that date.
#[instrument(level = "info", skip_all, fields(%data_dir, %date, count = items.len()))]
pub async fn write_day(
    data_dir: &str,
    date: NaiveDate,
    items: &[NewsItem],
) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(data_dir).await {
        error!(%data_dir, error = %e, "Failed to create data dir");
        return Err(e.into());
    }

    let envelope = ArchiveFile { news: items.to_vec() };
    let json = serde_json::to_string_pretty(&envelope)?;

    let path = archive_path(data_dir, date);
    fs::write(&path, json).await?;
    info!(%path, "Wrote day archive");
    Ok(())
}

/// Read back exactly one day's items.
///
/// A missing file is an error: callers treat "no archive for the target
/// date" as a failed run, distinct from a present archive with zero items.
#[instrument(level = "info", skip_all, fields(%data_dir, %date))]
pub async fn read_day(data_dir: &str, date: NaiveDate) -> Result<Vec<NewsItem>, Box<dyn Error>> {
    let path = archive_path(data_dir, date);
    let json = fs::read_to_string(&path).await?;
    let envelope: ArchiveFile = serde_json::from_str(&json)?;
    info!(%path, count = envelope.news.len(), "Read day archive");
    Ok(envelope.news)
}

/// Read every stored day, newest date first, concatenated.
///
/// Files that fail to read or parse are logged and skipped; the aggregation
/// proceeds with whatever loads. An empty or missing data directory is an
/// error, matching the single-day contract.
#[instrument(level = "info", skip_all, fields(%data_dir))]
pub async fn read_all_days(data_dir: &str) -> Result<Vec<NewsItem>, Box<dyn Error>> {
    let mut dates = Vec::new();
    let mut entries = fs::read_dir(data_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some(date) = name
            .strip_prefix("news_")
            .and_then(|rest| rest.strip_suffix(".json"))
            .and_then(|stamp| stamp.parse::<NaiveDate>().ok())
        {
            dates.push(date);
        }
    }

    if dates.is_empty() {
        return Err(format!("no archive files found in {data_dir}").into());
    }

    dates.sort_unstable_by(|a, b| b.cmp(a));

    let mut all_items = Vec::new();
    for date in dates {
        match read_day(data_dir, date).await {
            Ok(items) => all_items.extend(items),
            Err(e) => warn!(%date, error = %e, "Skipping unreadable archive file"),
        }
    }

    info!(count = all_items.len(), "Aggregated all day archives");
    Ok(all_items)
}
