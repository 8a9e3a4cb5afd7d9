// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0

//! Google Sheets ingest: the tenant list lives in a shared spreadsheet.
//!
//! The sheet is fetched as CSV over its export URL and keyed by the `ID`
//! column. Fetch or parse failures degrade to an empty result with an
//! error log; the directory builder treats missing sheet data as "use the
//! SVG/mock values", never as a fatal condition.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use super::csv::parse_csv;
use crate::model::Category;
use crate::settings;

/// One row of tenant data from the sheet, keyed by `ID`.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub location: String,
    pub floor: i32,
    pub phone: String,
    pub description: String,
    pub category: Category,
}

/// Convert a full Google Sheets URL into its CSV export form.
///
/// Already-direct CSV URLs (or anything that isn't a
/// `docs.google.com/spreadsheets` link) pass through unchanged.
pub fn to_csv_export_url(url: &str) -> String {
    if !url.contains("docs.google.com/spreadsheets") {
        return url.to_owned();
    }
    let Some(sheet_id) = extract_sheet_id(url) else {
        return url.to_owned();
    };
    format!("https://docs.google.com/spreadsheets/d/{sheet_id}/export?format=csv")
}

/// Pull the document id out of a `/d/<id>/...` path segment.
fn extract_sheet_id(url: &str) -> Option<&str> {
    let start = url.find("/d/")? + 3;
    let rest = &url[start..];
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(rest.len());
    if end == 0 { None } else { Some(&rest[..end]) }
}

/// Fetch and parse the sheet, returning rows keyed by id.
///
/// Errors are logged and produce an empty map so callers fall back.
pub fn load(url: &str) -> HashMap<String, SheetRow> {
    match fetch_rows(url) {
        Ok(rows) => {
            tracing::info!("Loaded {} rows from sheet", rows.len());
            rows.into_iter().map(|r| (r.id.clone(), r)).collect()
        }
        Err(err) => {
            tracing::error!("Error loading sheet: {err:#}");
            HashMap::new()
        }
    }
}

/// Freshness-gated wrapper around [`load`] for hosts that re-query the
/// sheet (search screens, periodic refreshes).
///
/// A fetch that comes back fresh is reused until the cache ages out; a
/// failed or empty fetch keeps the previous rows and leaves the cache
/// stale so the next call retries.
#[derive(Debug, Clone)]
pub struct SheetCache {
    max_age: Duration,
    fetched_at: Option<Instant>,
    rows: HashMap<String, SheetRow>,
}

impl SheetCache {
    pub fn new() -> Self {
        Self::with_max_age(settings::timing::SHEET_CACHE_DURATION)
    }

    pub fn with_max_age(max_age: Duration) -> Self {
        Self {
            max_age,
            fetched_at: None,
            rows: HashMap::new(),
        }
    }

    pub fn rows(&self) -> &HashMap<String, SheetRow> {
        &self.rows
    }

    /// Whether the cached rows have aged out (or were never fetched).
    pub fn is_stale(&self, now: Instant) -> bool {
        match self.fetched_at {
            Some(fetched) => now.duration_since(fetched) >= self.max_age,
            None => true,
        }
    }

    /// Record a successful fetch, restarting the freshness window.
    pub fn store(&mut self, rows: HashMap<String, SheetRow>, now: Instant) {
        self.rows = rows;
        self.fetched_at = Some(now);
    }

    /// Return cached rows, refetching first when they have aged out.
    pub fn refresh(&mut self, url: &str, now: Instant) -> &HashMap<String, SheetRow> {
        if self.is_stale(now) {
            let rows = load(url);
            if rows.is_empty() {
                tracing::warn!("Sheet refresh returned nothing, keeping cached rows");
            } else {
                self.store(rows, now);
            }
        }
        &self.rows
    }
}

impl Default for SheetCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch the CSV export and convert rows into typed records.
///
/// Rows without an `ID` value are dropped.
pub fn fetch_rows(url: &str) -> Result<Vec<SheetRow>> {
    let csv_url = to_csv_export_url(url);
    tracing::info!("Fetching sheet CSV: {csv_url}");

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(15))
        .build()
        .context("building HTTP client")?;

    let response = client
        .get(&csv_url)
        .send()
        .with_context(|| format!("fetching {csv_url}"))?
        .error_for_status()
        .context("sheet export returned error status")?;

    let text = response.text().context("reading sheet body")?;
    Ok(rows_from_csv(&text))
}

/// Map parsed CSV records to typed rows (pure; split out for testing).
pub fn rows_from_csv(text: &str) -> Vec<SheetRow> {
    parse_csv(text)
        .into_iter()
        .filter_map(|record| {
            let id = record.get("ID").filter(|v| !v.is_empty())?.clone();
            let field = |name: &str| record.get(name).cloned().unwrap_or_default();
            Some(SheetRow {
                id,
                title: field("Title"),
                subtitle: field("Subtitle"),
                location: field("Location"),
                floor: field("Floor").parse().unwrap_or(0),
                phone: field("Phone"),
                description: field("Description"),
                category: Category::from_name(&field("Category")),
            })
        })
        .collect()
}
