// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0

//! The location directory: lookup, filtering, and search over merged POIs.
//!
//! A `Directory` owns the merged location list and an id index. Duplicate
//! ids keep the first record inserted ("first match wins"), matching how
//! the original data sources behaved. All listing operations hide records
//! whose ids lack the `ID` prefix; `get` does not, so detail lookups for
//! decorative elements still work.

use std::collections::HashMap;

use super::{Category, Location};

/// Criteria for [`Directory::filter`]. Empty/`None` fields don't constrain.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Keep only these categories (empty = all)
    pub categories: Vec<Category>,
    /// Case-insensitive substring over title, subtitle and description
    pub search_query: Option<String>,
    /// Keep only this floor
    pub floor: Option<i32>,
}

/// Per-category counts, reported at startup and by the control panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryStatistics {
    pub total: usize,
    pub by_category: HashMap<Category, usize>,
}

/// Merged, indexed POI collection.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    locations: Vec<Location>,
    by_id: HashMap<String, usize>,
}

impl Directory {
    /// Build a directory, keeping the first record for each duplicate id.
    pub fn new(locations: impl IntoIterator<Item = Location>) -> Self {
        let mut dir = Self::default();
        for location in locations {
            dir.insert(location);
        }
        dir
    }

    /// Insert one record; duplicates of an existing id are dropped.
    pub fn insert(&mut self, location: Location) {
        if self.by_id.contains_key(&location.id) {
            tracing::debug!("Duplicate location id {}, keeping first", location.id);
            return;
        }
        self.by_id
            .insert(location.id.clone(), self.locations.len());
        self.locations.push(location);
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Look up by id, including unlisted records
    pub fn get(&self, id: &str) -> Option<&Location> {
        self.by_id.get(id).map(|&i| &self.locations[i])
    }

    /// All listed locations, in insertion order
    pub fn all(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter().filter(|l| l.is_listed())
    }

    /// Listed locations in one category
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Location> {
        self.all().filter(move |l| l.category == category)
    }

    /// Apply the combined filters used by the search screen.
    pub fn filter(&self, options: &FilterOptions) -> Vec<&Location> {
        let query = options
            .search_query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        self.all()
            .filter(|l| options.categories.is_empty() || options.categories.contains(&l.category))
            .filter(|l| match &query {
                Some(q) => l.search_text().contains(q),
                None => true,
            })
            .filter(|l| match options.floor {
                Some(floor) => l.floor == floor,
                None => true,
            })
            .collect()
    }

    /// Same-category neighbors for the "similar stores" panel.
    pub fn related(&self, id: &str, limit: usize) -> Vec<&Location> {
        let Some(anchor) = self.get(id) else {
            return Vec::new();
        };
        self.by_category(anchor.category)
            .filter(|l| l.id != id)
            .take(limit)
            .collect()
    }

    /// Distinct categories present, in canonical display order
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.by_category(*c).next().is_some())
            .collect()
    }

    /// Distinct floors present, sorted ascending
    pub fn floors(&self) -> Vec<i32> {
        let mut floors: Vec<i32> = self.all().map(|l| l.floor).collect();
        floors.sort_unstable();
        floors.dedup();
        floors
    }

    pub fn statistics(&self) -> DirectoryStatistics {
        let mut by_category = HashMap::new();
        let mut total = 0;
        for location in self.all() {
            *by_category.entry(location.category).or_insert(0) += 1;
            total += 1;
        }
        DirectoryStatistics { total, by_category }
    }
}
