// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0

//! Data-source orchestration: floor-plan SVG, Google Sheet, mock fallback.
//!
//! Source precedence per record field: a sheet row for the same id
//! overrides SVG-derived titles and metadata; the SVG supplies geometry;
//! when the SVG yields nothing the sheet rows stand alone; when both are
//! unavailable the built-in mock list keeps the kiosk functional. Load
//! failures at any stage are logged and degrade, they never abort.

pub mod csv;
pub mod mock;
pub mod sheets;

use std::collections::HashMap;
use std::path::Path;

use crate::floorplan::{Feature, FloorPlan};
use crate::model::directory::Directory;
use crate::model::Location;
use sheets::SheetRow;

/// Everything the screens need after startup loading.
#[derive(Debug)]
pub struct LoadedData {
    pub directory: Directory,
    /// Present when the SVG parsed; also carries category colors
    pub floor_plan: Option<FloorPlan>,
}

/// Load and merge all configured sources.
pub fn load_all(svg_path: Option<&Path>, sheet_url: Option<&str>) -> LoadedData {
    let sheet = match sheet_url {
        Some(url) => sheets::load(url),
        None => HashMap::new(),
    };

    let floor_plan = svg_path.and_then(|path| match std::fs::read_to_string(path) {
        Ok(text) => match FloorPlan::parse(&text) {
            Ok(plan) => Some(plan),
            Err(err) => {
                tracing::warn!("Floor plan unusable ({err}), falling back");
                None
            }
        },
        Err(err) => {
            tracing::warn!("Cannot read {} ({err}), falling back", path.display());
            None
        }
    });

    let directory = build_directory(floor_plan.as_ref(), &sheet);
    LoadedData {
        directory,
        floor_plan,
    }
}

/// Pick the best available source combination.
pub fn build_directory(
    floor_plan: Option<&FloorPlan>,
    sheet: &HashMap<String, SheetRow>,
) -> Directory {
    if let Some(plan) = floor_plan {
        if !plan.features.is_empty() {
            return Directory::new(
                plan.features.iter().map(|f| merge_feature(f, sheet.get(&f.id))),
            );
        }
    }

    if !sheet.is_empty() {
        tracing::info!("No floor-plan features; listing sheet rows without geometry");
        return Directory::new(sheet.values().map(location_from_row));
    }

    tracing::warn!("No live data available, using mock directory");
    Directory::new(mock::mock_locations())
}

/// Merge one floor-plan feature with its sheet row, if any.
///
/// Sheet text fields win when non-empty; the SVG keeps geometry and
/// supplies fallback title/category/placement.
fn merge_feature(feature: &Feature, row: Option<&SheetRow>) -> Location {
    let non_empty = |s: &str, fallback: String| {
        if s.is_empty() { fallback } else { s.to_owned() }
    };

    match row {
        Some(row) => Location {
            id: feature.id.clone(),
            title: non_empty(&row.title, feature.title.clone()),
            subtitle: row.subtitle.clone(),
            location: non_empty(&row.location, feature.group_id.clone()),
            floor: row.floor,
            phone: row.phone.clone(),
            description: non_empty(
                &row.description,
                format!("Located in {}", feature.group_id),
            ),
            category: row.category,
            coordinates: Some(feature.geometry.center),
            bounds: Some(feature.geometry.bounds),
        },
        None => Location {
            id: feature.id.clone(),
            title: feature.title.clone(),
            subtitle: String::new(),
            location: feature.group_id.clone(),
            floor: 0,
            phone: String::new(),
            description: format!("Located in {}", feature.group_id),
            category: feature.category,
            coordinates: Some(feature.geometry.center),
            bounds: Some(feature.geometry.bounds),
        },
    }
}

/// A sheet row standing alone, without floor-plan geometry.
fn location_from_row(row: &SheetRow) -> Location {
    Location {
        id: row.id.clone(),
        title: row.title.clone(),
        subtitle: row.subtitle.clone(),
        location: row.location.clone(),
        floor: row.floor,
        phone: row.phone.clone(),
        description: row.description.clone(),
        category: row.category,
        coordinates: None,
        bounds: None,
    }
}
