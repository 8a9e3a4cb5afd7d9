// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0

//! Built-in fallback directory used when both live sources fail.
//!
//! Mirrors the tenant list the kiosk shipped with; ids line up with the
//! floor-plan element ids so a later successful SVG load replaces these
//! records one-for-one.

use crate::model::{Category, Location};

/// The fallback tenant list.
pub fn mock_locations() -> Vec<Location> {
    let entries: [(&str, &str, &str, i32, &str, Category); 15] = [
        ("ID0001", "Yargıcı", "", 0, "", Category::Shop),
        ("ID0002", "Mudo Store", "", 0, "", Category::Shop),
        ("ID0003", "Akbank", "", 0, "", Category::Bank),
        ("ID0004", "Garanti BBVA", "", 0, "", Category::Bank),
        ("ID0005", "Piano", "", 0, "", Category::Shop),
        ("ID0006", "Oysho", "", 0, "", Category::Shop),
        ("ID0007", "Galata Muhallebicisi", "", 0, "", Category::Food),
        ("ID0008", "Apartman", "", 0, "", Category::Building),
        (
            "ID0009",
            "Starbucks",
            "Near entrance",
            1,
            "Coffee shop",
            Category::Food,
        ),
        ("ID0010", "LC Waikiki", "", 1, "", Category::Shop),
        ("ID0011", "İş Bankası ATM", "", 0, "", Category::Bank),
        (
            "ID0012",
            "Burger King",
            "Food court",
            2,
            "Fast food restaurant",
            Category::Food,
        ),
        ("ID0013", "Zara", "", 1, "", Category::Shop),
        ("ID0014", "H&M", "", 1, "", Category::Shop),
        ("ID0015", "Mango", "", 1, "", Category::Shop),
    ];

    entries
        .into_iter()
        .map(
            |(id, title, location, floor, description, category)| Location {
                id: id.to_owned(),
                title: title.to_owned(),
                subtitle: String::new(),
                location: location.to_owned(),
                floor,
                phone: String::new(),
                description: description.to_owned(),
                category,
                coordinates: None,
                bounds: None,
            },
        )
        .collect()
}
