// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0

//! Naive CSV parsing for the Google Sheets export.
//!
//! This is deliberately NOT an RFC 4180 parser: rows split on the sniffed
//! delimiter unconditionally, so a quoted field containing the delimiter
//! breaks apart. Only a single leading and trailing quote per field is
//! stripped. The sheet this feeds has never used embedded delimiters, and
//! downstream ids would shift silently if the rule changed, so the broken
//! behavior is pinned by a regression test rather than fixed.

use std::collections::HashMap;

/// Parse CSV text into header-keyed records.
///
/// The first non-blank line is the header. The delimiter is sniffed from
/// it: comma when present, tab otherwise. Short rows fill missing columns
/// with empty strings; extra trailing values are dropped.
pub fn parse_csv(text: &str) -> Vec<HashMap<String, String>> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return Vec::new();
    };

    let delimiter = if header_line.contains(',') { ',' } else { '\t' };
    tracing::debug!(
        "CSV delimiter detected: {}",
        if delimiter == ',' { "comma" } else { "tab" }
    );

    let headers: Vec<String> = split_fields(header_line, delimiter);

    lines
        .map(|line| {
            let values = split_fields(line, delimiter);
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.clone(), values.get(i).cloned().unwrap_or_default()))
                .collect()
        })
        .collect()
}

/// Split one line, trim each field, and strip one surrounding quote pair.
fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    line.split(delimiter)
        .map(|field| strip_quotes(field.trim()).to_owned())
        .collect()
}

fn strip_quotes(field: &str) -> &str {
    let field = field.strip_prefix('"').unwrap_or(field);
    field.strip_suffix('"').unwrap_or(field)
}
