// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0

//! POI records shared across the data sources and screens.
//!
//! A [`Location`] is the unit of everything the kiosk shows: search
//! results, map markers, the side-panel detail view. Records are merged
//! from up to three sources (floor-plan SVG, Google Sheet, built-in mock
//! data) in [`directory`], keyed by the `ID...` strings embedded in the
//! SVG element ids.

pub mod directory;

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// POI category, mirroring the group containers in the floor-plan SVG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Shop,
    Food,
    Bank,
    Building,
    Other,
}

impl Category {
    /// Map an SVG group id (e.g. `"Shop"`, `"food_court"`) to a category
    /// by case-insensitive substring match. Unrecognized ids are `Other`.
    pub fn from_group_id(group_id: &str) -> Self {
        let id = group_id.to_lowercase();
        if id.contains("shop") {
            Self::Shop
        } else if id.contains("food") {
            Self::Food
        } else if id.contains("bank") {
            Self::Bank
        } else if id.contains("building") {
            Self::Building
        } else {
            Self::Other
        }
    }

    /// Parse a category name as it appears in sheet data. Unknown or empty
    /// values fall back to `Other`.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "shop" => Self::Shop,
            "food" => Self::Food,
            "bank" => Self::Bank,
            "building" => Self::Building,
            _ => Self::Other,
        }
    }

    /// Canonical lowercase name used on the wire and in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shop => "shop",
            Self::Food => "food",
            Self::Bank => "bank",
            Self::Building => "building",
            Self::Other => "other",
        }
    }

    /// All categories, in display order
    pub const ALL: [Self; 5] = [
        Self::Shop,
        Self::Food,
        Self::Bank,
        Self::Building,
        Self::Other,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    /// Free-text placement hint ("Food court", "Near entrance")
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub floor: i32,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    /// Marker position in SVG coordinates, when derived from the floor plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Point>,
    /// Bounding box in SVG coordinates, when derived from the floor plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Rect>,
}

impl Location {
    /// Whether this record should appear in listings. The floor plan also
    /// carries decorative elements whose ids don't start with `ID`.
    pub fn is_listed(&self) -> bool {
        self.id.starts_with("ID")
    }

    /// Concatenated text searched by the free-text filter
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.title, self.subtitle, self.description).to_lowercase()
    }
}

/// Human-readable floor label. Ground floor is "Zemin Kat", everything
/// else is "N. Kat" (including basements: "-1. Kat").
pub fn floor_display_name(floor: i32) -> String {
    if floor == 0 {
        "Zemin Kat".to_owned()
    } else {
        format!("{floor}. Kat")
    }
}

/// Pretty-print Turkish phone numbers.
///
/// `+902122820808-07` becomes `(+90) 212 282 08 08-07`. Numbers that don't
/// match the 12-digit `90...` pattern are returned unchanged.
pub fn format_phone_number(phone: &str) -> String {
    if phone.is_empty() {
        return String::new();
    }

    // Keep digits, '+' and the extension separator only.
    let mut cleaned: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+' || *c == '-')
        .collect();

    let mut extension = String::new();
    if let Some(idx) = cleaned.find('-') {
        extension = cleaned[idx..].to_owned();
        cleaned.truncate(idx);
    }

    let digits = cleaned.strip_prefix('+').unwrap_or(&cleaned);

    if digits.starts_with("90") && digits.len() >= 12 {
        format!(
            "(+{}) {} {} {} {}{}",
            &digits[0..2],
            &digits[2..5],
            &digits[5..8],
            &digits[8..10],
            &digits[10..12],
            extension
        )
    } else {
        phone.to_owned()
    }
}

/// Build the QR image URL for a share link.
///
/// QR rendering is delegated to a public image API; the kiosk only
/// constructs the URL.
pub fn qr_image_url(data: &str, size: u32) -> String {
    format!(
        "https://api.qrserver.com/v1/create-qr-code/?size={size}x{size}&data={}",
        urlencode(data)
    )
}

/// [`qr_image_url`] at the kiosk's standard share-QR size.
pub fn share_qr_url(data: &str) -> String {
    qr_image_url(data, crate::settings::share::QR_IMAGE_SIZE)
}

/// Minimal percent-encoding for URL query values.
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_from_group_id_is_substring_based() {
        assert_eq!(Category::from_group_id("Shop"), Category::Shop);
        assert_eq!(Category::from_group_id("food_court"), Category::Food);
        assert_eq!(Category::from_group_id("BANKS"), Category::Bank);
        assert_eq!(Category::from_group_id("Rooms"), Category::Other);
    }

    #[test]
    fn floor_names() {
        assert_eq!(floor_display_name(0), "Zemin Kat");
        assert_eq!(floor_display_name(2), "2. Kat");
        assert_eq!(floor_display_name(-1), "-1. Kat");
    }

    #[test]
    fn phone_formatting_turkish_number() {
        assert_eq!(
            format_phone_number("+902122820808-07"),
            "(+90) 212 282 08 08-07"
        );
        assert_eq!(format_phone_number("+902122820808"), "(+90) 212 282 08 08");
    }

    #[test]
    fn phone_formatting_passes_through_other_formats() {
        assert_eq!(format_phone_number("555 1234"), "555 1234");
        assert_eq!(format_phone_number(""), "");
    }

    #[test]
    fn listed_ids_start_with_id_prefix() {
        let mut loc = Location {
            id: "ID0001".into(),
            title: "Test".into(),
            subtitle: String::new(),
            location: String::new(),
            floor: 0,
            phone: String::new(),
            description: String::new(),
            category: Category::Shop,
            coordinates: None,
            bounds: None,
        };
        assert!(loc.is_listed());
        loc.id = "Walls_01".into();
        assert!(!loc.is_listed());
    }

    #[test]
    fn qr_url_percent_encodes_payload() {
        let url = qr_image_url("https://zorlu.center/route?from=ID1&to=ID2", 300);
        assert!(url.starts_with("https://api.qrserver.com/v1/create-qr-code/?size=300x300&data="));
        assert!(url.contains("https%3A%2F%2Fzorlu.center%2Froute%3Ffrom%3DID1%26to%3DID2"));
    }

    #[test]
    fn share_qr_uses_the_standard_size() {
        let url = share_qr_url("hello");
        let size = crate::settings::share::QR_IMAGE_SIZE;
        assert!(url.contains(&format!("size={size}x{size}")));
    }

    #[test]
    fn location_round_trips_through_camel_case_json() {
        let loc = Location {
            id: "ID0009".into(),
            title: "Starbucks".into(),
            subtitle: String::new(),
            location: "Near entrance".into(),
            floor: 1,
            phone: String::new(),
            description: "Coffee shop".into(),
            category: Category::Food,
            coordinates: Some(Point::new(1.0, 2.0)),
            bounds: None,
        };
        let json = serde_json::to_string(&loc).unwrap();
        assert!(json.contains("\"category\":\"food\""));
        let back: Location = serde_json::from_str(&json).unwrap();
        assert_eq!(back, loc);
    }
}
