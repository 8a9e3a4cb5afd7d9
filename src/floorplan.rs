// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0

//! Floor-plan SVG parsing: the `0.svg` asset doubles as a data source.
//!
//! The document encodes POIs structurally: a `g#Rooms` container holds one
//! group per category (`Shop`, `Food`, ...), and each room is a child
//! element whose id carries the POI identity (`ID0042`). This module walks
//! that structure with `roxmltree`, extracts per-room geometry via
//! [`crate::geometry`], and collects category fill colors for the marker
//! styling layer.
//!
//! Rooms whose geometry cannot be computed are skipped with a warning;
//! only a missing/invalid document or `viewBox` is an error.

use std::collections::HashMap;

use roxmltree::{Document, Node};
use thiserror::Error;

use crate::geometry::{ElementGeometry, GroupTransform};
use crate::model::Category;

/// Failures that prevent using the floor plan at all.
#[derive(Debug, Error)]
pub enum FloorPlanError {
    #[error("invalid SVG document: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("missing viewBox and width/height on <svg> element")]
    MissingViewBox,
    #[error("expected 4 numbers in viewBox, got '{0}'")]
    InvalidViewBox(String),
    #[error("no g[id=\"Rooms\"] group in document")]
    MissingRoomsGroup,
}

/// The SVG source coordinate system: visible region plus offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Parse a `viewBox` attribute; separators may be commas or whitespace.
    pub fn parse(raw: &str) -> Result<Self, FloorPlanError> {
        let normalized = raw.replace(',', " ");
        let parts: Vec<f64> = normalized
            .split_whitespace()
            .filter_map(|p| p.parse().ok())
            .collect();

        match parts[..] {
            [min_x, min_y, width, height] => Ok(Self {
                min_x,
                min_y,
                width,
                height,
            }),
            _ => Err(FloorPlanError::InvalidViewBox(raw.to_owned())),
        }
    }
}

/// One room/POI extracted from the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Identity; `ID...` ids link to sheet rows, others are synthesized
    pub id: String,
    /// Label from the `<title>` child or naming attributes
    pub title: String,
    pub category: Category,
    /// Id of the category container the room sits in
    pub group_id: String,
    pub geometry: ElementGeometry,
}

/// Parsed floor plan: coordinate system, rooms, and category colors.
#[derive(Debug, Clone)]
pub struct FloorPlan {
    pub view_box: ViewBox,
    pub features: Vec<Feature>,
    /// Fill colors sampled from the category containers
    pub category_colors: HashMap<Category, String>,
}

impl FloorPlan {
    /// Parse an SVG document into a floor plan.
    pub fn parse(svg_text: &str) -> Result<Self, FloorPlanError> {
        let doc = Document::parse(svg_text)?;
        let root = doc.root_element();

        let view_box = match root.attribute("viewBox") {
            Some(raw) => ViewBox::parse(raw)?,
            None => view_box_from_size(&root)?,
        };

        let rooms = doc
            .descendants()
            .find(|n| n.has_tag_name("g") && n.attribute("id") == Some("Rooms"))
            .ok_or(FloorPlanError::MissingRoomsGroup)?;

        let mut features = Vec::new();
        let mut category_colors = HashMap::new();

        for group in rooms.children().filter(|n| n.has_tag_name("g")) {
            let Some(group_id) = group.attribute("id") else {
                continue;
            };
            let category = Category::from_group_id(group_id);

            if let Some(color) = group_fill_color(&group) {
                category_colors.entry(category).or_insert(color);
            }

            for (index, element) in group
                .children()
                .filter(|n| n.is_element() && is_room_tag(n))
                .enumerate()
            {
                match extract_feature(&element, group_id, category, index) {
                    Some(feature) => features.push(feature),
                    None => {
                        tracing::warn!(
                            "No geometry for element {} in group {}",
                            element.attribute("id").unwrap_or("<unnamed>"),
                            group_id
                        );
                    }
                }
            }
        }

        tracing::info!(
            "Floor plan: {} features, {} category colors",
            features.len(),
            category_colors.len()
        );

        Ok(Self {
            view_box,
            features,
            category_colors,
        })
    }

    pub fn feature(&self, id: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }
}

/// Legacy documents without a viewBox fall back to width/height attributes
/// with a zero offset.
fn view_box_from_size(root: &Node<'_, '_>) -> Result<ViewBox, FloorPlanError> {
    let parse_len = |attr: Option<&str>| {
        attr.map(|v| v.trim_end_matches("px"))
            .and_then(|v| v.parse::<f64>().ok())
    };
    match (
        parse_len(root.attribute("width")),
        parse_len(root.attribute("height")),
    ) {
        (Some(width), Some(height)) => Ok(ViewBox {
            min_x: 0.0,
            min_y: 0.0,
            width,
            height,
        }),
        _ => Err(FloorPlanError::MissingViewBox),
    }
}

fn is_room_tag(node: &Node<'_, '_>) -> bool {
    matches!(
        node.tag_name().name(),
        "g" | "path" | "rect" | "polygon" | "circle"
    )
}

/// Representative fill for a category container: the group's own `fill`,
/// else the first descendant with a non-`none` fill.
fn group_fill_color(group: &Node<'_, '_>) -> Option<String> {
    let own = group.attribute("fill").filter(|f| *f != "none");
    if let Some(fill) = own {
        return Some(fill.to_owned());
    }
    group
        .descendants()
        .filter(|n| n.is_element())
        .find_map(|n| {
            n.attribute("fill")
                .filter(|f| *f != "none")
                .map(str::to_owned)
        })
}

fn extract_feature(
    element: &Node<'_, '_>,
    group_id: &str,
    category: Category,
    index: usize,
) -> Option<Feature> {
    // Room groups wrap their shape; use the first shape descendant.
    let target = if element.has_tag_name("g") {
        element.descendants().find(|n| {
            matches!(n.tag_name().name(), "path" | "rect" | "circle" | "polygon")
        })?
    } else {
        *element
    };

    let geometry = element_geometry(&target)?;

    let id = element
        .attribute("id")
        .map(str::to_owned)
        .unwrap_or_else(|| format!("{}_{:04}", group_id, index + 1));

    let title = element
        .children()
        .find(|n| n.has_tag_name("title"))
        .and_then(|n| n.text())
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())
        .or_else(|| element.attribute("data-name").map(str::to_owned))
        .or_else(|| element.attribute("name").map(str::to_owned))
        .unwrap_or_else(|| format!("{}_{}", group_id, index + 1));

    Some(Feature {
        id,
        title,
        category,
        group_id: group_id.to_owned(),
        geometry,
    })
}

/// Geometry for a single shape element, trying path, rect, then circle
/// attributes in turn. Anything else (including `polygon`, which carries
/// its points in a `points` attribute this extractor has never read)
/// yields `None`.
fn element_geometry(node: &Node<'_, '_>) -> Option<ElementGeometry> {
    let transform = cumulative_transform(node);

    if let Some(d) = node.attribute("d") {
        return ElementGeometry::from_path(d, transform);
    }

    let attr = |name: &str| node.attribute(name).and_then(|v| v.parse::<f64>().ok());

    if let (Some(x), Some(y)) = (attr("x"), attr("y")) {
        let width = attr("width").unwrap_or(0.0);
        let height = attr("height").unwrap_or(0.0);
        return Some(ElementGeometry::from_rect(x, y, width, height, transform));
    }

    if let (Some(cx), Some(cy)) = (attr("cx"), attr("cy")) {
        let r = attr("r").unwrap_or(0.0);
        return Some(ElementGeometry::from_circle(cx, cy, r, transform));
    }

    None
}

/// Fold `transform` attributes from the element up to the document root.
fn cumulative_transform(node: &Node<'_, '_>) -> GroupTransform {
    GroupTransform::from_ancestors(
        node.ancestors()
            .filter(|n| n.is_element())
            .filter_map(|n| n.attribute("transform")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Rect};

    const PLAN: &str = r##"
        <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1000 600">
          <g id="Rooms">
            <g id="Shop" fill="#e74c3c">
              <g id="ID0001" transform="translate(100, 50)">
                <title>Yargıcı</title>
                <path d="M 0 0 L 40 0 L 40 20 L 0 20"/>
              </g>
              <rect id="ID0002" x="200" y="100" width="50" height="30"/>
            </g>
            <g id="Food">
              <circle id="ID0003" cx="500" cy="300" r="10" fill="#2ecc71"/>
              <polygon id="ID0004" points="0,0 10,0 10,10"/>
            </g>
          </g>
        </svg>"##;

    #[test]
    fn parses_view_box() {
        let plan = FloorPlan::parse(PLAN).unwrap();
        assert_eq!(
            plan.view_box,
            ViewBox {
                min_x: 0.0,
                min_y: 0.0,
                width: 1000.0,
                height: 600.0
            }
        );
    }

    #[test]
    fn view_box_with_offset_and_commas() {
        let vb = ViewBox::parse("-10, 20, 800, 400").unwrap();
        assert_eq!(vb.min_x, -10.0);
        assert_eq!(vb.min_y, 20.0);
    }

    #[test]
    fn invalid_view_box_is_an_error() {
        assert!(matches!(
            ViewBox::parse("1 2 3"),
            Err(FloorPlanError::InvalidViewBox(_))
        ));
    }

    #[test]
    fn falls_back_to_width_height_without_view_box() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="640" height="480">
            <g id="Rooms"/></svg>"#;
        let plan = FloorPlan::parse(svg).unwrap();
        assert_eq!(plan.view_box.width, 640.0);
        assert_eq!(plan.view_box.min_x, 0.0);
    }

    #[test]
    fn missing_rooms_group_is_an_error() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"/>"#;
        assert!(matches!(
            FloorPlan::parse(svg),
            Err(FloorPlanError::MissingRoomsGroup)
        ));
    }

    #[test]
    fn extracts_features_with_titles_and_categories() {
        let plan = FloorPlan::parse(PLAN).unwrap();

        let shop = plan.feature("ID0001").unwrap();
        assert_eq!(shop.title, "Yargıcı");
        assert_eq!(shop.category, Category::Shop);
        assert_eq!(shop.group_id, "Shop");

        let food = plan.feature("ID0003").unwrap();
        assert_eq!(food.category, Category::Food);
    }

    #[test]
    fn group_wrapped_path_inherits_ancestor_translate() {
        let plan = FloorPlan::parse(PLAN).unwrap();
        let shop = plan.feature("ID0001").unwrap();
        // Path spans (0,0)-(40,20), group translates by (100,50).
        assert_eq!(shop.geometry.bounds, Rect::new(100.0, 50.0, 140.0, 70.0));
        assert_eq!(shop.geometry.center, Point::new(120.0, 60.0));
    }

    #[test]
    fn rect_and_circle_features() {
        let plan = FloorPlan::parse(PLAN).unwrap();
        assert_eq!(
            plan.feature("ID0002").unwrap().geometry.center,
            Point::new(225.0, 115.0)
        );
        assert_eq!(
            plan.feature("ID0003").unwrap().geometry.bounds,
            Rect::new(490.0, 290.0, 510.0, 310.0)
        );
    }

    #[test]
    fn polygons_have_no_readable_geometry_and_are_skipped() {
        let plan = FloorPlan::parse(PLAN).unwrap();
        assert!(plan.feature("ID0004").is_none());
    }

    #[test]
    fn category_colors_come_from_group_or_first_filled_child() {
        let plan = FloorPlan::parse(PLAN).unwrap();
        assert_eq!(plan.category_colors[&Category::Shop], "#e74c3c");
        // Food group has no fill of its own; the circle supplies it.
        assert_eq!(plan.category_colors[&Category::Food], "#2ecc71");
    }
}
