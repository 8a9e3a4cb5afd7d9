// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0

//! Geometry extraction for floor-plan SVG elements.
//!
//! Each room/POI shape in the floor plan is reduced to an
//! [`ElementGeometry`]: an axis-aligned bounding box, its center (used for
//! marker placement), and the raw visited points. Extraction never fails
//! hard — an element whose geometry cannot be computed yields `None` and
//! is skipped by the caller.

mod path_data;
mod transform;

pub use path_data::parse_path_points;
pub use transform::GroupTransform;

use kurbo::{Point, Rect};

/// Extracted geometry for one floor-plan element, in SVG coordinates with
/// ancestor transforms applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementGeometry {
    /// Center of the bounding box; where a marker is placed.
    pub center: Point,
    /// Axis-aligned bounding box over all visited points.
    pub bounds: Rect,
    /// Every transformed destination point that contributed to the bounds.
    pub points: Vec<Point>,
}

impl ElementGeometry {
    /// Build geometry from a path `d` attribute and the element's
    /// accumulated ancestor transform.
    pub fn from_path(d: &str, transform: GroupTransform) -> Option<Self> {
        let raw = parse_path_points(d)?;
        let points: Vec<Point> = raw.into_iter().map(|p| transform.apply(p)).collect();
        Some(Self::from_points(points))
    }

    /// Build geometry from `rect` attributes. Missing width/height count
    /// as zero, collapsing to a point or segment.
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64, transform: GroupTransform) -> Self {
        let x0 = x * transform.scale_x + transform.x;
        let y0 = y * transform.scale_y + transform.y;
        let w = width * transform.scale_x;
        let h = height * transform.scale_y;

        Self {
            center: Point::new(x0 + w / 2.0, y0 + h / 2.0),
            bounds: Rect::new(x0, y0, x0 + w, y0 + h),
            points: vec![Point::new(x0, y0), Point::new(x0 + w, y0 + h)],
        }
    }

    /// Build geometry from `circle` attributes. Under non-uniform scale the
    /// radius takes the larger axis factor, matching the historical rule.
    pub fn from_circle(cx: f64, cy: f64, r: f64, transform: GroupTransform) -> Self {
        let center = transform.apply(Point::new(cx, cy));
        let radius = r * transform.scale_x.max(transform.scale_y);

        Self {
            center,
            bounds: Rect::new(
                center.x - radius,
                center.y - radius,
                center.x + radius,
                center.y + radius,
            ),
            points: vec![center],
        }
    }

    /// Bounding box and center from an already-transformed point list.
    ///
    /// The list must be non-empty; both public constructors guarantee it.
    fn from_points(points: Vec<Point>) -> Self {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for p in &points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        let bounds = Rect::new(min_x, min_y, max_x, max_y);
        Self {
            center: bounds.center(),
            bounds,
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_bounds_equal_min_max_of_visited_points() {
        let geom =
            ElementGeometry::from_path("M 10 10 L 50 10 L 50 30 L 10 30", GroupTransform::IDENTITY)
                .unwrap();
        assert_eq!(geom.bounds, Rect::new(10.0, 10.0, 50.0, 30.0));
        assert_eq!(geom.center, Point::new(30.0, 20.0));
    }

    #[test]
    fn curve_control_points_do_not_widen_bounds() {
        // Control points reach out to (100, 500); only endpoints count.
        let geom =
            ElementGeometry::from_path("M 0 0 C 100 500 100 500 10 0", GroupTransform::IDENTITY)
                .unwrap();
        assert_eq!(geom.bounds, Rect::new(0.0, 0.0, 10.0, 0.0));
    }

    #[test]
    fn rect_center_and_bounds_under_identity() {
        let geom = ElementGeometry::from_rect(5.0, 10.0, 20.0, 30.0, GroupTransform::IDENTITY);
        assert_eq!(geom.center, Point::new(15.0, 25.0));
        assert_eq!(geom.bounds, Rect::new(5.0, 10.0, 25.0, 40.0));
    }

    #[test]
    fn rect_with_missing_size_collapses_to_point() {
        let geom = ElementGeometry::from_rect(7.0, 8.0, 0.0, 0.0, GroupTransform::IDENTITY);
        assert_eq!(geom.center, Point::new(7.0, 8.0));
        assert_eq!(geom.bounds.area(), 0.0);
    }

    #[test]
    fn circle_bounds_span_radius() {
        let geom = ElementGeometry::from_circle(50.0, 60.0, 10.0, GroupTransform::IDENTITY);
        assert_eq!(geom.center, Point::new(50.0, 60.0));
        assert_eq!(geom.bounds, Rect::new(40.0, 50.0, 60.0, 70.0));
    }

    #[test]
    fn circle_radius_uses_larger_scale_axis() {
        let transform = GroupTransform {
            x: 0.0,
            y: 0.0,
            scale_x: 2.0,
            scale_y: 3.0,
        };
        let geom = ElementGeometry::from_circle(0.0, 0.0, 10.0, transform);
        assert_eq!(geom.bounds, Rect::new(-30.0, -30.0, 30.0, 30.0));
    }

    #[test]
    fn ancestor_translate_shifts_geometry() {
        let transform = GroupTransform::from_ancestors(["translate(10, 20)"].into_iter());
        let geom = ElementGeometry::from_path("M 0 0 L 10 10", transform).unwrap();
        assert_eq!(geom.bounds, Rect::new(10.0, 20.0, 20.0, 30.0));
        for (p, raw) in geom.points.iter().zip([(0.0, 0.0), (10.0, 10.0)]) {
            assert_eq!(*p, Point::new(raw.0 + 10.0, raw.1 + 20.0));
        }
    }

    #[test]
    fn scale_then_translate_composition_rule() {
        // Outer scale(2), inner translate(10,20): the flattened rule
        // applies the scale to coordinates first and adds the raw
        // translation, regardless of nesting order.
        let transform =
            GroupTransform::from_ancestors(["translate(10, 20)", "scale(2)"].into_iter());
        let geom = ElementGeometry::from_path("M 1 1 L 3 3", transform).unwrap();
        assert_eq!(geom.bounds, Rect::new(12.0, 22.0, 16.0, 26.0));
    }

    #[test]
    fn unparseable_path_yields_none() {
        assert!(ElementGeometry::from_path("", GroupTransform::IDENTITY).is_none());
        assert!(ElementGeometry::from_path("Z", GroupTransform::IDENTITY).is_none());
    }
}
