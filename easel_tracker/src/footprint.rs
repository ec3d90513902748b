// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};

use crate::pick::{DEFAULT_STROKE_TOLERANCE, HitTestMode};

/// What a tracked shape contributes to the content bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Footprint {
    /// A single representative point, usually the shape's center.
    Point(Point),
    /// An axis-aligned region; both corners count toward the bounds.
    Region(Rect),
}

impl Footprint {
    /// Creates a region footprint from two opposite corners.
    ///
    /// The corners may be given in any order; the region is normalized.
    #[must_use]
    pub fn region(top_left: Point, bottom_right: Point) -> Self {
        Self::Region(Rect::from_points(top_left, bottom_right))
    }

    /// Returns the footprint as a rectangle with positive width and height.
    ///
    /// Point footprints yield a zero-sized rectangle.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        match *self {
            Self::Point(p) => Rect::from_points(p, p),
            Self::Region(r) => r.abs(),
        }
    }

    /// Returns the footprint with a region's corners put in order.
    ///
    /// `Region` can be built directly (or deserialized) with reversed
    /// corners; the tracker stores footprints in this form.
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Self::Region(r) => Self::Region(r.abs()),
            p => p,
        }
    }

    /// Returns `true` if every coordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        let r = self.bounds();
        r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite()
    }

    /// Coarse containment test used when a shape has no finer geometry.
    ///
    /// [`HitTestMode::Fill`] tests the exact footprint (edges included);
    /// [`HitTestMode::Stroke`] widens it by [`DEFAULT_STROKE_TOLERANCE`].
    #[must_use]
    pub fn contains(&self, pt: Point, mode: HitTestMode) -> bool {
        let margin = match mode {
            HitTestMode::Fill => 0.0,
            HitTestMode::Stroke => DEFAULT_STROKE_TOLERANCE,
        };
        let r = self.bounds().inflate(margin, margin);
        pt.x >= r.x0 && pt.x <= r.x1 && pt.y >= r.y0 && pt.y <= r.y1
    }
}

impl From<Point> for Footprint {
    fn from(p: Point) -> Self {
        Self::Point(p)
    }
}

impl From<Rect> for Footprint {
    fn from(r: Rect) -> Self {
        Self::Region(r.abs())
    }
}
