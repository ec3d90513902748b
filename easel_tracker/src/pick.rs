// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape capability contract and topmost-shape picking.

use kurbo::Point;

use crate::footprint::Footprint;

/// Extra margin, in content units, applied by [`HitTestMode::Stroke`] when a
/// shape falls back to [`Footprint::contains`].
pub const DEFAULT_STROKE_TOLERANCE: f64 = 4.0;

/// Which geometry a content-space point is meant to be tested against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HitTestMode {
    /// Exact fill geometry.
    #[default]
    Fill,
    /// Stroked outlines; callers widen their effective hit margins.
    Stroke,
}

impl From<bool> for HitTestMode {
    /// `true` selects [`HitTestMode::Stroke`].
    fn from(stroke: bool) -> Self {
        if stroke { Self::Stroke } else { Self::Fill }
    }
}

/// What any shape must supply to take part in tracking and picking.
///
/// Concrete shape types (rectangles, paths, images, ...) implement this
/// directly; the tracker itself only ever sees the key and [`Footprint`].
pub trait Trackable {
    /// Key type used by the [`ContentTracker`](crate::ContentTracker).
    type Key;

    /// Stable key identifying the shape in a [`ContentTracker`](crate::ContentTracker).
    fn tracking_key(&self) -> Self::Key;

    /// Point or region contributing to the content bounds.
    fn footprint(&self) -> Footprint;

    /// Returns `true` if `pt` (in content space) hits the shape.
    ///
    /// The default tests the footprint, see [`Footprint::contains`].
    fn hit_test(&self, pt: Point, mode: HitTestMode) -> bool {
        self.footprint().contains(pt, mode)
    }
}

/// Returns the topmost shape hit by `pt`.
///
/// `shapes` is in paint order, so later entries are on top.
pub fn pick<S: Trackable>(shapes: &[S], pt: Point, mode: HitTestMode) -> Option<&S> {
    shapes.iter().rev().find(|s| s.hit_test(pt, mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    struct Tile {
        id: u32,
        rect: Rect,
    }

    impl Trackable for Tile {
        type Key = u32;

        fn tracking_key(&self) -> u32 {
            self.id
        }

        fn footprint(&self) -> Footprint {
            Footprint::Region(self.rect)
        }
    }

    struct Dot {
        center: Point,
        radius: f64,
    }

    impl Trackable for Dot {
        type Key = &'static str;

        fn tracking_key(&self) -> &'static str {
            "dot"
        }

        fn footprint(&self) -> Footprint {
            Footprint::Point(self.center)
        }

        fn hit_test(&self, pt: Point, _mode: HitTestMode) -> bool {
            (pt - self.center).hypot2() <= self.radius * self.radius
        }
    }

    #[test]
    fn pick_prefers_later_shapes() {
        let tiles = [
            Tile {
                id: 1,
                rect: Rect::new(0.0, 0.0, 100.0, 100.0),
            },
            Tile {
                id: 2,
                rect: Rect::new(50.0, 50.0, 150.0, 150.0),
            },
        ];

        let hit = pick(&tiles, Point::new(75.0, 75.0), HitTestMode::Fill);
        assert_eq!(hit.map(Tile::tracking_key), Some(2));

        let hit = pick(&tiles, Point::new(10.0, 10.0), HitTestMode::Fill);
        assert_eq!(hit.map(Tile::tracking_key), Some(1));

        assert!(pick(&tiles, Point::new(500.0, 0.0), HitTestMode::Fill).is_none());
    }

    #[test]
    fn custom_geometry_overrides_footprint() {
        let dots = [Dot {
            center: Point::new(0.0, 0.0),
            radius: 5.0,
        }];
        assert!(pick(&dots, Point::new(3.0, 3.0), HitTestMode::Fill).is_some());
        assert!(pick(&dots, Point::new(4.0, 4.0), HitTestMode::Fill).is_none());
    }

    #[test]
    fn bool_flag_selects_mode() {
        assert_eq!(HitTestMode::from(true), HitTestMode::Stroke);
        assert_eq!(HitTestMode::from(false), HitTestMode::Fill);
    }
}
