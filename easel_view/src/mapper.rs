// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversion between device, surface and content coordinates.

use kurbo::{Point, Rect, Size};

use easel_tracker::{HitTestMode, Trackable};

use crate::state::TransformState;

/// Metrics of the drawing surface the engine is positioned against.
///
/// `size` is in device-independent (pointer) units. The backing store is
/// `size × device_pixel_ratio` surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Visible size in device-independent units.
    pub size: Size,
    /// Surface pixels per device unit.
    pub device_pixel_ratio: f64,
}

impl Viewport {
    /// Creates a viewport from its device-unit size and pixel ratio.
    #[must_use]
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            size: Size::new(width, height),
            device_pixel_ratio,
        }
    }

    /// Returns `true` if the size and ratio are finite and strictly positive.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        positive(self.size.width)
            && positive(self.size.height)
            && positive(self.device_pixel_ratio)
    }

    /// Backing-store size in surface pixels.
    #[must_use]
    pub fn surface_size(&self) -> Size {
        self.size * self.device_pixel_ratio
    }

    /// Geometric centre of the surface, in surface pixels.
    #[must_use]
    pub fn surface_center(&self) -> Point {
        let s = self.surface_size();
        Point::new(s.width * 0.5, s.height * 0.5)
    }

    /// Geometric centre of the viewport, in device units.
    #[must_use]
    pub fn device_center(&self) -> Point {
        Point::new(self.size.width * 0.5, self.size.height * 0.5)
    }
}

/// Source of [`Viewport`] metrics.
///
/// Hosts typically implement this on their canvas or window handle. `None`
/// means the rendering context is not available yet, in which case every
/// viewport-dependent engine operation is a no-op.
pub trait SurfaceMetrics {
    /// Current viewport, if the rendering context is available.
    fn viewport(&self) -> Option<Viewport>;
}

impl SurfaceMetrics for Viewport {
    fn viewport(&self) -> Option<Viewport> {
        Some(*self)
    }
}

impl SurfaceMetrics for Option<Viewport> {
    fn viewport(&self) -> Option<Viewport> {
        *self
    }
}

impl<T: SurfaceMetrics + ?Sized> SurfaceMetrics for &T {
    fn viewport(&self) -> Option<Viewport> {
        (**self).viewport()
    }
}

impl<T: SurfaceMetrics + ?Sized> SurfaceMetrics for Option<&T> {
    fn viewport(&self) -> Option<Viewport> {
        self.and_then(T::viewport)
    }
}

/// Resolves `surface` to a viewport that the transform math can use.
pub(crate) fn usable_viewport(surface: &impl SurfaceMetrics) -> Option<Viewport> {
    match surface.viewport() {
        Some(vp) if vp.is_usable() => Some(vp),
        Some(vp) => {
            tracing::warn!(?vp, "ignoring unusable viewport");
            None
        }
        None => {
            tracing::trace!("no rendering context; skipping");
            None
        }
    }
}

/// A content-space point together with the hit-test mode it was mapped for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MappedPoint {
    /// Position in content coordinates.
    pub point: Point,
    /// Geometry the point should be tested against.
    pub mode: HitTestMode,
}

impl MappedPoint {
    /// Returns the topmost shape under this point, see [`easel_tracker::pick`].
    #[must_use]
    pub fn pick<'a, S: Trackable>(&self, shapes: &'a [S]) -> Option<&'a S> {
        easel_tracker::pick(shapes, self.point, self.mode)
    }
}

/// Maps a device (pointer) position into content space.
///
/// `content = (device × device_pixel_ratio − offset) / scale`, per axis.
///
/// ```rust
/// use kurbo::Point;
/// use easel_view::{HitTestMode, TransformState, to_content_space};
///
/// let state = TransformState::new(2.0, Point::new(100.0, 50.0)).unwrap();
/// let mapped = to_content_space(Point::new(100.0, 50.0), &state, 2.0, HitTestMode::Stroke);
/// assert_eq!(mapped.point, Point::new(50.0, 25.0));
/// assert_eq!(mapped.mode, HitTestMode::Stroke);
/// ```
#[must_use]
pub fn to_content_space(
    device: Point,
    state: &TransformState,
    device_pixel_ratio: f64,
    mode: impl Into<HitTestMode>,
) -> MappedPoint {
    let surface = Point::new(device.x * device_pixel_ratio, device.y * device_pixel_ratio);
    MappedPoint {
        point: state.surface_to_content(surface),
        mode: mode.into(),
    }
}

/// Maps a content-space point back to a device (pointer) position.
#[must_use]
pub fn to_device_space(content: Point, state: &TransformState, device_pixel_ratio: f64) -> Point {
    let surface = state.content_to_surface(content);
    Point::new(surface.x / device_pixel_ratio, surface.y / device_pixel_ratio)
}

/// Returns the region of content space currently covered by `viewport`.
#[must_use]
pub fn visible_content_rect(state: &TransformState, viewport: &Viewport) -> Rect {
    let size = viewport.surface_size();
    Rect::from_points(
        state.surface_to_content(Point::ZERO),
        state.surface_to_content(Point::new(size.width, size.height)),
    )
}
