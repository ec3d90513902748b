// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::Equivalent;
use kurbo::{Point, Rect, Vec2};

use easel_redraw::{LayerSet, RedrawScheduler};
use easel_tracker::{ContentTracker, HitTestMode, Trackable};

use crate::config::{EngineConfig, Padding};
use crate::mapper::{self, MappedPoint, SurfaceMetrics, Viewport, usable_viewport};
use crate::state::{Snapshot, StateError, TransformState};

/// Token returned by [`TransformEngine::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Point-in-time summary of an engine, for overlays and logs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineDebugInfo {
    /// Current scale.
    pub scale: f64,
    /// Current offset, in surface pixels.
    pub offset: Point,
    /// State revision counter.
    pub revision: u64,
    /// Number of tracked shapes.
    pub tracked_shapes: usize,
    /// Bounding box of the tracked shapes.
    pub content_bounds: Option<Rect>,
    /// Number of registered listeners.
    pub listeners: usize,
    /// Layers waiting for the next frame.
    pub pending_redraw: LayerSet,
    /// Active scale limits.
    pub scale_limits: (f64, f64),
}

/// Stateful pan/zoom engine for one drawing surface.
///
/// `TransformEngine` owns a [`TransformState`], a [`ContentTracker`] and a
/// [`RedrawScheduler`]. Every mutating call runs as one step: the new state is
/// computed and validated, stored, subscribers are notified and a redraw is
/// requested. Calls that would not change anything return `false` and have no
/// side effects.
///
/// Operations that depend on the surface geometry take a [`SurfaceMetrics`]
/// and are no-ops (returning `false` or `None`) when it has no usable
/// [`Viewport`].
///
/// # Type Parameters
///
/// - `K`: Key type for tracked shapes, `String` by default.
pub struct TransformEngine<K = String> {
    config: EngineConfig,
    state: TransformState,
    tracker: ContentTracker<K>,
    redraw: RedrawScheduler,
    listeners: Vec<(ListenerId, Box<dyn FnMut()>)>,
    next_listener: u64,
    revision: u64,
}

impl<K> fmt::Debug for TransformEngine<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformEngine")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("tracker", &self.tracker)
            .field("redraw", &self.redraw)
            .field("listeners", &self.listeners.len())
            .field("revision", &self.revision)
            .finish()
    }
}

impl<K> Default for TransformEngine<K> {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl<K> TransformEngine<K> {
    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with a custom configuration.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config: config.normalized(),
            state: TransformState::IDENTITY,
            tracker: ContentTracker::default(),
            redraw: RedrawScheduler::new(),
            listeners: Vec::new(),
            next_listener: 0,
            revision: 0,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Sets the scale limits and clamps the current scale into them.
    ///
    /// The offset is left unchanged. Returns `true` if the scale moved.
    pub fn set_scale_limits(&mut self, min_scale: f64, max_scale: f64) -> bool {
        self.config = self.config.with_scale_limits(min_scale, max_scale);
        let scale = self.config.clamp_scale(self.state.scale());
        self.apply(scale, self.state.offset(), LayerSet::MAIN)
    }

    /// Current transform state.
    #[must_use]
    pub fn state(&self) -> TransformState {
        self.state
    }

    /// Current scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.state.scale()
    }

    /// Current offset, in surface pixels.
    #[must_use]
    pub fn offset(&self) -> Point {
        self.state.offset()
    }

    /// Captures the current state.
    ///
    /// Two calls without an intervening mutation compare equal.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Counter bumped every time the transform state changes.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces the state with `snapshot`.
    ///
    /// Invalid snapshots are rejected without touching the engine. Loading a
    /// snapshot equal to the current state is a no-op and returns `Ok(false)`.
    pub fn load_snapshot(&mut self, snapshot: Snapshot) -> Result<bool, StateError> {
        let next = snapshot.validate()?;
        Ok(self.commit(next, LayerSet::MAIN))
    }

    /// Changes the scale by `delta`, keeping `anchor` visually fixed.
    ///
    /// `anchor` is in device (pointer) units and defaults to the centre of the
    /// viewport. The new scale is clamped to the configured limits.
    pub fn change_scale(
        &mut self,
        delta: f64,
        surface: impl SurfaceMetrics,
        anchor: Option<Point>,
    ) -> bool {
        if !delta.is_finite() {
            tracing::warn!(delta, "ignoring non-finite scale delta");
            return false;
        }
        let Some(vp) = usable_viewport(&surface) else {
            return false;
        };
        let old = self.state.scale();
        let new = self.config.clamp_scale(old + delta);
        if new == old {
            return false;
        }
        let dpr = vp.device_pixel_ratio;
        let a = anchor.map_or(vp.surface_center(), |p| Point::new(p.x * dpr, p.y * dpr));
        let ratio = new / old;
        let off = self.state.offset();
        let offset = Point::new(a.x - (a.x - off.x) * ratio, a.y - (a.y - off.y) * ratio);
        self.apply(new, offset, LayerSet::MAIN)
    }

    /// Pans by `delta` surface pixels.
    ///
    /// A positive delta moves the content towards +x/+y on screen, so passing
    /// the pointer movement (times the pixel ratio) makes the content follow
    /// the pointer.
    pub fn change_offset(&mut self, delta: Vec2) -> bool {
        if !(delta.x.is_finite() && delta.y.is_finite()) {
            tracing::warn!(?delta, "ignoring non-finite offset delta");
            return false;
        }
        let offset = self.state.offset() + delta;
        self.apply(self.state.scale(), offset, LayerSet::MAIN)
    }

    /// Moves the view so that content point `target` lands on the viewport
    /// centre.
    ///
    /// Without a target, the point `(width / 2, height / 2)` of the viewport
    /// size is used.
    pub fn recenter(&mut self, surface: impl SurfaceMetrics, target: Option<Point>) -> bool {
        let Some(vp) = usable_viewport(&surface) else {
            return false;
        };
        let target = target.unwrap_or_else(|| vp.device_center());
        self.center_on(&vp, self.state.scale(), target)
    }

    /// Registers a callback invoked after every state change.
    pub fn subscribe(&mut self, listener: impl FnMut() + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener.
    ///
    /// Returns `false` if `id` was already removed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        match self.listeners.iter().position(|(lid, _)| *lid == id) {
            Some(index) => {
                self.listeners.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Read access to the redraw scheduler.
    #[must_use]
    pub fn redraw(&self) -> &RedrawScheduler {
        &self.redraw
    }

    /// Mutable access to the redraw scheduler, to wire painters and the host
    /// frame requester, and to run frames.
    pub fn redraw_mut(&mut self) -> &mut RedrawScheduler {
        &mut self.redraw
    }

    /// Requests a repaint of `layers` without changing any state.
    pub fn request_redraw(&mut self, layers: impl Into<LayerSet>) -> bool {
        self.redraw.request(layers)
    }

    /// Maps a device position into content space using the current state.
    ///
    /// Returns `None` without a usable viewport.
    #[must_use]
    pub fn to_content_space(
        &self,
        device: Point,
        surface: impl SurfaceMetrics,
        mode: impl Into<HitTestMode>,
    ) -> Option<MappedPoint> {
        let vp = usable_viewport(&surface)?;
        Some(mapper::to_content_space(
            device,
            &self.state,
            vp.device_pixel_ratio,
            mode,
        ))
    }

    /// Content-space region currently visible on the surface.
    #[must_use]
    pub fn visible_content_rect(&self, surface: impl SurfaceMetrics) -> Option<Rect> {
        let vp = usable_viewport(&surface)?;
        Some(mapper::visible_content_rect(&self.state, &vp))
    }

    /// Returns `true` if content point `pt` is on screen, edges included.
    #[must_use]
    pub fn is_in_view(&self, pt: Point, surface: impl SurfaceMetrics) -> bool {
        self.visible_content_rect(surface)
            .is_some_and(|r| pt.x >= r.x0 && pt.x <= r.x1 && pt.y >= r.y0 && pt.y <= r.y1)
    }

    fn center_on(&mut self, vp: &Viewport, scale: f64, target: Point) -> bool {
        let c = vp.surface_center();
        let offset = Point::new(c.x - target.x * scale, c.y - target.y * scale);
        self.apply(scale, offset, LayerSet::MAIN)
    }

    fn apply(&mut self, scale: f64, offset: Point, layers: LayerSet) -> bool {
        match TransformState::new(scale, offset) {
            Ok(next) => self.commit(next, layers),
            Err(err) => {
                tracing::warn!(%err, "rejecting transform update");
                false
            }
        }
    }

    fn commit(&mut self, next: TransformState, layers: LayerSet) -> bool {
        if next == self.state {
            return false;
        }
        self.state = next;
        self.revision = self.revision.wrapping_add(1);
        tracing::debug!(
            scale = next.scale(),
            offset = ?next.offset(),
            revision = self.revision,
            "transform changed"
        );
        self.notify();
        self.redraw.request(layers);
        true
    }

    fn notify(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener();
        }
    }
}

impl<K> TransformEngine<K>
where
    K: Eq + Hash,
{
    /// Read access to the shape tracker.
    #[must_use]
    pub fn tracker(&self) -> &ContentTracker<K> {
        &self.tracker
    }

    /// Centres the view on the tracked content, optionally scaling it to fit.
    ///
    /// With `scale_to_fit`, the scale becomes the largest one at which the
    /// content bounds plus `padding` on each side fit the surface, clamped to
    /// the configured limits. Without tracked content this behaves like
    /// [`recenter`](Self::recenter) with no target.
    pub fn recenter_on_content(
        &mut self,
        surface: impl SurfaceMetrics,
        scale_to_fit: bool,
        padding: impl Into<Padding>,
    ) -> bool {
        let Some(vp) = usable_viewport(&surface) else {
            return false;
        };
        let Some(bounds) = self.tracker.content_bounds() else {
            return self.recenter(vp, None);
        };
        let mut scale = self.state.scale();
        if scale_to_fit {
            let padding = padding.into().normalized();
            let size = vp.surface_size();
            let fit = (size.width / (bounds.width() + 2.0 * padding.horizontal))
                .min(size.height / (bounds.height() + 2.0 * padding.vertical));
            if fit.is_nan() {
                tracing::warn!(?bounds, "cannot fit content; keeping scale");
            } else {
                scale = self.config.clamp_scale(fit);
            }
        }
        self.center_on(&vp, scale, bounds.center())
    }

    /// [`recenter_on_content`](Self::recenter_on_content) with scale-to-fit
    /// and the configured default padding.
    pub fn fit_content(&mut self, surface: impl SurfaceMetrics) -> bool {
        self.recenter_on_content(surface, true, self.config.default_padding)
    }

    /// Tracks `key` at a point. See [`ContentTracker::track_shape`].
    pub fn track_shape(&mut self, key: impl Into<K>, point: Point) -> bool {
        let changed = self.tracker.track_shape(key, point);
        self.bounds_moved(changed)
    }

    /// Tracks `key` as a region. See [`ContentTracker::track_shape_content`].
    pub fn track_shape_content(
        &mut self,
        key: impl Into<K>,
        top_left: Point,
        bottom_right: Point,
    ) -> bool {
        let changed = self.tracker.track_shape_content(key, top_left, bottom_right);
        self.bounds_moved(changed)
    }

    /// Tracks a [`Trackable`] shape under its own key.
    pub fn track<S>(&mut self, shape: &S) -> bool
    where
        S: Trackable<Key = K> + ?Sized,
    {
        let changed = self.tracker.track(shape);
        self.bounds_moved(changed)
    }

    /// Stops tracking `key` and notifies subscribers.
    ///
    /// Returns `false` if the key was not tracked.
    pub fn untrack_shape<Q>(&mut self, key: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        let before = self.tracker.revision();
        if self.tracker.untrack_shape(key).is_none() {
            return false;
        }
        self.bounds_moved(self.tracker.revision() != before);
        self.notify();
        true
    }

    /// Stops tracking every shape and notifies subscribers.
    pub fn clear_tracked_shapes(&mut self) {
        if self.tracker.is_empty() {
            return;
        }
        self.tracker.clear_tracked_shapes();
        self.bounds_moved(true);
        self.notify();
    }

    /// Returns `true` once at least one shape is tracked.
    #[must_use]
    pub fn tracking_enabled(&self) -> bool {
        self.tracker.tracking_enabled()
    }

    /// Bounding box of all tracked shapes.
    #[must_use]
    pub fn content_bounds(&self) -> Option<Rect> {
        self.tracker.content_bounds()
    }

    /// Centre of [`content_bounds`](Self::content_bounds).
    #[must_use]
    pub fn content_center(&self) -> Option<Point> {
        self.tracker.content_center()
    }

    /// Returns the engine to its initial state.
    ///
    /// Scale and offset go back to identity, tracked shapes and listeners are
    /// dropped and pending redraws are cancelled. Nobody is notified since
    /// every listener is gone. Configuration, painters and the frame
    /// requester are kept.
    pub fn reset(&mut self) {
        self.tracker.clear_tracked_shapes();
        self.listeners.clear();
        self.redraw.cancel();
        if self.state != TransformState::IDENTITY {
            self.state = TransformState::IDENTITY;
            self.revision = self.revision.wrapping_add(1);
        }
        tracing::debug!(revision = self.revision, "engine reset");
    }

    /// Summarizes the engine state.
    #[must_use]
    pub fn debug_info(&self) -> EngineDebugInfo {
        EngineDebugInfo {
            scale: self.state.scale(),
            offset: self.state.offset(),
            revision: self.revision,
            tracked_shapes: self.tracker.len(),
            content_bounds: self.tracker.content_bounds(),
            listeners: self.listeners.len(),
            pending_redraw: self.redraw.pending(),
            scale_limits: (self.config.min_scale, self.config.max_scale),
        }
    }

    fn bounds_moved(&mut self, changed: bool) -> bool {
        if changed {
            tracing::trace!(bounds = ?self.tracker.content_bounds(), "content bounds moved");
            self.redraw.request(LayerSet::INTERNAL);
        }
        changed
    }
}
