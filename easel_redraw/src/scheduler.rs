// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-coalescing redraw scheduler.

use alloc::boxed::Box;
use core::fmt;

use crate::layer::{Layer, LayerSet};

type Callback = Box<dyn FnMut()>;

/// Coalesces redraw requests into at most one paint per layer per frame.
///
/// ## Usage
///
/// 1) Register a frame requester with [`set_frame_requester`](Self::set_frame_requester).
///    It is the host hook that schedules an animation frame (for example
///    `requestAnimationFrame` or `Window::request_redraw`).
/// 2) Register a painter per [`Layer`] with [`set_painter`](Self::set_painter).
/// 3) Call [`request`](Self::request) whenever state changes.
/// 4) From the host's frame callback, call [`run_frame`](Self::run_frame).
///
/// The frame requester fires only when the pending set goes from empty to
/// non-empty; further requests before the frame runs are folded into the
/// pending set. The in-flight guard is cleared by `run_frame` and nowhere
/// else (apart from [`cancel`](Self::cancel)).
pub struct RedrawScheduler {
    pending: LayerSet,
    in_flight: bool,
    painters: [Option<Callback>; 3],
    frame_requester: Option<Callback>,
    frames_requested: u64,
}

impl Default for RedrawScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RedrawScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedrawScheduler")
            .field("pending", &self.pending)
            .field("in_flight", &self.in_flight)
            .field("frames_requested", &self.frames_requested)
            .finish_non_exhaustive()
    }
}

impl RedrawScheduler {
    /// Creates a scheduler with no painters and no frame requester.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: LayerSet::empty(),
            in_flight: false,
            painters: [None, None, None],
            frame_requester: None,
            frames_requested: 0,
        }
    }

    /// Sets the host hook used to schedule an animation frame.
    pub fn set_frame_requester(&mut self, requester: impl FnMut() + 'static) {
        self.frame_requester = Some(Box::new(requester));
    }

    /// Removes the frame requester.
    ///
    /// Requests still accumulate; the host is then expected to poll
    /// [`frame_in_flight`](Self::frame_in_flight).
    pub fn clear_frame_requester(&mut self) {
        self.frame_requester = None;
    }

    /// Sets the painter for `layer`, replacing any previous one.
    pub fn set_painter(&mut self, layer: Layer, painter: impl FnMut() + 'static) {
        self.painters[layer.index()] = Some(Box::new(painter));
    }

    /// Removes the painter for `layer`.
    pub fn clear_painter(&mut self, layer: Layer) {
        self.painters[layer.index()] = None;
    }

    /// Marks `layers` (plus implied layers) as needing a repaint.
    ///
    /// Returns `true` if this call scheduled a new frame, `false` if the
    /// request was coalesced into an already scheduled one (or was empty).
    pub fn request(&mut self, layers: impl Into<LayerSet>) -> bool {
        let layers = layers.into().expand();
        let added = layers.difference(self.pending);
        if added.is_empty() {
            tracing::trace!(?layers, "redraw request coalesced");
            return false;
        }
        self.pending |= added;
        if self.in_flight {
            tracing::trace!(?added, "redraw layers joined in-flight frame");
            return false;
        }
        self.in_flight = true;
        self.frames_requested = self.frames_requested.wrapping_add(1);
        tracing::trace!(pending = ?self.pending, "requesting animation frame");
        if let Some(requester) = self.frame_requester.as_mut() {
            requester();
        }
        true
    }

    /// Runs one frame: clears the in-flight guard and paints pending layers.
    ///
    /// Painters run in [`Layer::PAINT_ORDER`]. Layers without a painter are
    /// dropped from the pending set without effect. Returns the set of
    /// layers that were pending when the frame started.
    pub fn run_frame(&mut self) -> LayerSet {
        let due = core::mem::take(&mut self.pending);
        self.in_flight = false;
        for layer in due.layers() {
            match self.painters[layer.index()].as_mut() {
                Some(paint) => paint(),
                None => tracing::trace!(?layer, "no painter registered; skipping"),
            }
        }
        due
    }

    /// Drops all pending requests and clears the in-flight guard.
    ///
    /// A host frame that was already scheduled will then find nothing to
    /// paint.
    pub fn cancel(&mut self) {
        self.pending = LayerSet::empty();
        self.in_flight = false;
    }

    /// Returns the layers awaiting the next frame.
    #[must_use]
    pub fn pending(&self) -> LayerSet {
        self.pending
    }

    /// Returns `true` if `layer` awaits the next frame.
    #[must_use]
    pub fn is_pending(&self, layer: Layer) -> bool {
        self.pending.has(layer)
    }

    /// Returns `true` while a frame has been requested but not yet run.
    #[must_use]
    pub fn frame_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Returns how many frames have been requested from the host so far.
    #[must_use]
    pub fn frames_requested(&self) -> u64 {
        self.frames_requested
    }
}
