// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-to-pan on top of [`TransformEngine::change_offset`].

use kurbo::Point;

use easel_view::{SurfaceMetrics, TransformEngine};

use crate::buttons::{PointerButton, PointerButtons};
use crate::drag::DragState;

/// Pans a [`TransformEngine`] while a pointer button is dragged.
///
/// Positions are device (pointer) units. Each move is converted to surface
/// pixels with the viewport's device pixel ratio and applied through
/// [`TransformEngine::change_offset`], so the content follows the pointer.
///
/// By default the primary and auxiliary buttons pan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanGesture {
    triggers: PointerButtons,
    button: Option<PointerButton>,
    drag: DragState,
}

impl Default for PanGesture {
    fn default() -> Self {
        Self::new(PointerButtons::PRIMARY | PointerButtons::AUXILIARY)
    }
}

impl PanGesture {
    /// Creates a gesture that starts on any of `triggers`.
    #[must_use]
    pub fn new(triggers: PointerButtons) -> Self {
        Self {
            triggers,
            button: None,
            drag: DragState::default(),
        }
    }

    /// Buttons that start a pan.
    #[must_use]
    pub fn triggers(&self) -> PointerButtons {
        self.triggers
    }

    /// Returns `true` while panning.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Button that started the current pan.
    #[must_use]
    pub fn button(&self) -> Option<PointerButton> {
        self.button
    }

    /// Underlying drag state.
    #[must_use]
    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    /// Handles a button press at `pos`.
    ///
    /// Starts panning and returns `true` if `button` is a trigger and no pan
    /// is already running.
    pub fn pointer_down(&mut self, pos: Point, button: PointerButton) -> bool {
        if self.is_active() || !self.triggers.is_down(button) {
            return false;
        }
        tracing::trace!(?pos, ?button, "pan started");
        self.button = Some(button);
        self.drag.start(pos);
        true
    }

    /// Handles a move to `pos` while `held` buttons are down.
    ///
    /// Pans `engine` by the step since the previous position and returns
    /// `true` if its offset changed. If the button that started the pan is
    /// no longer held, the release was missed and the pan ends instead.
    pub fn pointer_move<K>(
        &mut self,
        pos: Point,
        held: PointerButtons,
        engine: &mut TransformEngine<K>,
        surface: impl SurfaceMetrics,
    ) -> bool {
        let Some(button) = self.button else {
            return false;
        };
        if !held.is_down(button) {
            tracing::debug!(?button, "pan button released without an up event");
            self.cancel();
            return false;
        }
        // Without a usable viewport the step is kept for the next move.
        let Some(vp) = surface.viewport().filter(|vp| vp.is_usable()) else {
            return false;
        };
        let Some(step) = self.drag.update(pos) else {
            return false;
        };
        engine.change_offset(step * vp.device_pixel_ratio)
    }

    /// Handles a button release. Returns `true` if it ended the pan.
    pub fn pointer_up(&mut self, button: PointerButton) -> bool {
        if self.button != Some(button) {
            return false;
        }
        tracing::trace!(total = ?self.drag.total_offset(), "pan ended");
        self.cancel();
        true
    }

    /// Abandons the current pan without further offset changes.
    pub fn cancel(&mut self) {
        self.button = None;
        self.drag.end();
    }
}
