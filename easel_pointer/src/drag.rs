// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag tracking over device-space pointer positions.
//!
//! ## Usage
//!
//! 1) Call [`DragState::start`] on pointer down.
//! 2) Feed each move to [`DragState::update`] to get the step since the previous one.
//! 3) Use [`DragState::total_offset`] for the displacement from the origin.
//! 4) Call [`DragState::end`] on pointer up or cancel.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use easel_pointer::DragState;
//!
//! let mut drag = DragState::default();
//! drag.start(Point::new(10.0, 20.0));
//!
//! assert_eq!(drag.update(Point::new(15.0, 25.0)), Some(Vec2::new(5.0, 5.0)));
//! assert_eq!(drag.update(Point::new(12.0, 25.0)), Some(Vec2::new(-3.0, 0.0)));
//! assert_eq!(drag.total_offset(), Some(Vec2::new(2.0, 5.0)));
//!
//! drag.end();
//! assert!(!drag.is_dragging());
//! ```

use kurbo::{Point, Vec2};

/// Origin and latest position of an in-progress drag.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragState {
    active: Option<Span>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Span {
    origin: Point,
    last: Point,
}

impl DragState {
    /// Starts a drag at `pos`, discarding any drag in progress.
    pub fn start(&mut self, pos: Point) {
        self.active = Some(Span {
            origin: pos,
            last: pos,
        });
    }

    /// Records a move and returns the step since the previous position.
    ///
    /// Returns `None` when no drag is active.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        let span = self.active.as_mut()?;
        let delta = pos - span.last;
        span.last = pos;
        Some(delta)
    }

    /// Displacement from the drag origin to the latest position.
    #[must_use]
    pub fn total_offset(&self) -> Option<Vec2> {
        self.active.map(|s| s.last - s.origin)
    }

    /// Where the drag started.
    #[must_use]
    pub fn origin(&self) -> Option<Point> {
        self.active.map(|s| s.origin)
    }

    /// Latest recorded position.
    #[must_use]
    pub fn last(&self) -> Option<Point> {
        self.active.map(|s| s.last)
    }

    /// Returns `true` once the pointer has moved at least `slop` away from
    /// the origin.
    ///
    /// Useful to tell a click from a drag.
    #[must_use]
    pub fn exceeds(&self, slop: f64) -> bool {
        self.total_offset().is_some_and(|d| d.hypot2() >= slop * slop)
    }

    /// Ends the drag. Ending an inactive drag does nothing.
    pub fn end(&mut self) {
        self.active = None;
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }
}
