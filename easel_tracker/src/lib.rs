// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Tracker: keyed shape tracking and content bounds.
//!
//! A [`ContentTracker`] maps caller-supplied keys to a [`Footprint`] (a single
//! representative point or an axis-aligned region) and maintains the
//! axis-aligned bounding box of everything it tracks. The tracker never looks
//! at concrete shape geometry; shapes describe themselves through the
//! [`Trackable`] capability trait.
//!
//! ## Bounds maintenance
//!
//! - Inserting grows the bounds in O(1).
//! - Removing or overwriting an entry strictly inside the bounds is O(1).
//! - Removing or overwriting an entry that touches the bounds rescans the
//!   survivors immediately (O(n)), so [`ContentTracker::content_bounds`] is
//!   always exact and never deferred.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use easel_tracker::ContentTracker;
//!
//! let mut tracker = ContentTracker::<String>::new();
//! tracker.track_shape("s1", Point::new(10.0, 10.0));
//! tracker.track_shape("s2", Point::new(50.0, 60.0));
//! assert_eq!(tracker.content_bounds(), Some(Rect::new(10.0, 10.0, 50.0, 60.0)));
//! assert_eq!(tracker.content_center(), Some(Point::new(30.0, 35.0)));
//!
//! tracker.untrack_shape("s2");
//! assert_eq!(tracker.content_bounds(), Some(Rect::new(10.0, 10.0, 10.0, 10.0)));
//!
//! tracker.clear_tracked_shapes();
//! assert!(!tracker.tracking_enabled());
//! assert_eq!(tracker.content_bounds(), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod footprint;
mod pick;
mod tracker;

pub use footprint::Footprint;
pub use pick::{DEFAULT_STROKE_TOLERANCE, HitTestMode, Trackable, pick};
pub use tracker::ContentTracker;
