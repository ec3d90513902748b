// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel View: the pan/zoom transform engine for a drawing surface.
//!
//! A drawing surface shows an unbounded content plane through a uniform
//! scale plus a translation. This crate provides:
//! - [`TransformState`] and its persistable [`Snapshot`].
//! - Coordinate conversion between device (pointer) units, surface pixels
//!   and content space ([`to_content_space`], [`visible_content_rect`]).
//! - [`TransformEngine`]: anchored zoom, panning, recentering and
//!   scale-to-fit over the shapes registered in its
//!   [`ContentTracker`](easel_tracker::ContentTracker), with change listeners
//!   and per-layer redraw requests.
//! - [`EngineRegistry`] for keeping one engine per surface.
//!
//! It does **not** paint anything. Callers own their shapes and rendering,
//! feed pointer positions through the mapper and read
//! [`TransformState::to_affine`] when drawing.
//!
//! ## Coordinate spaces
//!
//! - *Device* coordinates are pointer positions in device-independent units.
//! - *Surface* pixels are backing-store pixels, `device × device_pixel_ratio`.
//!   The offset lives here.
//! - *Content* coordinates are the drawing plane:
//!   `surface = content × scale + offset`.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use easel_view::{TransformEngine, Viewport};
//!
//! let viewport = Viewport::new(800.0, 600.0, 1.0);
//! let mut engine = TransformEngine::<String>::new();
//!
//! engine.track_shape_content("frame", Point::new(0.0, 0.0), Point::new(400.0, 300.0));
//! engine.recenter_on_content(viewport, true, 200.0);
//! assert!((engine.scale() - 6.0 / 7.0).abs() < 1e-12);
//!
//! // The middle of the content is now in the middle of the viewport.
//! let centre = engine
//!     .to_content_space(Point::new(400.0, 300.0), viewport, false)
//!     .unwrap();
//! assert!((centre.point - Point::new(200.0, 150.0)).hypot() < 1e-9);
//!
//! // Snapshots restore the exact state.
//! let saved = engine.snapshot();
//! engine.change_offset(Vec2::new(25.0, 0.0));
//! assert_eq!(engine.load_snapshot(saved), Ok(true));
//! assert_eq!(engine.snapshot(), saved);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to Kurbo and `tracing`.
//! - `libm`: `no_std` math through Kurbo.
//! - `serde`: derives for [`Snapshot`], [`EngineConfig`] and [`Padding`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod engine;
mod mapper;
mod registry;
mod state;

pub use config::{EngineConfig, MIN_SCALE_FLOOR, Padding};
pub use engine::{EngineDebugInfo, ListenerId, TransformEngine};
pub use mapper::{
    MappedPoint, SurfaceMetrics, Viewport, to_content_space, to_device_space,
    visible_content_rect,
};
pub use registry::EngineRegistry;
pub use state::{Snapshot, StateError, TransformState};

pub use easel_redraw::{Layer, LayerSet, RedrawScheduler};
pub use easel_tracker::{ContentTracker, Footprint, HitTestMode, Trackable, pick};
