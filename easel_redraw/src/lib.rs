// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Redraw: per-layer redraw coalescing.
//!
//! A drawing surface is split into a small, fixed set of [`Layer`]s. Any
//! number of state changes may ask for a layer to be repainted during one
//! logical tick; [`RedrawScheduler`] folds them into a single pending set and
//! asks the host for **one** animation frame. When the host's frame callback
//! fires it calls [`RedrawScheduler::run_frame`], which clears the in-flight
//! guard and invokes each pending layer's painter exactly once.
//!
//! Requesting [`Layer::Main`] implicitly requests [`Layer::Internal`] as well:
//! scrollbars and other content-dependent chrome live on the internal layer
//! and must follow the main content.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use easel_redraw::{Layer, LayerSet, RedrawScheduler};
//!
//! let frames = Rc::new(Cell::new(0_u32));
//! let paints = Rc::new(Cell::new(0_u32));
//!
//! let mut redraw = RedrawScheduler::new();
//! let f = frames.clone();
//! redraw.set_frame_requester(move || f.set(f.get() + 1));
//! let p = paints.clone();
//! redraw.set_painter(Layer::Main, move || p.set(p.get() + 1));
//!
//! // Three changes in the same tick: one frame, one paint.
//! redraw.request(Layer::Main);
//! redraw.request(Layer::Main);
//! redraw.request(Layer::Main);
//! assert_eq!(frames.get(), 1);
//!
//! let painted = redraw.run_frame();
//! assert_eq!(painted, LayerSet::MAIN | LayerSet::INTERNAL);
//! assert_eq!(paints.get(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod layer;
mod scheduler;

pub use layer::{Layer, LayerSet};
pub use scheduler::RedrawScheduler;
