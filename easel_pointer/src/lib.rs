// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Pointer: small pointer-input helpers for Easel surfaces.
//!
//! - [`PointerButton`] and [`PointerButtons`] decode platform button indices
//!   and `buttons` masks into named values.
//! - [`DragState`] turns a stream of pointer positions into per-move steps
//!   and a total displacement.
//! - [`PanGesture`] drives [`TransformEngine::change_offset`](easel_view::TransformEngine::change_offset)
//!   from drags, converting device units to surface pixels.
//!
//! Nothing here is tied to a windowing toolkit; hosts translate their own
//! events into these calls, typically from an `easel_middleware` chain.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use easel_pointer::{PanGesture, PointerButton, PointerButtons};
//! use easel_view::{TransformEngine, Viewport};
//!
//! let viewport = Viewport::new(800.0, 600.0, 1.0);
//! let mut engine = TransformEngine::<String>::new();
//! let mut pan = PanGesture::default();
//!
//! let button = PointerButton::from_index(0).unwrap();
//! pan.pointer_down(Point::new(100.0, 100.0), button);
//! pan.pointer_move(
//!     Point::new(130.0, 90.0),
//!     PointerButtons::from_mask(1),
//!     &mut engine,
//!     viewport,
//! );
//! pan.pointer_up(button);
//!
//! assert_eq!(engine.offset(), Point::new(30.0, -10.0));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod buttons;
mod drag;
mod pan;

pub use buttons::{PointerButton, PointerButtons};
pub use drag::DragState;
pub use pan::PanGesture;
