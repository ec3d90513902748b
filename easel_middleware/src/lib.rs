// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Middleware: ordered, short-circuiting event chains.
//!
//! A [`MiddlewareChain`] owns the handlers for **one** event category (pointer
//! moves, key presses, wheel, ...). The host binds the chain to the platform
//! once; any number of consumers (hover, drag, zoom, pan controllers) then add
//! and remove handlers on the shared chain instead of each binding the
//! platform event themselves.
//!
//! ## Dispatch rules
//!
//! - Handlers run in registration order; handlers supplied at construction come
//!   first and live as long as the chain.
//! - A handler returns [`Flow::Continue`] (or `true`) to pass the event on, or
//!   [`Flow::Stop`] (or `false`) to suppress the remaining handlers **and** the
//!   platform default for this event.
//! - The handler sequence is snapshotted at the start of each dispatch.
//!   Registering or removing handlers from inside a handler takes effect from
//!   the next dispatch.
//! - A handler error aborts the dispatch and is returned to the caller as
//!   [`DispatchError::Handler`]. Nothing is swallowed.
//! - Dispatching on a chain from inside one of its own handlers is rejected
//!   with [`DispatchError::Reentrant`].
//!
//! ## Minimal example
//!
//! ```rust
//! use easel_middleware::{Flow, MiddlewareChain, Propagation};
//!
//! #[derive(Default)]
//! struct Move { x: f64, seen: Vec<&'static str> }
//!
//! let chain = MiddlewareChain::<Move>::builder()
//!     .handler(|ev: &mut Move| { ev.seen.push("log"); Flow::Continue })
//!     .build();
//!
//! let hover = chain.register(|ev: &mut Move| {
//!     ev.seen.push("hover");
//!     ev.x < 100.0 // stop once the pointer is past the toolbar edge
//! });
//! chain.register(|ev: &mut Move| { ev.seen.push("drag"); true });
//!
//! let mut ev = Move { x: 250.0, ..Move::default() };
//! let outcome = chain.handle_event(&mut ev).unwrap();
//! assert_eq!(outcome, Propagation::Stopped(hover));
//! assert!(!outcome.default_allowed());
//! assert_eq!(ev.seen, ["log", "hover"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod chain;
mod error;
mod flow;

pub use chain::{ChainBuilder, MiddlewareChain, ScopedHandler};
pub use error::DispatchError;
pub use flow::{Flow, HandlerId, HandlerResult, Propagation};
