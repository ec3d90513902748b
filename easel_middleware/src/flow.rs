// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// What a handler wants to happen after it has seen an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Flow {
    /// Pass the event to the next handler and, eventually, the platform default.
    Continue,
    /// Suppress the remaining handlers and the platform default.
    Stop,
}

impl From<bool> for Flow {
    /// `true` means continue.
    fn from(keep_going: bool) -> Self {
        if keep_going { Self::Continue } else { Self::Stop }
    }
}

/// Result of a completed dispatch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Propagation {
    /// Every handler returned [`Flow::Continue`].
    Completed,
    /// The given handler returned [`Flow::Stop`].
    Stopped(HandlerId),
}

impl Propagation {
    /// Returns `true` if the platform default behavior should run.
    #[must_use]
    pub fn default_allowed(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns `true` if a handler stopped the dispatch.
    #[must_use]
    pub fn is_stopped(self) -> bool {
        matches!(self, Self::Stopped(_))
    }
}

/// Identifies one handler registration within a chain.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(pub(crate) u64);

impl fmt::Debug for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HandlerId({})", self.0)
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler #{}", self.0)
    }
}

/// Anything a handler may return.
///
/// Implemented for [`Flow`] and `bool` (infallible handlers) and for
/// `Result<Flow, Err>` / `Result<bool, Err>` (fallible handlers).
pub trait HandlerResult<Err> {
    /// Normalizes into the chain's internal representation.
    fn into_result(self) -> Result<Flow, Err>;
}

impl<Err> HandlerResult<Err> for Flow {
    fn into_result(self) -> Result<Flow, Err> {
        Ok(self)
    }
}

impl<Err> HandlerResult<Err> for bool {
    fn into_result(self) -> Result<Flow, Err> {
        Ok(self.into())
    }
}

impl<Err> HandlerResult<Err> for Result<Flow, Err> {
    fn into_result(self) -> Self {
        self
    }
}

impl<Err> HandlerResult<Err> for Result<bool, Err> {
    fn into_result(self) -> Result<Flow, Err> {
        self.map(Flow::from)
    }
}
