// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::flow::HandlerId;

/// Error returned by [`MiddlewareChain::handle_event`](crate::MiddlewareChain::handle_event).
#[derive(Clone, PartialEq, Eq)]
pub enum DispatchError<Err> {
    /// A handler failed; later handlers did not run.
    Handler {
        /// The failing handler.
        handler: HandlerId,
        /// The error it returned.
        error: Err,
    },
    /// The chain was dispatched from inside one of its own handlers.
    Reentrant,
}

impl<Err> DispatchError<Err> {
    /// Returns the handler error, if this is [`DispatchError::Handler`].
    pub fn into_handler_error(self) -> Option<Err> {
        match self {
            Self::Handler { error, .. } => Some(error),
            Self::Reentrant => None,
        }
    }
}

impl<Err: fmt::Debug> fmt::Debug for DispatchError<Err> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handler { handler, error } => write!(
                f,
                "DispatchError::Handler {{ handler: {handler:?}, error: {error:?} }}"
            ),
            Self::Reentrant => f.write_str("DispatchError::Reentrant"),
        }
    }
}

impl<Err: fmt::Display> fmt::Display for DispatchError<Err> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handler { handler, error } => write!(f, "{handler} failed: {error}"),
            Self::Reentrant => f.write_str("middleware chain dispatched re-entrantly"),
        }
    }
}

impl<Err> core::error::Error for DispatchError<Err>
where
    Err: core::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Handler { error, .. } => Some(error),
            Self::Reentrant => None,
        }
    }
}
