// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The middleware chain and its registration handles.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use core::fmt;

use smallvec::SmallVec;

use crate::error::DispatchError;
use crate::flow::{Flow, HandlerId, HandlerResult, Propagation};

type Handler<E, Err> = Rc<RefCell<dyn FnMut(&mut E) -> Result<Flow, Err>>>;

struct Entry<E, Err> {
    id: HandlerId,
    permanent: bool,
    handler: Handler<E, Err>,
}

impl<E, Err> Clone for Entry<E, Err> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            permanent: self.permanent,
            handler: Rc::clone(&self.handler),
        }
    }
}

fn boxed<E, Err, R>(mut handler: impl FnMut(&mut E) -> R + 'static) -> Handler<E, Err>
where
    E: 'static,
    Err: 'static,
    R: HandlerResult<Err> + 'static,
{
    Rc::new(RefCell::new(move |event: &mut E| handler(event).into_result()))
}

/// Ordered, short-circuiting dispatcher for one event category.
///
/// All methods take `&self`, so the chain can be shared behind an [`Rc`] by
/// several consumers and modified from inside its own handlers. See the
/// [crate docs](crate) for the dispatch rules.
///
/// # Type Parameters
///
/// - `E`: the event payload, passed to each handler as `&mut E`.
/// - `Err`: the error handlers may return; [`Infallible`] by default.
pub struct MiddlewareChain<E, Err = Infallible> {
    entries: RefCell<Vec<Entry<E, Err>>>,
    next_id: Cell<u64>,
    dispatching: Cell<bool>,
}

impl<E, Err> Default for MiddlewareChain<E, Err> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, Err> fmt::Debug for MiddlewareChain<E, Err> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.borrow();
        f.debug_struct("MiddlewareChain")
            .field("handlers", &entries.iter().map(|e| e.id).collect::<Vec<_>>())
            .field("dispatching", &self.dispatching.get())
            .finish_non_exhaustive()
    }
}

impl<E, Err> MiddlewareChain<E, Err> {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
            dispatching: Cell::new(false),
        }
    }

    /// Starts building a chain with handlers bound for its whole lifetime.
    #[must_use]
    pub fn builder() -> ChainBuilder<E, Err> {
        ChainBuilder {
            chain: Self::new(),
        }
    }

    /// Removes a dynamically registered handler.
    ///
    /// Returns `false` if `id` is unknown, already removed, or belongs to a
    /// handler bound at construction.
    pub fn unregister(&self, id: HandlerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let Some(pos) = entries.iter().position(|e| e.id == id) else {
            return false;
        };
        if entries[pos].permanent {
            tracing::warn!(%id, "refusing to unregister a lifetime handler");
            return false;
        }
        entries.remove(pos);
        tracing::trace!(%id, remaining = entries.len(), "handler unregistered");
        true
    }

    /// Returns `true` if `id` is currently registered.
    #[must_use]
    pub fn contains(&self, id: HandlerId) -> bool {
        self.entries.borrow().iter().any(|e| e.id == id)
    }

    /// Returns the registered handler ids in dispatch order.
    #[must_use]
    pub fn handler_ids(&self) -> Vec<HandlerId> {
        self.entries.borrow().iter().map(|e| e.id).collect()
    }

    /// Returns the number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns `true` if no handler is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Returns `true` while a dispatch is running.
    #[must_use]
    pub fn is_dispatching(&self) -> bool {
        self.dispatching.get()
    }

    /// Runs `event` through the handlers registered at the time of the call.
    ///
    /// Returns [`Propagation::Completed`] if every handler continued, or
    /// [`Propagation::Stopped`] naming the handler that stopped. A handler
    /// error ends the dispatch immediately and is returned unchanged inside
    /// [`DispatchError::Handler`]. Panics in handlers unwind through this call
    /// and leave the chain usable.
    pub fn handle_event(&self, event: &mut E) -> Result<Propagation, DispatchError<Err>> {
        if self.dispatching.replace(true) {
            tracing::warn!("re-entrant dispatch rejected");
            return Err(DispatchError::Reentrant);
        }
        let _guard = DispatchGuard(&self.dispatching);

        let snapshot: SmallVec<[Entry<E, Err>; 8]> =
            self.entries.borrow().iter().cloned().collect();

        for entry in &snapshot {
            let flow = (&mut *entry.handler.borrow_mut())(event);
            match flow {
                Ok(Flow::Continue) => {}
                Ok(Flow::Stop) => {
                    tracing::trace!(id = %entry.id, "dispatch stopped");
                    return Ok(Propagation::Stopped(entry.id));
                }
                Err(error) => {
                    tracing::debug!(id = %entry.id, "handler failed; aborting dispatch");
                    return Err(DispatchError::Handler {
                        handler: entry.id,
                        error,
                    });
                }
            }
        }
        Ok(Propagation::Completed)
    }

    fn push(&self, permanent: bool, handler: Handler<E, Err>) -> HandlerId {
        let id = HandlerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries.borrow_mut().push(Entry {
            id,
            permanent,
            handler,
        });
        id
    }
}

impl<E: 'static, Err: 'static> MiddlewareChain<E, Err> {
    /// Creates a chain from handlers bound for its whole lifetime.
    ///
    /// Same as adding each one through [`ChainBuilder::handler`]. Handlers of
    /// different types can be passed as boxed closures.
    pub fn with_handlers<I, F, R>(handlers: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: FnMut(&mut E) -> R + 'static,
        R: HandlerResult<Err> + 'static,
    {
        let chain = Self::new();
        for handler in handlers {
            chain.push(true, boxed(handler));
        }
        chain
    }

    /// Appends a handler that can later be removed with [`unregister`](Self::unregister).
    pub fn register<R>(&self, handler: impl FnMut(&mut E) -> R + 'static) -> HandlerId
    where
        R: HandlerResult<Err> + 'static,
    {
        self.push(false, boxed(handler))
    }

    /// Appends a handler that is removed when the returned guard drops.
    ///
    /// The guard holds only a weak reference, so it never keeps the chain alive.
    pub fn register_scoped<R>(
        self: &Rc<Self>,
        handler: impl FnMut(&mut E) -> R + 'static,
    ) -> ScopedHandler<E, Err>
    where
        R: HandlerResult<Err> + 'static,
    {
        let id = self.register(handler);
        ScopedHandler {
            chain: Rc::downgrade(self),
            id,
        }
    }
}

/// Resets the dispatching flag even when a handler panics.
struct DispatchGuard<'a>(&'a Cell<bool>);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Builder for chains with lifetime-bound handlers.
///
/// Handlers added here run before any handler registered later and cannot be
/// unregistered.
pub struct ChainBuilder<E, Err = Infallible> {
    chain: MiddlewareChain<E, Err>,
}

impl<E, Err> fmt::Debug for ChainBuilder<E, Err> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainBuilder")
            .field("chain", &self.chain)
            .finish()
    }
}

impl<E: 'static, Err: 'static> ChainBuilder<E, Err> {
    /// Appends a lifetime handler.
    #[must_use]
    pub fn handler<R>(self, handler: impl FnMut(&mut E) -> R + 'static) -> Self
    where
        R: HandlerResult<Err> + 'static,
    {
        self.chain.push(true, boxed(handler));
        self
    }
}

impl<E, Err> ChainBuilder<E, Err> {
    /// Finishes the chain.
    #[must_use]
    pub fn build(self) -> MiddlewareChain<E, Err> {
        self.chain
    }
}

/// Registration that removes its handler when dropped.
///
/// Returned by [`MiddlewareChain::register_scoped`]; tie it to the lifetime
/// of the consumer that owns the behavior.
pub struct ScopedHandler<E, Err = Infallible> {
    chain: Weak<MiddlewareChain<E, Err>>,
    id: HandlerId,
}

impl<E, Err> ScopedHandler<E, Err> {
    /// The id of the guarded registration.
    #[must_use]
    pub fn id(&self) -> HandlerId {
        self.id
    }
}

impl<E, Err> fmt::Debug for ScopedHandler<E, Err> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedHandler")
            .field("id", &self.id)
            .field("chain_alive", &(self.chain.strong_count() > 0))
            .finish()
    }
}

impl<E, Err> Drop for ScopedHandler<E, Err> {
    fn drop(&mut self) {
        if let Some(chain) = self.chain.upgrade() {
            chain.unregister(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::boxed::Box;
    use alloc::vec;

    type Log = Rc<RefCell<Vec<&'static str>>>;

    fn logger(
        log: &Log,
        name: &'static str,
        flow: Flow,
    ) -> impl FnMut(&mut ()) -> Flow + 'static {
        let log = log.clone();
        move |_: &mut ()| {
            log.borrow_mut().push(name);
            flow
        }
    }

    #[test]
    fn empty_chain_completes() {
        let chain = MiddlewareChain::<()>::new();
        assert_eq!(chain.handle_event(&mut ()), Ok(Propagation::Completed));
        assert!(chain.is_empty());
    }

    #[test]
    fn lifetime_handlers_run_first_and_stay() {
        let log = Log::default();
        let chain = MiddlewareChain::<()>::builder()
            .handler(logger(&log, "base", Flow::Continue))
            .build();
        let base = chain.handler_ids()[0];
        chain.register(logger(&log, "dyn", Flow::Continue));

        assert!(!chain.unregister(base));
        chain.handle_event(&mut ()).unwrap();
        assert_eq!(*log.borrow(), vec!["base", "dyn"]);
    }

    #[test]
    fn with_handlers_accepts_mixed_closures() {
        let log = Log::default();
        let handlers: Vec<Box<dyn FnMut(&mut ()) -> Flow>> = vec![
            Box::new(logger(&log, "a", Flow::Continue)),
            Box::new(logger(&log, "b", Flow::Stop)),
            Box::new(logger(&log, "c", Flow::Continue)),
        ];
        let chain = MiddlewareChain::<()>::with_handlers(handlers);
        let ids = chain.handler_ids();

        assert_eq!(chain.handle_event(&mut ()), Ok(Propagation::Stopped(ids[1])));
        assert_eq!(*log.borrow(), vec!["a", "b"]);
        assert!(ids.iter().all(|id| !chain.unregister(*id)));
    }

    #[test]
    fn unregister_is_idempotent() {
        let chain = MiddlewareChain::<()>::new();
        let id = chain.register(|_: &mut ()| true);
        assert!(chain.contains(id));
        assert!(chain.unregister(id));
        assert!(!chain.unregister(id));
        assert!(!chain.contains(id));
    }

    #[test]
    fn ids_are_not_reused() {
        let chain = MiddlewareChain::<()>::new();
        let a = chain.register(|_: &mut ()| true);
        chain.unregister(a);
        let b = chain.register(|_: &mut ()| true);
        assert_ne!(a, b);
    }

    #[test]
    fn scoped_handler_unregisters_on_drop() {
        let chain = Rc::new(MiddlewareChain::<()>::new());
        let guard = chain.register_scoped(|_: &mut ()| true);
        assert!(chain.contains(guard.id()));
        drop(guard);
        assert!(chain.is_empty());
    }

    #[test]
    fn scoped_handler_outliving_chain_is_harmless() {
        let chain = Rc::new(MiddlewareChain::<()>::new());
        let guard = chain.register_scoped(|_: &mut ()| true);
        drop(chain);
        drop(guard);
    }

    #[test]
    fn reentrant_dispatch_is_rejected() {
        let chain = Rc::new(MiddlewareChain::<u32>::new());
        let inner: Rc<RefCell<Option<Result<Propagation, DispatchError<Infallible>>>>> =
            Rc::default();
        let weak = Rc::downgrade(&chain);
        let seen = inner.clone();
        chain.register(move |n: &mut u32| {
            if let Some(chain) = weak.upgrade() {
                let mut nested = *n + 1;
                *seen.borrow_mut() = Some(chain.handle_event(&mut nested));
            }
            true
        });

        assert_eq!(chain.handle_event(&mut 0), Ok(Propagation::Completed));
        assert_eq!(*inner.borrow(), Some(Err(DispatchError::Reentrant)));
        assert!(!chain.is_dispatching());
    }
}
