// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordering, short-circuit and fault behavior of `MiddlewareChain`.

use std::cell::RefCell;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use easel_middleware::{DispatchError, Flow, HandlerId, MiddlewareChain, Propagation};

#[derive(Default)]
struct PointerMove {
    seen: Vec<&'static str>,
}

fn recorder(name: &'static str, flow: Flow) -> impl FnMut(&mut PointerMove) -> Flow + 'static {
    move |ev: &mut PointerMove| {
        ev.seen.push(name);
        flow
    }
}

#[test]
fn stop_short_circuits_and_removal_reorders() {
    let chain = MiddlewareChain::<PointerMove>::new();
    let a = chain.register(recorder("A", Flow::Continue));
    let b = chain.register(recorder("B", Flow::Stop));
    let _c = chain.register(recorder("C", Flow::Continue));

    let mut ev = PointerMove::default();
    let outcome = chain.handle_event(&mut ev).unwrap();
    assert_eq!(ev.seen, ["A", "B"]);
    assert_eq!(outcome, Propagation::Stopped(b));
    assert!(!outcome.default_allowed());

    assert!(chain.unregister(a));
    assert!(chain.unregister(b));
    chain.register(recorder("B", Flow::Continue));

    let mut ev = PointerMove::default();
    let outcome = chain.handle_event(&mut ev).unwrap();
    assert_eq!(ev.seen, ["C", "B"]);
    assert_eq!(outcome, Propagation::Completed);
    assert!(outcome.default_allowed());
}

#[test]
fn removing_a_then_dispatching_yields_b_c() {
    let chain = MiddlewareChain::<PointerMove>::new();
    let a = chain.register(recorder("A", Flow::Continue));
    chain.register(recorder("B", Flow::Continue));
    chain.register(recorder("C", Flow::Continue));

    chain.unregister(a);
    let mut ev = PointerMove::default();
    chain.handle_event(&mut ev).unwrap();
    assert_eq!(ev.seen, ["B", "C"]);
}

#[test]
fn removal_during_dispatch_applies_to_next_dispatch() {
    let chain = Rc::new(MiddlewareChain::<PointerMove>::new());
    let victim: Rc<RefCell<Option<HandlerId>>> = Rc::default();

    let weak = Rc::downgrade(&chain);
    let target = victim.clone();
    let remover = chain.register(move |ev: &mut PointerMove| {
        ev.seen.push("remover");
        if let (Some(chain), Some(id)) = (weak.upgrade(), *target.borrow()) {
            chain.unregister(id);
        }
        true
    });
    let doomed = chain.register(recorder("doomed", Flow::Continue));
    chain.register(recorder("tail", Flow::Continue));
    *victim.borrow_mut() = Some(doomed);

    // The snapshot taken at dispatch start still contains `doomed`.
    let mut ev = PointerMove::default();
    chain.handle_event(&mut ev).unwrap();
    assert_eq!(ev.seen, ["remover", "doomed", "tail"]);
    assert!(!chain.contains(doomed));

    let mut ev = PointerMove::default();
    chain.handle_event(&mut ev).unwrap();
    assert_eq!(ev.seen, ["remover", "tail"]);
    assert!(chain.contains(remover));
}

#[test]
fn handler_may_remove_itself() {
    let chain = Rc::new(MiddlewareChain::<PointerMove>::new());
    let own_id: Rc<RefCell<Option<HandlerId>>> = Rc::default();

    let weak = Rc::downgrade(&chain);
    let me = own_id.clone();
    let id = chain.register(move |ev: &mut PointerMove| {
        ev.seen.push("once");
        if let (Some(chain), Some(id)) = (weak.upgrade(), *me.borrow()) {
            chain.unregister(id);
        }
        true
    });
    *own_id.borrow_mut() = Some(id);
    chain.register(recorder("always", Flow::Continue));

    let mut ev = PointerMove::default();
    chain.handle_event(&mut ev).unwrap();
    chain.handle_event(&mut ev).unwrap();
    assert_eq!(ev.seen, ["once", "always", "always"]);
}

#[derive(Debug, PartialEq)]
struct GestureFault(&'static str);

impl fmt::Display for GestureFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gesture fault: {}", self.0)
    }
}

impl std::error::Error for GestureFault {}

#[test]
fn handler_errors_abort_and_propagate() {
    let log: Rc<RefCell<Vec<&'static str>>> = Rc::default();
    let chain = MiddlewareChain::<(), GestureFault>::new();

    let l = log.clone();
    chain.register(move |_: &mut ()| -> Result<bool, GestureFault> {
        l.borrow_mut().push("first");
        Ok(true)
    });
    let failing = chain.register(|_: &mut ()| -> Result<Flow, GestureFault> {
        Err(GestureFault("lost capture"))
    });
    let l = log.clone();
    chain.register(move |_: &mut ()| {
        l.borrow_mut().push("never");
        Flow::Continue
    });

    let err = chain.handle_event(&mut ()).unwrap_err();
    assert_eq!(
        err,
        DispatchError::Handler {
            handler: failing,
            error: GestureFault("lost capture"),
        }
    );
    assert_eq!(err.to_string(), format!("{failing} failed: gesture fault: lost capture"));
    assert!(std::error::Error::source(&err).is_some());
    assert_eq!(*log.borrow(), ["first"]);
    assert!(!chain.is_dispatching());
}

#[test]
fn panicking_handler_leaves_chain_usable() {
    let chain = MiddlewareChain::<u32>::new();
    chain.register(|n: &mut u32| {
        assert!(*n != 13, "unlucky event");
        true
    });

    let result = catch_unwind(AssertUnwindSafe(|| chain.handle_event(&mut 13)));
    assert!(result.is_err());
    assert!(!chain.is_dispatching());
    assert_eq!(chain.handle_event(&mut 1), Ok(Propagation::Completed));
}

#[test]
fn shared_chain_serves_several_consumers() {
    struct Consumer {
        _registration: easel_middleware::ScopedHandler<PointerMove>,
    }

    let chain = Rc::new(
        MiddlewareChain::<PointerMove>::builder()
            .handler(recorder("platform", Flow::Continue))
            .build(),
    );

    let hover = Consumer {
        _registration: chain.register_scoped(recorder("hover", Flow::Continue)),
    };
    let drag = Consumer {
        _registration: chain.register_scoped(recorder("drag", Flow::Continue)),
    };
    assert_eq!(chain.len(), 3);

    drop(hover);
    let mut ev = PointerMove::default();
    chain.handle_event(&mut ev).unwrap();
    assert_eq!(ev.seen, ["platform", "drag"]);

    drop(drag);
    assert_eq!(chain.len(), 1);
}
