#![forbid(unsafe_code)]

//! Active-route signal.
//!
//! # Design
//!
//! [`RouteSignal`] holds the current [`RouteId`] in shared, reference-counted
//! storage (`Rc<RefCell<..>>`). The router is the single writer
//! ([`RouteSignal::navigate`]); decorations and the navigation bar are readers
//! that either poll [`RouteSignal::current`] on every render or register a
//! callback with [`RouteSignal::subscribe`].
//!
//! # Invariants
//!
//! 1. `version` increments by exactly 1 on each route change.
//! 2. Navigating to the current route is a no-op: no version bump, no
//!    notification.
//! 3. Subscribers are notified in registration order, after the new route is
//!    visible through `current()`.
//! 4. Dropping a [`Subscription`] stops delivery; dead entries are pruned on
//!    the next notification.
//!
//! # Failure Modes
//!
//! - Calling `navigate()` from inside a subscriber is allowed; the nested
//!   change is delivered after the outer notification loop finishes its
//!   current callback.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use folio_core::route::RouteId;
use tracing::info;

type CallbackRc = Rc<dyn Fn(&RouteId)>;
type CallbackWeak = Weak<dyn Fn(&RouteId)>;

struct SignalInner {
    route: RouteId,
    version: u64,
    subscribers: Vec<CallbackWeak>,
}

/// Shared handle to the active route.
///
/// Cloning creates another handle to the **same** route and subscriber list.
#[derive(Clone)]
pub struct RouteSignal {
    inner: Rc<RefCell<SignalInner>>,
}

impl std::fmt::Debug for RouteSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("RouteSignal")
            .field("route", &inner.route)
            .field("version", &inner.version)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl RouteSignal {
    /// Create a signal positioned at `initial`, version 0.
    #[must_use]
    pub fn new(initial: impl Into<RouteId>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SignalInner {
                route: initial.into(),
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// The active route.
    #[must_use]
    pub fn current(&self) -> RouteId {
        self.inner.borrow().route.clone()
    }

    /// Number of route changes so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Switch to `route`. Returns `true` if the route changed.
    pub fn navigate(&self, route: impl Into<RouteId>) -> bool {
        let route = route.into();
        let (from, version) = {
            let mut inner = self.inner.borrow_mut();
            if inner.route == route {
                return false;
            }
            let from = std::mem::replace(&mut inner.route, route.clone());
            inner.version += 1;
            (from, inner.version)
        };
        info!(from = %from, to = %route, version, "route.change");
        self.notify(&route);
        true
    }

    /// Register a callback for route changes.
    ///
    /// The callback runs with the new route each time it changes. Dropping
    /// the returned guard unsubscribes.
    pub fn subscribe(&self, callback: impl Fn(&RouteId) + 'static) -> Subscription {
        let strong: CallbackRc = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&strong));
        Subscription { _guard: strong }
    }

    /// Registered subscribers, including dropped ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn notify(&self, route: &RouteId) {
        // Collect first so no borrow is held while callbacks run.
        let callbacks: Vec<CallbackRc> = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            inner.subscribers.iter().filter_map(Weak::upgrade).collect()
        };
        for callback in callbacks {
            callback(route);
        }
    }
}

/// RAII guard for a [`RouteSignal`] subscription.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    _guard: CallbackRc,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
