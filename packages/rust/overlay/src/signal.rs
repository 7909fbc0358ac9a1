//! Scroll-position signal and scoped subscriptions.
//!
//! The host environment owns scroll events; components only see a
//! [`ScrollSource`] they can subscribe to. Everything here is single-threaded:
//! listeners run on the thread that emits.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use tracing::trace;

/// Callback invoked with the page's current vertical scroll offset.
pub type ScrollListener = Box<dyn FnMut(f64)>;

/// Anything that can deliver scroll offsets to registered listeners.
pub trait ScrollSource {
    /// Register a listener. It stays registered until the returned
    /// [`Subscription`] is dropped.
    fn subscribe(&self, listener: ScrollListener) -> Subscription;
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// Guard that unregisters its listener when dropped.
#[must_use = "dropping a Subscription unregisters the listener immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap the action that unregisters a listener.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Unregister now.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// ScrollSignal
// ---------------------------------------------------------------------------

/// In-process scroll source. Stands in for the host's scroll events in tests
/// and offline renders.
#[derive(Clone, Default)]
pub struct ScrollSignal {
    registry: Rc<RefCell<Registry>>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    offset: f64,
    listeners: Vec<(u64, ScrollListener)>,
    dispatching: bool,
    /// Offsets emitted by listeners during a pass, delivered after it.
    pending: VecDeque<f64>,
    /// Ids released while their listener was checked out for dispatch.
    released_during_dispatch: Vec<u64>,
}

impl ScrollSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last emitted offset (0 before any event).
    pub fn offset(&self) -> f64 {
        self.registry.borrow().offset
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    /// Deliver a scroll event to every listener, in subscription order.
    ///
    /// Listeners may subscribe, drop subscriptions, or emit while being
    /// called. An offset emitted from inside a listener is queued and
    /// delivered to the then-current listeners once the running pass ends.
    pub fn emit(&self, offset: f64) {
        {
            let mut registry = self.registry.borrow_mut();
            if registry.dispatching {
                trace!(offset, "queueing scroll event emitted during dispatch");
                registry.pending.push_back(offset);
                return;
            }
            registry.dispatching = true;
        }

        let mut next = Some(offset);
        while let Some(offset) = next {
            self.dispatch(offset);
            next = self.registry.borrow_mut().pending.pop_front();
        }

        self.registry.borrow_mut().dispatching = false;
    }

    /// One pass over the listeners registered when the pass starts.
    fn dispatch(&self, offset: f64) {
        let mut checked_out = {
            let mut registry = self.registry.borrow_mut();
            registry.offset = offset;
            std::mem::take(&mut registry.listeners)
        };
        trace!(offset, listeners = checked_out.len(), "emitting scroll event");

        for (_, listener) in checked_out.iter_mut() {
            listener(offset);
        }

        let mut registry = self.registry.borrow_mut();
        let released = std::mem::take(&mut registry.released_during_dispatch);
        checked_out.retain(|(id, _)| !released.contains(id));

        let added = std::mem::replace(&mut registry.listeners, checked_out);
        registry.listeners.extend(added);
    }
}

impl ScrollSource for ScrollSignal {
    fn subscribe(&self, listener: ScrollListener) -> Subscription {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.push((id, listener));
            id
        };
        trace!(id, "scroll listener registered");

        let weak: Weak<RefCell<Registry>> = Rc::downgrade(&self.registry);
        Subscription::new(move || {
            let Some(registry) = weak.upgrade() else {
                return;
            };
            let mut registry = registry.borrow_mut();
            let before = registry.listeners.len();
            registry.listeners.retain(|(other, _)| *other != id);
            if registry.listeners.len() == before && registry.dispatching {
                registry.released_during_dispatch.push(id);
            }
            trace!(id, "scroll listener released");
        })
    }
}

impl std::fmt::Debug for ScrollSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.registry.borrow();
        f.debug_struct("ScrollSignal")
            .field("offset", &registry.offset)
            .field("listeners", &registry.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn delivers_offsets_to_listeners() {
        let signal = ScrollSignal::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let _sub = signal.subscribe(Box::new(move |offset| sink.borrow_mut().push(offset)));

        signal.emit(10.0);
        signal.emit(250.0);
        assert_eq!(*seen.borrow(), vec![10.0, 250.0]);
        assert_eq!(signal.offset(), 250.0);
    }

    #[test]
    fn dropping_subscription_unregisters() {
        let signal = ScrollSignal::new();
        let calls = Rc::new(Cell::new(0));

        let counter = Rc::clone(&calls);
        let sub = signal.subscribe(Box::new(move |_| counter.set(counter.get() + 1)));
        assert_eq!(signal.listener_count(), 1);

        signal.emit(1.0);
        sub.cancel();
        signal.emit(2.0);

        assert_eq!(calls.get(), 1);
        assert_eq!(signal.listener_count(), 0);
    }

    #[test]
    fn subscription_outliving_signal_is_harmless() {
        let signal = ScrollSignal::new();
        let sub = signal.subscribe(Box::new(|_| {}));
        drop(signal);
        drop(sub);
    }

    #[test]
    fn listener_can_unsubscribe_itself_during_dispatch() {
        let signal = ScrollSignal::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(Cell::new(0));

        let own = Rc::clone(&slot);
        let counter = Rc::clone(&calls);
        let sub = signal.subscribe(Box::new(move |_| {
            counter.set(counter.get() + 1);
            own.borrow_mut().take();
        }));
        *slot.borrow_mut() = Some(sub);

        signal.emit(1.0);
        signal.emit(2.0);
        assert_eq!(calls.get(), 1);
        assert_eq!(signal.listener_count(), 0);
    }

    #[test]
    fn listener_added_during_dispatch_sees_next_event() {
        let signal = ScrollSignal::new();
        let late_calls = Rc::new(Cell::new(0));
        let keep: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));

        let source = signal.clone();
        let counter = Rc::clone(&late_calls);
        let store = Rc::clone(&keep);
        let _first = signal.subscribe(Box::new(move |_| {
            if store.borrow().is_empty() {
                let counter = Rc::clone(&counter);
                let sub = source.subscribe(Box::new(move |_| counter.set(counter.get() + 1)));
                store.borrow_mut().push(sub);
            }
        }));

        signal.emit(1.0);
        assert_eq!(late_calls.get(), 0);
        signal.emit(2.0);
        assert_eq!(late_calls.get(), 1);
        assert_eq!(signal.listener_count(), 2);
    }

    #[test]
    fn nested_emit_is_queued_and_dropped_listener_stays_gone() {
        let signal = ScrollSignal::new();
        let victim_calls = Rc::new(RefCell::new(Vec::new()));
        let victim_slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let emitter_calls = Rc::new(RefCell::new(Vec::new()));

        let source = signal.clone();
        let slot = Rc::clone(&victim_slot);
        let seen = Rc::clone(&emitter_calls);
        let _emitter = signal.subscribe(Box::new(move |offset| {
            seen.borrow_mut().push(offset);
            if offset == 1.0 {
                source.emit(2.0);
                slot.borrow_mut().take();
            }
        }));

        let sink = Rc::clone(&victim_calls);
        let victim = signal.subscribe(Box::new(move |offset| sink.borrow_mut().push(offset)));
        *victim_slot.borrow_mut() = Some(victim);

        signal.emit(1.0);
        assert_eq!(signal.listener_count(), 1);
        assert_eq!(*emitter_calls.borrow(), vec![1.0, 2.0]);
        assert_eq!(signal.offset(), 2.0);

        signal.emit(3.0);
        assert_eq!(*victim_calls.borrow(), vec![1.0]);
        assert_eq!(*emitter_calls.borrow(), vec![1.0, 2.0, 3.0]);
    }
}
