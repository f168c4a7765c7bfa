//! Named-event publish/subscribe.
//!
//! The bus maps event names to [`ListenerSet`]s. Dispatch is synchronous and
//! isolates failures per listener. Debounced dispatch keeps one
//! [`Debouncer`] per event name; the host loop delivers due events with
//! [`EventBus::poll_debounced`].

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::trace;

use crate::debounce::Debouncer;
use crate::listener::{DispatchReport, Listener, ListenerResult, ListenerSet, Subscription, listener};

struct BusState<P> {
    listeners: HashMap<String, ListenerSet<P>>,
    debounced: BTreeMap<String, Debouncer<P>>,
}

/// Shared handle to a named-event bus.
///
/// Cloning the handle shares the underlying registry.
pub struct EventBus<P> {
    state: Rc<RefCell<BusState<P>>>,
}

impl<P> Clone for EventBus<P> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<P> Default for EventBus<P> {
    fn default() -> Self {
        Self {
            state: Rc::new(RefCell::new(BusState {
                listeners: HashMap::new(),
                debounced: BTreeMap::new(),
            })),
        }
    }
}

impl<P> fmt::Debug for EventBus<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("EventBus")
            .field("events", &state.listeners.len())
            .field("pending", &state.debounced.values().filter(|d| d.is_pending()).count())
            .finish()
    }
}

impl<P: 'static> EventBus<P> {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for `event`.
    ///
    /// Registering the same `Rc` twice for one event keeps one entry.
    pub fn add_event_listener(&self, event: &str, listener: Listener<P>) -> Subscription {
        let set = self
            .state
            .borrow_mut()
            .listeners
            .entry(event.to_owned())
            .or_default()
            .clone();
        set.insert(listener)
    }

    /// Register a closure for `event`.
    pub fn on<F>(&self, event: &str, f: F) -> Subscription
    where
        F: Fn(&P) -> ListenerResult + 'static,
    {
        self.add_event_listener(event, listener(f))
    }

    /// Remove `listener` from `event` by identity.
    pub fn remove_event_listener(&self, event: &str, listener: &Listener<P>) -> bool {
        let set = self.state.borrow().listeners.get(event).cloned();
        set.is_some_and(|set| set.remove(listener))
    }

    /// Number of listeners registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.state
            .borrow()
            .listeners
            .get(event)
            .map_or(0, ListenerSet::len)
    }

    /// Invoke every listener of `event` now.
    pub fn dispatch_event(&self, event: &str, payload: &P) -> DispatchReport {
        let set = self.state.borrow().listeners.get(event).cloned();
        match set {
            Some(set) => {
                let report = set.notify(event, payload);
                trace!(event, delivered = report.delivered, failed = report.failed, "dispatched");
                report
            }
            None => DispatchReport::default(),
        }
    }

    /// Schedule `event` for delivery once `delay` has passed without another
    /// debounced dispatch of the same event. Returns `true` when a pending
    /// payload was superseded.
    pub fn dispatch_event_debounced(
        &self,
        event: &str,
        delay: Duration,
        payload: P,
        now: Instant,
    ) -> bool {
        let mut state = self.state.borrow_mut();
        let debouncer = state
            .debounced
            .entry(event.to_owned())
            .or_insert_with(|| Debouncer::new(delay));
        debouncer.set_delay(delay);
        debouncer.schedule(payload, now)
    }

    /// Deliver every debounced event whose deadline has passed, earliest
    /// deadline first. Returns the number of events dispatched.
    pub fn poll_debounced(&self, now: Instant) -> usize {
        let due = self.take_debounced(|debouncer| {
            let deadline = debouncer.deadline()?;
            debouncer.poll(now).map(|payload| (Some(deadline), payload))
        });
        self.deliver(due)
    }

    /// Deliver every pending debounced event immediately.
    pub fn flush_debounced(&self) -> usize {
        let due = self.take_debounced(|debouncer| {
            let deadline = debouncer.deadline();
            debouncer.flush().map(|payload| (deadline, payload))
        });
        self.deliver(due)
    }

    /// Whether `event` has a debounced payload waiting.
    pub fn has_pending(&self, event: &str) -> bool {
        self.state
            .borrow()
            .debounced
            .get(event)
            .is_some_and(Debouncer::is_pending)
    }

    /// Earliest deadline among pending debounced events.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.state
            .borrow()
            .debounced
            .values()
            .filter_map(Debouncer::deadline)
            .min()
    }

    /// Drop all listeners and pending debounced events.
    pub fn clear(&self) {
        let mut state = self.state.borrow_mut();
        for set in state.listeners.values() {
            set.clear();
        }
        state.listeners.clear();
        state.debounced.clear();
    }

    // Events without a deadline sort last.
    fn take_debounced<F>(&self, mut take: F) -> Vec<(Option<Instant>, String, P)>
    where
        F: FnMut(&mut Debouncer<P>) -> Option<(Option<Instant>, P)>,
    {
        let mut state = self.state.borrow_mut();
        let mut due: Vec<(Option<Instant>, String, P)> = state
            .debounced
            .iter_mut()
            .filter_map(|(event, debouncer)| {
                take(debouncer).map(|(deadline, payload)| (deadline, event.clone(), payload))
            })
            .collect();
        due.sort_by_key(|(deadline, _, _)| (deadline.is_none(), *deadline));
        due
    }

    // Runs with the state borrow released so listeners can re-enter the bus.
    fn deliver(&self, due: Vec<(Option<Instant>, String, P)>) -> usize {
        let count = due.len();
        for (_, event, payload) in due {
            self.dispatch_event(&event, &payload);
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::ListenerError;
    use std::cell::Cell;

    #[test]
    fn test_dispatch_without_listeners() {
        let bus: EventBus<u8> = EventBus::new();
        assert_eq!(bus.dispatch_event("nobody", &1).total(), 0);
    }

    #[test]
    fn test_events_are_independent() {
        let bus: EventBus<u8> = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        let _sub = {
            let hits = Rc::clone(&hits);
            bus.on("a", move |_| {
                hits.set(hits.get() + 1);
                Ok(())
            })
        };

        bus.dispatch_event("b", &0);
        assert_eq!(hits.get(), 0);
        bus.dispatch_event("a", &0);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_remove_event_listener() {
        let bus: EventBus<()> = EventBus::new();
        let cb = listener(|_: &()| Ok(()));
        let _sub = bus.add_event_listener("x", Rc::clone(&cb));
        assert!(bus.remove_event_listener("x", &cb));
        assert!(!bus.remove_event_listener("x", &cb));
        assert!(!bus.remove_event_listener("missing", &cb));
    }

    #[test]
    fn test_listener_can_dispatch_reentrantly() {
        let bus: EventBus<u8> = EventBus::new();
        let inner_hits = Rc::new(Cell::new(0));
        let _inner = {
            let hits = Rc::clone(&inner_hits);
            bus.on("inner", move |_| {
                hits.set(hits.get() + 1);
                Ok(())
            })
        };
        let _outer = {
            let inner_bus = bus.clone();
            bus.on("outer", move |value| {
                inner_bus.dispatch_event("inner", value);
                Ok(())
            })
        };

        bus.dispatch_event("outer", &3);
        assert_eq!(inner_hits.get(), 1);
    }

    #[test]
    fn test_failing_listener_does_not_block_others() {
        let bus: EventBus<()> = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        let _bad = bus.on("e", |_| Err(ListenerError::msg("broken")));
        let _good = {
            let hits = Rc::clone(&hits);
            bus.on("e", move |_| {
                hits.set(hits.get() + 1);
                Ok(())
            })
        };

        let report = bus.dispatch_event("e", &());
        assert_eq!(report, DispatchReport { delivered: 1, failed: 1 });
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_huge_delay_does_not_panic() {
        let bus: EventBus<u8> = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        let _sub = {
            let hits = Rc::clone(&hits);
            bus.on("never", move |_| {
                hits.set(hits.get() + 1);
                Ok(())
            })
        };

        let start = Instant::now();
        bus.dispatch_event_debounced("never", Duration::MAX, 1, start);
        assert!(bus.has_pending("never"));
        assert_eq!(bus.next_deadline(), None);
        assert_eq!(bus.poll_debounced(start + Duration::from_secs(86_400)), 0);
        assert_eq!(hits.get(), 0);

        assert_eq!(bus.flush_debounced(), 1);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_poll_delivers_in_deadline_order() {
        let bus: EventBus<&'static str> = EventBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for name in ["late", "early"] {
            let order = Rc::clone(&order);
            let _ = bus.on(name, move |payload| {
                order.borrow_mut().push(*payload);
                Ok(())
            });
        }

        let start = Instant::now();
        bus.dispatch_event_debounced("late", Duration::from_millis(30), "late", start);
        bus.dispatch_event_debounced("early", Duration::from_millis(10), "early", start);

        assert_eq!(bus.next_deadline(), Some(start + Duration::from_millis(10)));
        assert_eq!(bus.poll_debounced(start + Duration::from_millis(40)), 2);
        assert_eq!(order.borrow().as_slice(), ["early", "late"]);
    }
}
