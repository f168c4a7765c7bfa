//! Ordered, identity-deduplicated listener sets.
//!
//! A [`ListenerSet`] is a cheap handle around a shared list of listeners.
//! Listeners are compared by `Rc` identity: inserting the same `Rc` twice
//! keeps a single entry. Notification walks a snapshot of the list, so a
//! listener may subscribe, unsubscribe or dispatch again while it runs.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;
use tracing::warn;

/// Error returned by a listener. Logged and counted, never propagated.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Source(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ListenerError {
    /// Build an error from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

/// Result type listeners return.
pub type ListenerResult = std::result::Result<(), ListenerError>;

/// A registered callback.
pub type Listener<P> = Rc<dyn Fn(&P) -> ListenerResult>;

/// Wrap a closure as a [`Listener`].
///
/// Keep the returned `Rc` around to register the same listener elsewhere or
/// to compare identities.
pub fn listener<P, F>(f: F) -> Listener<P>
where
    F: Fn(&P) -> ListenerResult + 'static,
{
    Rc::new(f)
}

fn same_listener<P>(a: &Listener<P>, b: &Listener<P>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// Outcome of notifying a listener set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Listeners that returned `Ok`.
    pub delivered: usize,
    /// Listeners that returned an error.
    pub failed: usize,
}

impl DispatchReport {
    /// Number of listeners invoked.
    pub fn total(&self) -> usize {
        self.delivered + self.failed
    }

    /// True when no listener failed.
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Handle returned by every subscribe call.
///
/// Dropping the handle leaves the listener registered; call
/// [`unsubscribe`](Self::unsubscribe) to remove it.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap a deregistration closure.
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Remove the listener. Calling this after the owner is gone is a no-op.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Ordered set of listeners sharing one payload type.
pub struct ListenerSet<P> {
    inner: Rc<RefCell<Vec<Listener<P>>>>,
}

impl<P> Clone for ListenerSet<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<P> Default for ListenerSet<P> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<P: 'static> fmt::Debug for ListenerSet<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSet")
            .field("len", &self.len())
            .finish()
    }
}

impl<P: 'static> ListenerSet<P> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` unless the same `Rc` is already present.
    pub fn insert(&self, listener: Listener<P>) -> Subscription {
        {
            let mut list = self.inner.borrow_mut();
            if !list.iter().any(|existing| same_listener(existing, &listener)) {
                list.push(Rc::clone(&listener));
            }
        }
        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .borrow_mut()
                    .retain(|existing| !same_listener(existing, &listener));
            }
        })
    }

    /// Remove `listener` by identity. Returns whether it was registered.
    pub fn remove(&self, listener: &Listener<P>) -> bool {
        let mut list = self.inner.borrow_mut();
        let before = list.len();
        list.retain(|existing| !same_listener(existing, listener));
        list.len() != before
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Drop every listener.
    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }

    /// Invoke every listener in registration order.
    ///
    /// `label` only names the set in log output.
    pub fn notify(&self, label: &str, payload: &P) -> DispatchReport {
        let snapshot: Vec<Listener<P>> = self.inner.borrow().clone();
        let mut report = DispatchReport::default();
        for (index, listener) in snapshot.iter().enumerate() {
            match listener(payload) {
                Ok(()) => report.delivered += 1,
                Err(error) => {
                    report.failed += 1;
                    warn!(event = label, listener = index, %error, "listener failed");
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_insert_dedups_by_identity() {
        let set: ListenerSet<u32> = ListenerSet::new();
        let hits = Rc::new(Cell::new(0));
        let counter = {
            let hits = Rc::clone(&hits);
            listener(move |_: &u32| {
                hits.set(hits.get() + 1);
                Ok(())
            })
        };

        let _first = set.insert(Rc::clone(&counter));
        let _second = set.insert(Rc::clone(&counter));
        assert_eq!(set.len(), 1);

        set.notify("test", &1);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_debug_reports_len() {
        let set: ListenerSet<u32> = ListenerSet::new();
        let _sub = set.insert(listener(|_: &u32| Ok(())));
        assert_eq!(format!("{set:?}"), "ListenerSet { len: 1 }");

        let sub = set.insert(listener(|_: &u32| Ok(())));
        assert_eq!(format!("{sub:?}"), "Subscription { active: true }");
    }

    #[test]
    fn test_distinct_closures_are_distinct_listeners() {
        let set: ListenerSet<u32> = ListenerSet::new();
        let _a = set.insert(listener(|_: &u32| Ok(())));
        let _b = set.insert(listener(|_: &u32| Ok(())));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_failure_is_isolated() {
        let set: ListenerSet<String> = ListenerSet::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let _broken = set.insert(listener(|_: &String| Err(ListenerError::msg("boom"))));
        let _ok = {
            let seen = Rc::clone(&seen);
            set.insert(listener(move |payload: &String| {
                seen.borrow_mut().push(payload.clone());
                Ok(())
            }))
        };

        let report = set.notify("test", &"hello".to_string());
        assert_eq!(report.delivered, 1);
        assert_eq!(report.failed, 1);
        assert!(!report.is_clean());
        assert_eq!(seen.borrow().as_slice(), ["hello"]);
    }

    #[test]
    fn test_unsubscribe_removes_listener() {
        let set: ListenerSet<()> = ListenerSet::new();
        let sub = set.insert(listener(|_: &()| Ok(())));
        assert_eq!(set.len(), 1);
        sub.unsubscribe();
        assert!(set.is_empty());
        assert_eq!(set.notify("test", &()).total(), 0);
    }

    #[test]
    fn test_unsubscribe_after_owner_dropped() {
        let set: ListenerSet<()> = ListenerSet::new();
        let sub = set.insert(listener(|_: &()| Ok(())));
        drop(set);
        sub.unsubscribe();
    }

    #[test]
    fn test_listener_may_unsubscribe_itself() {
        let set: ListenerSet<()> = ListenerSet::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let hits = Rc::new(Cell::new(0));

        let sub = {
            let slot = Rc::clone(&slot);
            let hits = Rc::clone(&hits);
            set.insert(listener(move |_: &()| {
                hits.set(hits.get() + 1);
                if let Some(sub) = slot.borrow_mut().take() {
                    sub.unsubscribe();
                }
                Ok(())
            }))
        };
        *slot.borrow_mut() = Some(sub);

        set.notify("test", &());
        set.notify("test", &());
        assert_eq!(hits.get(), 1);
    }
}
