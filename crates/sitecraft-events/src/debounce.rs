//! Trailing-edge debounce driven by an explicit clock.
//!
//! A `Debouncer` never spawns timers. It records a deadline and the value
//! that should be delivered once the deadline passes; the host event loop
//! calls [`Debouncer::poll`] with the current instant. Every new
//! [`Debouncer::schedule`] replaces the pending value and pushes the deadline
//! out again, so only the last value of a burst is ever delivered.
//!
//! A delay too long to add to the current instant never elapses: the value
//! stays pending, without a deadline, until it is flushed or replaced.

use std::time::{Duration, Instant};

use tracing::debug;

/// One animation frame at 60 Hz, the default coalescing window.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Pending delivery.
#[derive(Debug, Clone)]
struct Pending<T> {
    /// `None` when `now + delay` is not representable.
    deadline: Option<Instant>,
    value: T,
}

/// Coalesces bursts of values into a single trailing delivery.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(FRAME_INTERVAL)
    }
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The quiet period applied by the next [`schedule`](Self::schedule).
    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Change the quiet period. An already pending deadline is left alone.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Schedule `value` for delivery at `now + delay`.
    ///
    /// Returns `true` when a pending value was superseded.
    pub fn schedule(&mut self, value: T, now: Instant) -> bool {
        let superseded = self.pending.is_some();
        let deadline = now.checked_add(self.delay);
        if deadline.is_none() {
            debug!(delay = ?self.delay, "debounce delay out of range, waiting for flush");
        }
        self.pending = Some(Pending { deadline, value });
        superseded
    }

    /// Take the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if pending.deadline.is_some_and(|deadline| deadline <= now) => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Take the pending value regardless of its deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Drop the pending value without delivering it.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Whether a value is waiting for its deadline.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the pending value, if it has one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().and_then(|p| p.deadline)
    }

    /// Time left until the pending value becomes due (zero when overdue).
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_pending_by_default() {
        let mut debouncer: Debouncer<u8> = Debouncer::default();
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.delay(), FRAME_INTERVAL);
        assert_eq!(debouncer.poll(Instant::now()), None);
    }

    #[test]
    fn test_poll_before_deadline() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(50));
        debouncer.schedule("a", start);

        assert_eq!(debouncer.poll(start + Duration::from_millis(49)), None);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.poll(start + Duration::from_millis(50)), Some("a"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_reschedule_pushes_deadline() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(10));

        assert!(!debouncer.schedule(1, start));
        assert!(debouncer.schedule(2, start + Duration::from_millis(8)));

        // The original deadline has passed but the timer was reset.
        assert_eq!(debouncer.poll(start + Duration::from_millis(12)), None);
        assert_eq!(debouncer.poll(start + Duration::from_millis(18)), Some(2));
    }

    #[test]
    fn test_flush_and_cancel() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_secs(60));
        debouncer.schedule("late", start);
        assert_eq!(debouncer.flush(), Some("late"));

        debouncer.schedule("dropped", start);
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());
        assert_eq!(debouncer.flush(), None);
    }

    #[test]
    fn test_unrepresentable_delay_waits_for_flush() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::MAX);
        assert!(!debouncer.schedule("held", start));

        assert!(debouncer.is_pending());
        assert_eq!(debouncer.deadline(), None);
        assert_eq!(debouncer.remaining(start), None);
        assert_eq!(debouncer.poll(start + Duration::from_secs(3600)), None);
        assert_eq!(debouncer.flush(), Some("held"));
    }

    #[test]
    fn test_remaining_saturates() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(16));
        debouncer.schedule((), start);
        assert_eq!(
            debouncer.remaining(start + Duration::from_millis(6)),
            Some(Duration::from_millis(10))
        );
        assert_eq!(
            debouncer.remaining(start + Duration::from_millis(40)),
            Some(Duration::ZERO)
        );
    }
}
