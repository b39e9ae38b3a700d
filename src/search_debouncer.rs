//! Search debounce control
//!
//! Trailing-edge debouncing of a rapidly changing value. The debouncer is
//! polled rather than callback driven: the owner asks for the current
//! deadline, sleeps until it, and then calls [`SearchDebouncer::poll`]. The
//! pending update lives inside the debouncer, so cancelling it or dropping
//! the owner leaves nothing behind that could fire later.

use tokio::time::{Duration, Instant};

/// Value waiting for the quiet period to elapse
#[derive(Debug, Clone)]
struct PendingValue<T> {
    value: T,
    deadline: Instant,
}

/// Debounce controller producing a stabilized value
#[derive(Debug)]
pub struct SearchDebouncer<T> {
    delay: Duration,
    stabilized: Option<T>,
    pending: Option<PendingValue<T>>,
}

impl<T: Clone + PartialEq> SearchDebouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            stabilized: None,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Feed the latest raw value and get the stabilized one back.
    ///
    /// The first call stabilizes immediately. Later calls return the previous
    /// stabilized value and restart the quiet period whenever `value` differs
    /// from what is already pending.
    pub fn debounce(&mut self, value: T) -> T {
        let Some(stabilized) = self.stabilized.clone() else {
            self.stabilized = Some(value.clone());
            return value;
        };

        let already_pending = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.value == value);
        let already_stable = self.pending.is_none() && stabilized == value;

        if !already_pending && !already_stable {
            self.pending = Some(PendingValue {
                value,
                deadline: Instant::now() + self.delay,
            });
        }

        stabilized
    }

    /// Deliver the pending value once its deadline has passed.
    ///
    /// Returns `Some` only when the stabilized value actually changes; a
    /// pending value equal to the current one settles silently.
    pub fn poll(&mut self) -> Option<T> {
        let deadline = self.pending.as_ref()?.deadline;
        if Instant::now() < deadline {
            return None;
        }

        let PendingValue { value, .. } = self.pending.take()?;
        if self.stabilized.as_ref() == Some(&value) {
            return None;
        }
        self.stabilized = Some(value.clone());
        Some(value)
    }

    /// Stabilize `value` right away, dropping anything pending
    pub fn settle(&mut self, value: T) {
        self.pending = None;
        self.stabilized = Some(value);
    }

    /// Cancel the pending update, keeping the current stabilized value
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn stabilized(&self) -> Option<&T> {
        self.stabilized.as_ref()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due, if there is one
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// Remaining time until the pending value becomes due
    pub fn time_until_ready(&self) -> Option<Duration> {
        self.deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    #[test]
    fn test_first_value_is_returned_immediately() {
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(500));
        assert_eq!(debouncer.debounce("initial"), "initial");
        assert_eq!(debouncer.stabilized(), Some(&"initial"));
        assert!(!debouncer.has_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_updates_value_after_delay() {
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(500));
        assert_eq!(debouncer.debounce("hello"), "hello");

        assert_eq!(debouncer.debounce("world"), "hello");
        assert_eq!(debouncer.poll(), None);

        advance(Duration::from_millis(499)).await;
        assert_eq!(debouncer.poll(), None);

        advance(Duration::from_millis(1)).await;
        assert_eq!(debouncer.poll(), Some("world"));
        assert_eq!(debouncer.stabilized(), Some(&"world"));
        assert_eq!(debouncer.poll(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_value_resets_timer() {
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(500));
        debouncer.debounce("first");

        assert_eq!(debouncer.debounce("second"), "first");
        advance(Duration::from_millis(250)).await;
        assert_eq!(debouncer.poll(), None);

        assert_eq!(debouncer.debounce("third"), "first");
        advance(Duration::from_millis(250)).await;
        assert_eq!(debouncer.poll(), None);

        advance(Duration::from_millis(250)).await;
        assert_eq!(debouncer.poll(), Some("third"));
        assert_eq!(debouncer.poll(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeating_pending_value_does_not_restart_timer() {
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(100));
        debouncer.debounce(1);
        debouncer.debounce(2);
        advance(Duration::from_millis(60)).await;
        debouncer.debounce(2);
        advance(Duration::from_millis(40)).await;
        assert_eq!(debouncer.poll(), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_returning_to_stable_value_settles_silently() {
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(100));
        debouncer.debounce("abc");
        debouncer.debounce("abcd");
        debouncer.debounce("abc");
        advance(Duration::from_millis(100)).await;
        assert_eq!(debouncer.poll(), None);
        assert!(!debouncer.has_pending());
        assert_eq!(debouncer.stabilized(), Some(&"abc"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_update() {
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(100));
        debouncer.debounce("a");
        debouncer.debounce("b");
        debouncer.cancel();
        advance(Duration::from_millis(200)).await;
        assert_eq!(debouncer.poll(), None);
        assert_eq!(debouncer.stabilized(), Some(&"a"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_bypasses_delay() {
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(100));
        debouncer.debounce("a");
        debouncer.debounce("b");
        debouncer.settle("b");
        assert_eq!(debouncer.stabilized(), Some(&"b"));
        advance(Duration::from_millis(200)).await;
        assert_eq!(debouncer.poll(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_time_until_ready() {
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(100));
        assert!(debouncer.time_until_ready().is_none());

        debouncer.debounce("a");
        debouncer.debounce("b");
        assert_eq!(debouncer.time_until_ready(), Some(Duration::from_millis(100)));

        advance(Duration::from_millis(30)).await;
        assert_eq!(debouncer.time_until_ready(), Some(Duration::from_millis(70)));

        advance(Duration::from_millis(500)).await;
        assert_eq!(debouncer.time_until_ready(), Some(Duration::ZERO));
    }
}
